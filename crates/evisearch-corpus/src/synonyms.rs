//! Medical synonym table and the published index
//!
//! Equivalence classes over surface terms across scripts and abbreviations.
//! The index is built once on first use and read-only afterwards.

use std::sync::LazyLock;

use evisearch_core::SynonymIndex;

/// Equivalence classes. Each row mixes Japanese and Latin surface forms of
/// one clinical concept; rows must stay disjoint.
static SYNONYM_CLASSES: &[&[&str]] = &[
    &["脳卒中", "stroke", "脳血管障害", "CVA"],
    &["脳梗塞", "cerebral infarction", "brain infarction"],
    &["リハビリテーション", "rehabilitation", "リハビリ"],
    &["高血圧", "hypertension", "high blood pressure"],
    &["糖尿病", "diabetes", "diabetes mellitus", "DM"],
    &["変形性膝関節症", "knee osteoarthritis", "膝OA", "gonarthrosis"],
    &["乳癌", "乳がん", "breast cancer"],
    &["大腸癌", "大腸がん", "colorectal cancer"],
    &["心不全", "heart failure", "HF"],
    &["認知症", "dementia"],
    &["アルツハイマー病", "Alzheimer disease", "アルツハイマー型認知症"],
    &["喘息", "asthma", "気管支喘息"],
    &["COPD", "慢性閉塞性肺疾患", "chronic obstructive pulmonary disease"],
    &["腰痛", "low back pain", "LBP"],
    &["慢性腎臓病", "chronic kidney disease", "CKD"],
    &["理学療法", "physical therapy", "physiotherapy"],
    &["作業療法", "occupational therapy"],
    &["運動療法", "exercise therapy", "therapeutic exercise"],
    &["転倒", "fall", "falls"],
    &["嚥下障害", "dysphagia", "swallowing disorder"],
    &["サルコペニア", "sarcopenia"],
    &["誤嚥性肺炎", "aspiration pneumonia"],
    &["心房細動", "atrial fibrillation", "AF"],
    &["骨粗鬆症", "osteoporosis"],
    &["禁煙", "smoking cessation"],
];

static INDEX: LazyLock<SynonymIndex> = LazyLock::new(|| SynonymIndex::new(SYNONYM_CLASSES));

/// The process-wide synonym index.
pub fn synonym_index() -> &'static SynonymIndex {
    &INDEX
}
