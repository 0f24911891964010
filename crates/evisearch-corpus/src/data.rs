//! Embedded registry snapshot
//!
//! A curated snapshot of Japanese national guidelines and the clinical
//! questions extracted from them. The registry shape is the contract; the
//! snapshot is large enough to exercise scoring, suggestion, and browsing.

use crate::model::{ClinicalQuestion, Guideline};

pub static GUIDELINES: &[Guideline] = &[
    Guideline {
        id: "gl-stroke-2021",
        title: "脳卒中治療ガイドライン2021",
        title_en: Some("Japanese Guidelines for the Management of Stroke 2021"),
        org: "日本脳卒中学会",
        url: "https://www.jsts.gr.jp/guideline/2021/",
        cat: "neurology",
        country: "JP",
        year: 2021,
        diseases: &["脳卒中", "脳梗塞", "脳出血", "くも膜下出血", "stroke", "cerebral infarction"],
    },
    Guideline {
        id: "gl-htn-2019",
        title: "高血圧治療ガイドライン2019",
        title_en: Some("JSH 2019 Guidelines for the Management of Hypertension"),
        org: "日本高血圧学会",
        url: "https://www.jpnsh.jp/guideline.html",
        cat: "cardiology",
        country: "JP",
        year: 2019,
        diseases: &["高血圧", "hypertension"],
    },
    Guideline {
        id: "gl-dm-2024",
        title: "糖尿病診療ガイドライン2024",
        title_en: Some("Japanese Clinical Practice Guideline for Diabetes 2024"),
        org: "日本糖尿病学会",
        url: "https://www.jds.or.jp/modules/publication/",
        cat: "endocrinology",
        country: "JP",
        year: 2024,
        diseases: &["糖尿病", "2型糖尿病", "diabetes", "diabetes mellitus"],
    },
    Guideline {
        id: "gl-ckd-2023",
        title: "エビデンスに基づくCKD診療ガイドライン2023",
        title_en: Some("Evidence-based Clinical Practice Guideline for CKD 2023"),
        org: "日本腎臓学会",
        url: "https://jsn.or.jp/medic/guideline/",
        cat: "nephrology",
        country: "JP",
        year: 2023,
        diseases: &["慢性腎臓病", "CKD", "chronic kidney disease"],
    },
    Guideline {
        id: "gl-asthma-2021",
        title: "喘息予防・管理ガイドライン2021",
        title_en: None,
        org: "日本アレルギー学会",
        url: "https://www.jsaweb.jp/modules/journal/",
        cat: "respiratory",
        country: "JP",
        year: 2021,
        diseases: &["喘息", "気管支喘息", "asthma"],
    },
    Guideline {
        id: "gl-copd-2022",
        title: "COPD診断と治療のためのガイドライン2022",
        title_en: None,
        org: "日本呼吸器学会",
        url: "https://www.jrs.or.jp/publication/",
        cat: "respiratory",
        country: "JP",
        year: 2022,
        diseases: &["COPD", "慢性閉塞性肺疾患", "chronic obstructive pulmonary disease"],
    },
    Guideline {
        id: "gl-koa-2023",
        title: "変形性膝関節症診療ガイドライン2023",
        title_en: Some("Japanese Clinical Practice Guideline for Knee Osteoarthritis 2023"),
        org: "日本整形外科学会",
        url: "https://www.joa.or.jp/public/publication/",
        cat: "orthopedics",
        country: "JP",
        year: 2023,
        diseases: &["変形性膝関節症", "膝OA", "knee osteoarthritis"],
    },
    Guideline {
        id: "gl-bc-2022",
        title: "乳癌診療ガイドライン2022",
        title_en: Some("Japanese Breast Cancer Society Clinical Practice Guidelines 2022"),
        org: "日本乳癌学会",
        url: "https://jbcs.xsrv.jp/guideline/",
        cat: "oncology",
        country: "JP",
        year: 2022,
        diseases: &["乳癌", "乳がん", "breast cancer"],
    },
    Guideline {
        id: "gl-crc-2022",
        title: "大腸癌治療ガイドライン2022",
        title_en: None,
        org: "大腸癌研究会",
        url: "https://www.jsccr.jp/guideline/",
        cat: "oncology",
        country: "JP",
        year: 2022,
        diseases: &["大腸癌", "大腸がん", "colorectal cancer"],
    },
    Guideline {
        id: "gl-hf-2021",
        title: "急性・慢性心不全診療ガイドライン",
        title_en: Some("JCS/JHFS Guideline on Diagnosis and Treatment of Heart Failure"),
        org: "日本循環器学会",
        url: "https://www.j-circ.or.jp/guideline/",
        cat: "cardiology",
        country: "JP",
        year: 2021,
        diseases: &["心不全", "慢性心不全", "heart failure"],
    },
    Guideline {
        id: "gl-dementia-2017",
        title: "認知症疾患診療ガイドライン2017",
        title_en: None,
        org: "日本神経学会",
        url: "https://www.neurology-jp.org/guidelinem/",
        cat: "neurology",
        country: "JP",
        year: 2017,
        diseases: &["認知症", "アルツハイマー病", "dementia", "Alzheimer disease"],
    },
    Guideline {
        id: "gl-lbp-2019",
        title: "腰痛診療ガイドライン2019",
        title_en: None,
        org: "日本整形外科学会",
        url: "https://www.joa.or.jp/public/publication/",
        cat: "orthopedics",
        country: "JP",
        year: 2019,
        diseases: &["腰痛", "慢性腰痛", "low back pain"],
    },
    Guideline {
        id: "gl-sarcopenia-2017",
        title: "サルコペニア診療ガイドライン2017",
        title_en: None,
        org: "日本サルコペニア・フレイル学会",
        url: "https://jssf.umin.jp/clinical_guide.html",
        cat: "geriatrics",
        country: "JP",
        year: 2017,
        diseases: &["サルコペニア", "sarcopenia", "フレイル"],
    },
];

pub static CQS: &[ClinicalQuestion] = &[
    ClinicalQuestion {
        gid: "gl-stroke-2021",
        cq: "CQ1",
        q: "脳梗塞急性期において rt-PA 静注療法は推奨されるか",
        kind: "treatment",
        rec: "発症4.5時間以内の脳梗塞に対して強く推奨する",
        ev: "A",
        page: Some(52),
        kw: &["脳梗塞", "rt-PA", "血栓溶解療法", "alteplase"],
    },
    ClinicalQuestion {
        gid: "gl-stroke-2021",
        cq: "CQ2",
        q: "脳卒中片麻痺に対して発症早期からのリハビリテーションは推奨されるか",
        kind: "rehabilitation",
        rec: "早期からの積極的なリハビリテーションを推奨する",
        ev: "B",
        page: Some(270),
        kw: &["脳卒中", "リハビリテーション", "片麻痺", "early mobilization"],
    },
    ClinicalQuestion {
        gid: "gl-stroke-2021",
        cq: "CQ3",
        q: "心房細動を有する脳梗塞患者に DOAC は推奨されるか",
        kind: "treatment",
        rec: "ワルファリンより出血リスクの観点から推奨する",
        ev: "A",
        page: Some(118),
        kw: &["心房細動", "DOAC", "抗凝固療法", "anticoagulation"],
    },
    ClinicalQuestion {
        gid: "gl-htn-2019",
        cq: "CQ1",
        q: "高血圧患者において家庭血圧測定は推奨されるか",
        kind: "diagnosis",
        rec: "診察室血圧より優先して用いることを推奨する",
        ev: "A",
        page: Some(18),
        kw: &["高血圧", "家庭血圧", "blood pressure monitoring"],
    },
    ClinicalQuestion {
        gid: "gl-htn-2019",
        cq: "CQ5",
        q: "減塩指導は降圧に有効か",
        kind: "lifestyle",
        rec: "6g/日未満の減塩を推奨する",
        ev: "A",
        page: Some(64),
        kw: &["減塩", "食事療法", "salt restriction"],
    },
    ClinicalQuestion {
        gid: "gl-dm-2024",
        cq: "CQ2",
        q: "2型糖尿病患者において運動療法は血糖コントロールを改善するか",
        kind: "treatment",
        rec: "有酸素運動とレジスタンス運動の併用を推奨する",
        ev: "A",
        page: Some(88),
        kw: &["糖尿病", "運動療法", "exercise", "HbA1c"],
    },
    ClinicalQuestion {
        gid: "gl-dm-2024",
        cq: "CQ7",
        q: "SGLT2阻害薬は心血管イベントを抑制するか",
        kind: "treatment",
        rec: "心血管リスクの高い患者で使用を推奨する",
        ev: "A",
        page: Some(140),
        kw: &["SGLT2", "心血管イベント", "cardiovascular outcome"],
    },
    ClinicalQuestion {
        gid: "gl-ckd-2023",
        cq: "CQ4",
        q: "CKD患者においてたんぱく質制限は腎機能低下を抑制するか",
        kind: "nutrition",
        rec: "ステージに応じたたんぱく質制限を提案する",
        ev: "B",
        page: Some(76),
        kw: &["慢性腎臓病", "たんぱく質制限", "protein restriction"],
    },
    ClinicalQuestion {
        gid: "gl-asthma-2021",
        cq: "CQ3",
        q: "吸入ステロイド薬は喘息増悪を予防するか",
        kind: "treatment",
        rec: "長期管理の第一選択として推奨する",
        ev: "A",
        page: Some(102),
        kw: &["喘息", "吸入ステロイド", "ICS", "inhaled corticosteroid"],
    },
    ClinicalQuestion {
        gid: "gl-copd-2022",
        cq: "CQ2",
        q: "COPD患者に呼吸リハビリテーションは推奨されるか",
        kind: "rehabilitation",
        rec: "息切れと運動耐容能の改善のため強く推奨する",
        ev: "A",
        page: Some(94),
        kw: &["COPD", "呼吸リハビリテーション", "pulmonary rehabilitation"],
    },
    ClinicalQuestion {
        gid: "gl-koa-2023",
        cq: "CQ1",
        q: "変形性膝関節症に対して運動療法は推奨されるか",
        kind: "treatment",
        rec: "疼痛軽減と機能改善のため強く推奨する",
        ev: "A",
        page: Some(34),
        kw: &["変形性膝関節症", "運動療法", "exercise therapy"],
    },
    ClinicalQuestion {
        gid: "gl-koa-2023",
        cq: "CQ6",
        q: "変形性膝関節症に対するヒアルロン酸関節内注射は有効か",
        kind: "treatment",
        rec: "短期的な疼痛軽減に対して提案する",
        ev: "B",
        page: Some(58),
        kw: &["変形性膝関節症", "ヒアルロン酸", "hyaluronic acid"],
    },
    ClinicalQuestion {
        gid: "gl-bc-2022",
        cq: "CQ2",
        q: "早期乳癌に対して乳房温存手術は乳房切除術と同等の予後が得られるか",
        kind: "surgery",
        rec: "適応例では同等の生存率が得られるため推奨する",
        ev: "A",
        page: Some(44),
        kw: &["乳癌", "乳房温存手術", "breast conserving surgery"],
    },
    ClinicalQuestion {
        gid: "gl-bc-2022",
        cq: "CQ11",
        q: "HER2陽性乳癌に術後トラスツズマブは推奨されるか",
        kind: "treatment",
        rec: "1年間の投与を強く推奨する",
        ev: "A",
        page: Some(130),
        kw: &["乳癌", "HER2", "trastuzumab", "トラスツズマブ"],
    },
    ClinicalQuestion {
        gid: "gl-crc-2022",
        cq: "CQ4",
        q: "ステージIII大腸癌に術後補助化学療法は推奨されるか",
        kind: "treatment",
        rec: "再発抑制のため推奨する",
        ev: "A",
        page: Some(66),
        kw: &["大腸癌", "補助化学療法", "adjuvant chemotherapy"],
    },
    ClinicalQuestion {
        gid: "gl-hf-2021",
        cq: "CQ3",
        q: "HFrEF患者にベータ遮断薬は予後を改善するか",
        kind: "treatment",
        rec: "忍容性を確認しつつ漸増投与を強く推奨する",
        ev: "A",
        page: Some(82),
        kw: &["心不全", "ベータ遮断薬", "beta blocker", "HFrEF"],
    },
    ClinicalQuestion {
        gid: "gl-hf-2021",
        cq: "CQ9",
        q: "心不全患者に心臓リハビリテーションは推奨されるか",
        kind: "rehabilitation",
        rec: "運動耐容能とQOLの改善のため推奨する",
        ev: "A",
        page: Some(158),
        kw: &["心不全", "心臓リハビリテーション", "cardiac rehabilitation"],
    },
    ClinicalQuestion {
        gid: "gl-dementia-2017",
        cq: "CQ5",
        q: "アルツハイマー型認知症にコリンエステラーゼ阻害薬は有効か",
        kind: "treatment",
        rec: "認知機能の進行抑制を期待して推奨する",
        ev: "B",
        page: Some(112),
        kw: &["認知症", "コリンエステラーゼ阻害薬", "donepezil"],
    },
    ClinicalQuestion {
        gid: "gl-dementia-2017",
        cq: "CQ8",
        q: "認知症患者に対する運動介入は認知機能低下を抑制するか",
        kind: "prevention",
        rec: "多因子介入の一部として提案する",
        ev: "C1",
        page: Some(150),
        kw: &["認知症", "運動介入", "physical activity"],
    },
    ClinicalQuestion {
        gid: "gl-lbp-2019",
        cq: "CQ2",
        q: "慢性腰痛に対して運動療法は推奨されるか",
        kind: "treatment",
        rec: "疼痛と機能の改善のため強く推奨する",
        ev: "A",
        page: Some(40),
        kw: &["腰痛", "運動療法", "exercise therapy"],
    },
    ClinicalQuestion {
        gid: "gl-lbp-2019",
        cq: "CQ6",
        q: "慢性腰痛に認知行動療法は有効か",
        kind: "treatment",
        rec: "集学的治療の一部として提案する",
        ev: "B",
        page: Some(72),
        kw: &["腰痛", "認知行動療法", "cognitive behavioral therapy"],
    },
    ClinicalQuestion {
        gid: "gl-sarcopenia-2017",
        cq: "CQ3",
        q: "サルコペニア患者にレジスタンス運動は筋力を改善するか",
        kind: "treatment",
        rec: "たんぱく質補給との併用を推奨する",
        ev: "B",
        page: Some(48),
        kw: &["サルコペニア", "レジスタンス運動", "resistance training"],
    },
    ClinicalQuestion {
        gid: "gl-stroke-2021",
        cq: "CQ12",
        q: "嚥下障害を有する脳卒中患者に嚥下リハビリテーションは推奨されるか",
        kind: "rehabilitation",
        rec: "誤嚥性肺炎の予防のため推奨する",
        ev: "B",
        page: Some(290),
        kw: &["嚥下障害", "嚥下リハビリテーション", "dysphagia"],
    },
    ClinicalQuestion {
        gid: "gl-copd-2022",
        cq: "CQ7",
        q: "COPD患者に対する禁煙介入は病勢進行を抑制するか",
        kind: "lifestyle",
        rec: "すべての喫煙患者に禁煙支援を強く推奨する",
        ev: "A",
        page: Some(120),
        kw: &["COPD", "禁煙", "smoking cessation"],
    },
    ClinicalQuestion {
        gid: "gl-ckd-2023",
        cq: "CQ9",
        q: "CKD患者の高血圧管理において RAS 阻害薬は推奨されるか",
        kind: "treatment",
        rec: "蛋白尿を伴う場合第一選択として推奨する",
        ev: "A",
        page: Some(104),
        kw: &["慢性腎臓病", "高血圧", "RAS阻害薬", "ACE inhibitor"],
    },
    ClinicalQuestion {
        gid: "gl-sarcopenia-2017",
        cq: "CQ6",
        q: "高齢者の転倒予防に運動プログラムは有効か",
        kind: "prevention",
        rec: "バランス訓練を含む複合運動を推奨する",
        ev: "A",
        page: Some(70),
        kw: &["転倒", "転倒予防", "fall prevention", "バランス訓練"],
    },
];

/// Parent guideline lookup for CQ result enrichment.
pub fn guideline_by_id(id: &str) -> Option<&'static Guideline> {
    GUIDELINES.iter().find(|g| g.id == id)
}
