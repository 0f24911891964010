//! J-STAGE adapter (Japanese full-text index)
//!
//! The search API returns an Atom-like XML feed. The feed is narrow and
//! predictable, so extraction is regex over `<entry>` blocks rather than a
//! full XML parser; titles and other text fields still pass through the
//! shared markup stripper for CDATA and entities.

use std::sync::LazyLock;

use regex::Regex;

use evisearch_core::{Record, Source, classify_title, strip_html};

use crate::client::{SEARCH_TIMEOUT, get_text};
use crate::error::SourceError;

const SEARCH_URL: &str = "https://api.jstage.jst.go.jp/searchapi/do";
const MAX_AUTHORS: usize = 5;

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<entry>(.*?)</entry>").expect("entry regex"));
static TITLE_JA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<article_title>.*?<ja>(.*?)</ja>").expect("title ja regex")
});
static TITLE_EN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<article_title>.*?<en>(.*?)</en>").expect("title en regex")
});
static TITLE_PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<title>(.*?)</title>").expect("title regex"));
static LINK_JA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<article_link>.*?<ja>(.*?)</ja>").expect("link ja regex")
});
static LINK_EN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<article_link>.*?<en>(.*?)</en>").expect("link en regex")
});
static LINK_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<link[^>]*href="([^"]+)""#).expect("link href regex"));
static AUTHOR_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<author>(.*?)</author>").expect("author regex"));
static JA_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<ja>(.*?)</ja>").expect("ja block regex"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<name>(.*?)</name>").expect("name regex"));
static MATERIAL_JA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<material_title>.*?<ja>(.*?)</ja>").expect("material regex")
});
static PUBLICATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<prism:publicationName>(.*?)</prism:publicationName>")
        .expect("publication regex")
});
static PUBYEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<pubyear>(\d{4})</pubyear>").expect("pubyear regex"));
static DOI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<prism:doi>(.*?)</prism:doi>").expect("doi regex"));

pub async fn search(query: &str) -> Result<Vec<Record>, SourceError> {
    let body = get_text(
        SEARCH_URL,
        &[("service", "3"), ("text", query), ("count", "20")],
        SEARCH_TIMEOUT,
    )
    .await?;
    Ok(parse_feed(&body))
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .map(|c| strip_html(c.get(1).map_or("", |m| m.as_str())))
}

/// Records out of the Atom-like feed. Entries without a title are dropped.
pub fn parse_feed(body: &str) -> Vec<Record> {
    let mut records = Vec::new();
    for (i, entry) in ENTRY_RE.captures_iter(body).enumerate() {
        let entry = entry.get(1).map_or("", |m| m.as_str());

        // Japanese title preferred over English, then the bare <title>
        let title = capture(&TITLE_JA_RE, entry)
            .filter(|t| !t.is_empty())
            .or_else(|| capture(&TITLE_EN_RE, entry).filter(|t| !t.is_empty()))
            .or_else(|| capture(&TITLE_PLAIN_RE, entry).filter(|t| !t.is_empty()));
        let Some(title) = title else { continue };

        let url = capture(&LINK_JA_RE, entry)
            .filter(|u| !u.is_empty())
            .or_else(|| capture(&LINK_EN_RE, entry).filter(|u| !u.is_empty()))
            .or_else(|| {
                LINK_HREF_RE
                    .captures(entry)
                    .map(|c| c.get(1).map_or("", |m| m.as_str()).to_string())
            })
            .unwrap_or_default();

        let doi = capture(&DOI_RE, entry).filter(|d| !d.is_empty());
        let id = doi
            .clone()
            .or_else(|| (!url.is_empty()).then(|| url.clone()))
            .unwrap_or_else(|| format!("jstage-{i}"));

        let mut record = Record::new(Source::Jstage, id, title);
        record.url = url;
        if let Some(doi) = doi {
            record.set_doi(&doi);
        }

        if let Some(author_block) = AUTHOR_BLOCK_RE
            .captures(entry)
            .map(|c| c.get(1).map_or("", |m| m.as_str()))
        {
            // prefer the Japanese name list when the block carries one
            let names_in = JA_BLOCK_RE
                .captures(author_block)
                .map(|c| c.get(1).map_or("", |m| m.as_str()).to_string())
                .unwrap_or_else(|| author_block.to_string());
            record.authors = NAME_RE
                .captures_iter(&names_in)
                .map(|c| strip_html(c.get(1).map_or("", |m| m.as_str())))
                .filter(|n| !n.is_empty())
                .take(MAX_AUTHORS)
                .collect();
        }

        record.journal = capture(&MATERIAL_JA_RE, entry)
            .filter(|j| !j.is_empty())
            .or_else(|| capture(&PUBLICATION_RE, entry).filter(|j| !j.is_empty()))
            .unwrap_or_default();
        record.year = PUBYEAR_RE
            .captures(entry)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok());
        record.language = Some("ja".to_string());
        record.evidence_level = classify_title(&record.title);
        records.push(record);
    }
    records
}
