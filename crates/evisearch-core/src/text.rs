//! Text normalization helpers shared by adapters and the reconciler

use std::sync::LazyLock;

use regex::Regex;

static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("cdata regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word regex"));
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("ws regex"));
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").expect("year regex"));

/// Remove markup from a title or abstract fragment.
///
/// The contract is deliberately narrow: expand CDATA sections, remove all
/// `<...>` spans, decode the five basic entities, trim. CDATA must be
/// expanded first or the tag pass would swallow its payload.
pub fn strip_html(s: &str) -> String {
    let s = CDATA_RE.replace_all(s, "$1");
    let s = TAG_RE.replace_all(&s, "");
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Normalized form used by the title-based dedup key: lowercased, punctuation
/// removed (Unicode word characters and whitespace survive, which keeps CJK
/// text intact), whitespace collapsed.
pub fn normalize_title(s: &str) -> String {
    let lowered = s.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    WS_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Lowercase a DOI and strip any `http(s)://doi.org/` (or `dx.doi.org`) prefix.
pub fn normalize_doi(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    for prefix in [
        "https://doi.org/",
        "http://doi.org/",
        "https://dx.doi.org/",
        "http://dx.doi.org/",
    ] {
        if let Some(rest) = lowered.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    lowered
}

/// First 4-digit run in a date-ish string, e.g. `"2023 Mar 14"` → 2023.
pub fn first_year(s: &str) -> Option<i32> {
    YEAR_RE.find(s).and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_removes_tags() {
        assert_eq!(
            strip_html("Effect of <i>exercise</i> on <b>pain</b>."),
            "Effect of exercise on pain."
        );
    }

    #[test]
    fn strip_html_expands_cdata() {
        assert_eq!(
            strip_html("<title><![CDATA[脳卒中の<b>研究</b>]]></title>"),
            "脳卒中の研究"
        );
    }

    #[test]
    fn strip_html_decodes_entities() {
        assert_eq!(strip_html("A &amp; B &lt;C&gt;"), "A & B <C>");
    }

    #[test]
    fn normalize_title_collapses() {
        assert_eq!(
            normalize_title("  Stroke:  Rehabilitation, (2nd ed.) "),
            "stroke rehabilitation 2nd ed"
        );
    }

    #[test]
    fn normalize_title_keeps_cjk() {
        assert_eq!(normalize_title("脳卒中の「検討」です。"), "脳卒中の検討です");
    }

    #[test]
    fn normalize_doi_strips_prefix_and_case() {
        assert_eq!(normalize_doi("https://doi.org/10.1000/AbC"), "10.1000/abc");
        assert_eq!(normalize_doi("10.1000/xyz"), "10.1000/xyz");
        assert_eq!(normalize_doi("http://dx.doi.org/10.2/Q"), "10.2/q");
    }

    #[test]
    fn first_year_finds_first_run() {
        assert_eq!(first_year("2023 Mar 14"), Some(2023));
        assert_eq!(first_year("published 1998-2001"), Some(1998));
        assert_eq!(first_year("no digits here"), None);
    }
}
