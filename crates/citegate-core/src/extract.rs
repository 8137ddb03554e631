//! Citation extraction.
//!
//! Reports cite sources in two competing syntaxes:
//! - markdown hyperlinks: `[Title](https://example.com)`
//! - legacy numeric citations: `[3]`
//!
//! The two syntaxes are extracted by independent passes rather than one
//! polymorphic citation type, because the disambiguation rule between them is
//! syntax-specific: a bracketed integer immediately followed by `(` is the
//! title of a hyperlink citation (`[1](url)`), never a numeric citation.
//!
//! Extraction is a pure function of the input text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::registry::normalize_url;

static HYPERLINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("hyperlink citation pattern")
});

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("numeric citation pattern"));

/// One markdown hyperlink citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkCitation {
    pub title: String,
    /// URL with trailing `.,;:` punctuation stripped (display form).
    pub url: String,
}

impl HyperlinkCitation {
    /// Normalized form used for registry lookups.
    pub fn normalized_url(&self) -> &str {
        normalize_url(&self.url)
    }
}

/// Result of both extraction passes over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedCitations {
    pub hyperlinks: Vec<HyperlinkCitation>,
    pub numeric: BTreeSet<u32>,
}

impl ExtractedCitations {
    pub fn has_any(&self) -> bool {
        !self.hyperlinks.is_empty() || !self.numeric.is_empty()
    }
}

/// Extract all citations from `content`.
pub fn extract(content: &str) -> ExtractedCitations {
    ExtractedCitations {
        hyperlinks: extract_hyperlinks(content),
        numeric: extract_numeric(content),
    }
}

/// Extract markdown hyperlink citations in document order.
///
/// A trailing run of `.,;:` on the captured URL is sentence punctuation, not
/// part of the address, and is stripped.
pub fn extract_hyperlinks(content: &str) -> Vec<HyperlinkCitation> {
    HYPERLINK_RE
        .captures_iter(content)
        .map(|caps| HyperlinkCitation {
            title: caps[1].to_string(),
            url: caps[2].trim_end_matches(['.', ',', ';', ':']).to_string(),
        })
        .collect()
}

/// Extract legacy numeric citations.
///
/// A match is rejected when the closing bracket is immediately followed by
/// `(`: that bracketed number is hyperlink title text, not a citation.
/// Numbers too large for `u32` cannot reference any registry entry and are
/// ignored.
pub fn extract_numeric(content: &str) -> BTreeSet<u32> {
    let bytes = content.as_bytes();
    NUMERIC_RE
        .captures_iter(content)
        .filter(|caps| {
            let end = caps.get(0).map_or(0, |m| m.end());
            bytes.get(end) != Some(&b'(')
        })
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .collect()
}

/// First `max_chars` characters of a URL, for readable findings.
pub fn truncate_for_display(url: &str, max_chars: usize) -> String {
    url.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hyperlink_basic() {
        let got = extract_hyperlinks("See [Acme](https://acme.com/report) for details.");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "Acme");
        assert_eq!(got[0].url, "https://acme.com/report");
    }

    #[test]
    fn hyperlink_trailing_punctuation_stripped() {
        let got = extract_hyperlinks("Cited here: [A](https://a.com/x.,;:)");
        assert_eq!(got[0].url, "https://a.com/x");
    }

    #[test]
    fn hyperlink_trailing_slash_normalized_for_lookup_only() {
        let got = extract_hyperlinks("[A](https://a.com/x/)");
        assert_eq!(got[0].url, "https://a.com/x/");
        assert_eq!(got[0].normalized_url(), "https://a.com/x");
    }

    #[test]
    fn numeric_basic() {
        let got = extract_numeric("Revenue rose [1]. Profit fell [5].");
        assert_eq!(got, BTreeSet::from([1, 5]));
    }

    #[test]
    fn numeric_not_confused_with_hyperlink_title() {
        // [1](url) is a hyperlink whose title happens to be "1".
        let extracted = extract("Claim [1](https://a.com) and claim [2].");
        assert_eq!(extracted.hyperlinks.len(), 1);
        assert_eq!(extracted.numeric, BTreeSet::from([2]));
    }

    #[test]
    fn numeric_overflow_ignored() {
        let got = extract_numeric("Nonsense [99999999999999999999] and real [3].");
        assert_eq!(got, BTreeSet::from([3]));
    }

    #[test]
    fn non_http_links_ignored() {
        let got = extract_hyperlinks("[file](ftp://example.com/a) [ok](http://example.com)");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].url, "http://example.com");
    }

    #[test]
    fn no_citations() {
        let extracted = extract("A short note with no references.");
        assert!(!extracted.has_any());
    }
}
