//! Citation format check: internal consistency between body citations and
//! the Sources section.
//!
//! Pure and synchronous; no registry and no network. Both citation styles may
//! coexist in one document, and their checks run independently.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{self, ExtractedCitations};
use crate::registry::normalize_url;
use crate::result::Findings;

/// Sources-section heading spellings, in priority order. The first marker
/// found splits the document at its first occurrence.
pub const SOURCES_MARKERS: [&str; 5] = [
    "### Sources",
    "## Sources",
    "# Sources",
    "**Sources**",
    "Sources:",
];

/// Keep at most this many missing entries in one finding; a longer list is
/// unreadable and reported elsewhere anyway.
const MAX_REPORTED_MISSING: usize = 5;

static SOURCE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+)\]").expect("source entry pattern"));

/// Split `content` into body and sources section.
///
/// When no marker is found the whole text is body and the sources section is
/// empty.
pub fn split_sources_section(content: &str) -> (&str, &str) {
    for marker in SOURCES_MARKERS {
        if let Some(idx) = content.find(marker) {
            return (&content[..idx], &content[idx + marker.len()..]);
        }
    }
    (content, "")
}

/// Check citation markup consistency for one document.
pub fn check_format(content: &str) -> Findings {
    let (body, sources_section) = split_sources_section(content);
    let body_citations = extract::extract(body);

    // Short reports legitimately carry no citations at all.
    if !body_citations.has_any() {
        return Findings::pass();
    }

    if sources_section.is_empty() {
        return Findings::from_errors(vec![
            "Citations found but no Sources section present".to_string(),
        ]);
    }

    let mut errors = Vec::new();
    check_hyperlink_consistency(&body_citations, sources_section, &mut errors);
    check_numeric_consistency(&body_citations, sources_section, &mut errors);
    Findings::from_errors(errors)
}

/// Every URL cited in the body must reappear among the links in the Sources
/// section, compared after trailing-slash normalization.
fn check_hyperlink_consistency(
    body_citations: &ExtractedCitations,
    sources_section: &str,
    errors: &mut Vec<String>,
) {
    if body_citations.hyperlinks.is_empty() {
        return;
    }

    let sources_urls: BTreeSet<String> = extract::extract_hyperlinks(sources_section)
        .iter()
        .map(|c| normalize_url(&c.url).to_string())
        .collect();

    let body_urls: BTreeSet<String> = body_citations
        .hyperlinks
        .iter()
        .map(|c| c.normalized_url().to_string())
        .collect();

    let missing = body_urls.difference(&sources_urls).count();
    if missing > 0 && missing <= MAX_REPORTED_MISSING {
        errors.push(format!(
            "URLs cited in body but not in Sources section: {missing} missing"
        ));
    }
}

/// Numeric citations must cover 1..=max without gaps and every cited number
/// must have a Sources entry line starting with `[N]`.
fn check_numeric_consistency(
    body_citations: &ExtractedCitations,
    sources_section: &str,
    errors: &mut Vec<String>,
) {
    let cited = &body_citations.numeric;
    if cited.is_empty() {
        return;
    }

    let defined: BTreeSet<u32> = sources_section
        .lines()
        .filter_map(|line| SOURCE_LINE_RE.captures(line.trim()))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .collect();

    if let Some(&max_citation) = cited.iter().next_back() {
        let missing: Vec<u32> = (1..=max_citation).filter(|n| !cited.contains(n)).collect();
        if !missing.is_empty() && missing.len() <= MAX_REPORTED_MISSING {
            errors.push(format!("Gap in citation sequence: missing {missing:?}"));
        }
    }

    let undefined: Vec<u32> = cited.iter().copied().filter(|n| !defined.contains(n)).collect();
    if !undefined.is_empty() {
        errors.push(format!(
            "Citations used but not defined in Sources: {undefined:?}"
        ));
    }
}
