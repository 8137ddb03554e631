//! Source existence check: every citation must point at a registered source.
//!
//! This check is read-only with respect to the registry and accumulates one
//! finding per offending citation rather than stopping at the first failure.

use crate::extract::{self, truncate_for_display};
use crate::registry::SourceRegistry;
use crate::result::Findings;

/// Cross-reference every citation in `content` against the registry.
///
/// An empty registry is a legitimate degraded input: existence cannot be
/// meaningfully checked, so the check passes with a single warning rather
/// than blocking the draft (fail-open).
pub fn check_existence(content: &str, registry: &SourceRegistry) -> Findings {
    if registry.is_empty() {
        return Findings::pass().with_warning("No sources registered for validation");
    }

    let extracted = extract::extract(content);
    let mut errors = Vec::new();

    for citation in &extracted.hyperlinks {
        let normalized = citation.normalized_url();
        if registry.contains_url(normalized) {
            continue;
        }
        // Prefix-tolerant fallback: the cited URL may be truncated or carry
        // query-string drift relative to the registered one.
        let partial_match = registry
            .urls()
            .any(|registered| registered.starts_with(normalized) || normalized.starts_with(registered));
        if !partial_match {
            errors.push(format!(
                "Hyperlink URL not found in research data: [{}]({}...)",
                citation.title,
                truncate_for_display(&citation.url, 60)
            ));
        }
    }

    let max_registered = registry.len();
    for &num in &extracted.numeric {
        match registry.citation_map() {
            Some(map) => {
                if !map.contains_key(&num) {
                    errors.push(format!("Citation [{num}] references non-existent source"));
                }
            }
            None => {
                if num as usize > max_registered {
                    errors.push(format!(
                        "Citation [{num}] exceeds registered sources ({max_registered})"
                    ));
                }
            }
        }
    }

    Findings::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry_with(urls: &[(&str, &str)]) -> SourceRegistry {
        let mut reg = SourceRegistry::new();
        for (title, url) in urls {
            reg.register(*title, url);
        }
        reg
    }

    #[test]
    fn empty_registry_fails_open() {
        let reg = SourceRegistry::new();
        let findings = check_existence("See [Acme](https://acme.com).", &reg);
        assert!(findings.ok);
        assert!(findings.errors.is_empty());
        assert_eq!(
            findings.warnings,
            vec!["No sources registered for validation".to_string()]
        );
    }

    #[test]
    fn exact_match_passes() {
        let reg = registry_with(&[("Acme", "https://acme.com/report")]);
        let findings = check_existence("See [Acme](https://acme.com/report/).", &reg);
        assert!(findings.ok);
        assert!(findings.errors.is_empty());
    }

    #[test]
    fn prefix_match_both_directions() {
        let reg = registry_with(&[("Acme", "https://acme.com/report")]);
        // Cited URL extends the registered one.
        let longer = check_existence("[Acme](https://acme.com/report?utm=1)", &reg);
        assert!(longer.ok);
        // Cited URL is a truncation of the registered one.
        let shorter = check_existence("[Acme](https://acme.com/rep)", &reg);
        assert!(shorter.ok);
    }

    #[test]
    fn unknown_url_reports_one_error_per_citation() {
        let reg = registry_with(&[("Acme", "https://acme.com/report")]);
        let content = "See [Other](https://other.example.net/a) and [More](https://more.example.net/b).";
        let findings = check_existence(content, &reg);
        assert!(!findings.ok);
        assert_eq!(findings.errors.len(), 2);
        assert!(findings.errors[0]
            .starts_with("Hyperlink URL not found in research data: [Other](https://other.example.net/a"));
    }

    #[test]
    fn long_url_truncated_in_finding() {
        let reg = registry_with(&[("Acme", "https://acme.com/report")]);
        let long_url = format!("https://elsewhere.example.com/{}", "x".repeat(100));
        let findings = check_existence(&format!("[Long]({long_url})"), &reg);
        assert_eq!(findings.errors.len(), 1);
        // 60 chars of URL plus the ellipsis marker.
        assert!(findings.errors[0].contains(&format!("({}...)", truncate_for_display(&long_url, 60))));
    }

    #[test]
    fn numeric_checked_against_citation_map_when_present() {
        let mut reg = registry_with(&[("A", "https://a.com"), ("B", "https://b.com")]);
        reg.assign_citation_numbers();
        let findings = check_existence("Revenue rose [1]. Profit fell [5].", &reg);
        assert!(!findings.ok);
        assert_eq!(
            findings.errors,
            vec!["Citation [5] references non-existent source".to_string()]
        );
    }

    #[test]
    fn numeric_checked_against_cardinality_without_map() {
        let reg = registry_with(&[("A", "https://a.com"), ("B", "https://b.com")]);
        let findings = check_existence("Both [1] and [2] hold, but [3] does not.", &reg);
        assert_eq!(
            findings.errors,
            vec!["Citation [3] exceeds registered sources (2)".to_string()]
        );
    }

    #[test]
    fn full_range_round_trip() {
        let mut reg = registry_with(&[
            ("A", "https://a.com"),
            ("B", "https://b.com"),
            ("C", "https://c.com"),
        ]);
        reg.assign_citation_numbers();

        let all_cited = check_existence("[1] then [2] then [3].", &reg);
        assert!(all_cited.ok);

        let overflow = check_existence("[1] then [4].", &reg);
        assert!(!overflow.ok);
        assert_eq!(overflow.errors.len(), 1);
    }

    #[test]
    fn no_citations_passes() {
        let reg = registry_with(&[("A", "https://a.com")]);
        let findings = check_existence("Nothing is cited here.", &reg);
        assert!(findings.ok);
        assert!(findings.errors.is_empty());
    }
}
