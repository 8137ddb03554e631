//! Validation outcome types.

use serde::{Deserialize, Serialize};

/// Outcome of one checker over one document.
///
/// Checkers accumulate findings instead of stopping at the first failure;
/// `ok` reflects the error list only, never the warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    /// A clean pass with no findings.
    pub fn pass() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Severity reported by the completeness classifier. Advisory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

/// Aggregated output of one validation pass over one document.
///
/// Invariant: after every orchestration run,
/// `is_valid == (source_existence_errors.is_empty() && format_errors.is_empty())`.
/// Completeness and accessibility findings are advisory and never flip the
/// flag; `recompute_validity` re-derives it, it is never cached stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationValidationResult {
    pub is_valid: bool,
    pub source_existence_errors: Vec<String>,
    pub format_errors: Vec<String>,
    pub completeness_errors: Vec<String>,
    pub url_accessibility_errors: Vec<String>,
    /// Messages about degraded validation: missing registry, a checker that
    /// itself failed, and similar.
    pub warnings: Vec<String>,
}

impl Default for CitationValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl CitationValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            source_existence_errors: Vec::new(),
            format_errors: Vec::new(),
            completeness_errors: Vec::new(),
            url_accessibility_errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Critical findings are the ones that gate release.
    pub fn has_critical_errors(&self) -> bool {
        !self.source_existence_errors.is_empty() || !self.format_errors.is_empty()
    }

    /// Re-derive `is_valid` from the critical error lists.
    pub fn recompute_validity(&mut self) {
        self.is_valid = !self.has_critical_errors();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_tracks_critical_errors_only() {
        let mut result = CitationValidationResult::new();
        result.completeness_errors.push("uncited claim".to_string());
        result.url_accessibility_errors.push("URL timeout".to_string());
        result.warnings.push("degraded".to_string());
        result.recompute_validity();
        assert!(result.is_valid);

        result.format_errors.push("missing Sources section".to_string());
        result.recompute_validity();
        assert!(!result.is_valid);
    }

    #[test]
    fn severity_roundtrip() {
        let s: Severity = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(s, Severity::High);
        assert_eq!(s.as_str(), "high");
        let none: Severity = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(none, Severity::None);
    }
}
