//! citegate-core
//!
//! Core primitives for citation validation of machine-generated research
//! reports:
//! - source registry with dual id/URL indices and citation numbering
//! - citation extraction (markdown hyperlinks and legacy numeric citations)
//! - format consistency checking against the Sources section
//! - source existence checking with prefix-tolerant URL matching
//! - remediation (fix) prompt assembly
//!
//! Everything in this crate is pure and synchronous: no network, no model
//! calls, no environment reads. The async checkers (URL accessibility,
//! completeness) and the orchestrator live in `citegate-engine`.

pub mod config;
pub mod errors;
pub mod existence;
pub mod extract;
pub mod fix_prompt;
pub mod format;
pub mod registry;
pub mod result;

pub use crate::errors::{CitegateError, CitegateResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{CompletenessConfig, ProbeConfig, ValidationConfig};
    pub use crate::existence::check_existence;
    pub use crate::extract::{extract, ExtractedCitations, HyperlinkCitation};
    pub use crate::fix_prompt::build_fix_prompt;
    pub use crate::format::check_format;
    pub use crate::registry::{normalize_url, Source, SourceRegistry, SourceStatus};
    pub use crate::result::{CitationValidationResult, Findings, Severity};
    pub use crate::{CitegateError, CitegateResult};
}
