//! citegate-engine
//!
//! Async validation engine for citegate. Builds on `citegate-core`'s pure
//! checkers and adds the two suspending stages:
//! - URL accessibility probing (bounded concurrency, join-all barrier)
//! - completeness checking via an injected text-completion capability
//!
//! plus the `Validator` orchestrator that runs all stages in order and
//! aggregates one `CitationValidationResult`.

pub mod accessibility;
pub mod capability;
pub mod completeness;
pub mod orchestrate;
pub mod probe;

pub use crate::capability::{ProbeOutcome, TextCompletion, UrlProber};
pub use crate::orchestrate::{ValidateOptions, Validator};
pub use crate::probe::HttpProber;

// The remediation prompt builder is pure and lives in core, but it is part
// of this engine's public surface alongside `Validator::validate`.
pub use citegate_core::fix_prompt::build_fix_prompt;
pub use citegate_core::prelude::{
    CitationValidationResult, SourceRegistry, SourceStatus, ValidationConfig,
};
