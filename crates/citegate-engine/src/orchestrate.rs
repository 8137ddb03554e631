//! Validation orchestration.
//!
//! Runs the checkers in a fixed order — existence, format, completeness,
//! accessibility — and aggregates their findings into one
//! `CitationValidationResult`. Stages are isolated: a stage that degrades or
//! fails becomes a warning and never aborts the remaining stages. The caller
//! always gets a well-formed result; the only errors that escape are
//! capability configuration defects.

use std::sync::Arc;

use tracing::{debug, warn};

use citegate_core::config::ValidationConfig;
use citegate_core::existence::check_existence;
use citegate_core::format::check_format;
use citegate_core::registry::SourceRegistry;
use citegate_core::result::CitationValidationResult;
use citegate_core::{CitegateError, CitegateResult};

use crate::accessibility::check_accessibility;
use crate::capability::{TextCompletion, UrlProber};
use crate::completeness::check_completeness;
use crate::probe::HttpProber;

/// Per-call validation options.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Network reachability checks are the slowest stage and opt-in.
    pub check_url_accessibility: bool,
    /// Model-driven uncited-claim detection; advisory.
    pub check_completeness: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            check_url_accessibility: false,
            check_completeness: true,
        }
    }
}

/// The validation engine's public surface.
///
/// Construction wires the capabilities; `validate` and the re-exported
/// `build_fix_prompt` are the entire API callers need.
pub struct Validator {
    config: ValidationConfig,
    prober: Arc<dyn UrlProber>,
    completion: Option<Arc<dyn TextCompletion>>,
}

impl Validator {
    /// Build a validator with the default reqwest-backed prober and no
    /// text-completion capability wired yet.
    pub fn new(config: ValidationConfig) -> CitegateResult<Self> {
        config.validate()?;
        let prober = Arc::new(HttpProber::new(&config.probe)?);
        Ok(Self {
            config,
            prober,
            completion: None,
        })
    }

    /// Wire the text-completion capability used by the completeness check.
    pub fn with_completion(mut self, completion: Arc<dyn TextCompletion>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Substitute the URL probe capability (tests, custom transports).
    pub fn with_prober(mut self, prober: Arc<dyn UrlProber>) -> Self {
        self.prober = prober;
        self
    }

    /// Run all enabled validations over `content` and aggregate the outcome.
    ///
    /// A missing registry is synthesized empty and recorded as a warning;
    /// it is a degraded input, never an error. The registry is mutated only
    /// in the `status` fields of its sources, and only when the
    /// accessibility stage runs.
    ///
    /// Errors only when an enabled stage has no capability wired, which is a
    /// setup defect rather than a per-document data issue.
    pub async fn validate(
        &self,
        content: &str,
        registry: Option<&mut SourceRegistry>,
        options: &ValidateOptions,
    ) -> CitegateResult<CitationValidationResult> {
        if options.check_completeness && self.completion.is_none() {
            return Err(CitegateError::capability(
                "completeness check enabled but no text-completion capability wired",
            ));
        }

        let mut result = CitationValidationResult::new();

        let mut synthesized;
        let registry = match registry {
            Some(reg) => reg,
            None => {
                result
                    .warnings
                    .push("No source registry provided - limited validation possible".to_string());
                synthesized = SourceRegistry::new();
                &mut synthesized
            }
        };

        // 1. Source existence. Fail-open on an empty registry: the checker
        // reports that as a warning, not an error.
        let existence = check_existence(content, registry);
        result.source_existence_errors = existence.errors;
        result.warnings.extend(existence.warnings);

        // 2. Format consistency.
        let format = check_format(content);
        result.format_errors = format.errors;
        result.warnings.extend(format.warnings);

        // 3. Completeness (advisory, model-driven).
        if options.check_completeness {
            if let Some(completion) = &self.completion {
                let outcome =
                    check_completeness(content, completion.as_ref(), &self.config.completeness)
                        .await;
                result.completeness_errors = outcome.findings;
                debug!(severity = outcome.severity.as_str(), "completeness check done");
            }
        }

        // 4. URL accessibility (advisory, slow, opt-in).
        if options.check_url_accessibility {
            let accessibility = check_accessibility(
                registry,
                Arc::clone(&self.prober),
                self.config.probe.timeout,
                self.config.probe.max_concurrent,
            )
            .await;
            result.url_accessibility_errors = accessibility.errors;
            result.warnings.extend(accessibility.warnings);
        }

        result.recompute_validity();
        if !result.is_valid {
            warn!(
                existence_errors = result.source_existence_errors.len(),
                format_errors = result.format_errors.len(),
                "citation validation failed"
            );
        }
        Ok(result)
    }
}
