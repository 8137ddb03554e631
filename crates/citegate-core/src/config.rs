//! Configuration structures for citegate.
//!
//! This module defines explicit configuration objects consumed by the
//! validation orchestrator and its checkers.
//!
//! The core crate itself does not read environment variables. All
//! configuration must be provided explicitly by the caller.

use std::time::Duration;

use crate::errors::{CitegateError, CitegateResult};

/// Global configuration container, consumed once per orchestration call.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub completeness: CompletenessConfig,
    pub probe: ProbeConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            completeness: CompletenessConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

impl ValidationConfig {
    /// Basic sanity validation of the configured limits.
    pub fn validate(&self) -> CitegateResult<()> {
        if self.completeness.model.trim().is_empty() {
            return Err(CitegateError::invalid_argument(
                "completeness.model must be non-empty",
            ));
        }
        if self.completeness.max_content_chars == 0 {
            return Err(CitegateError::invalid_argument(
                "completeness.max_content_chars must be > 0",
            ));
        }
        if self.probe.max_concurrent == 0 {
            return Err(CitegateError::invalid_argument(
                "probe.max_concurrent must be > 0",
            ));
        }
        if self.probe.timeout.is_zero() {
            return Err(CitegateError::invalid_argument(
                "probe.timeout must be > 0",
            ));
        }
        Ok(())
    }
}

/// Configuration for the completeness (uncited-claim) checker.
#[derive(Debug, Clone)]
pub struct CompletenessConfig {
    /// Model identifier handed to the text-completion capability.
    /// A lighter summarization-tier model is sufficient for classification.
    pub model: String,

    /// Token budget for the classification response.
    pub max_tokens: u32,

    /// Report content is truncated to this many characters before the
    /// external call, to bound cost and latency.
    pub max_content_chars: usize,
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-haiku-latest".to_string(),
            max_tokens: 2000,
            max_content_chars: 15_000,
        }
    }
}

/// Configuration for URL accessibility probing.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-probe timeout. A probe that exceeds it is terminal for its source.
    pub timeout: Duration,

    /// Maximum number of probes in flight at once.
    pub max_concurrent: usize,

    /// User-Agent header sent with each probe.
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_concurrent: 5,
            user_agent: "Mozilla/5.0 (compatible; ResearchBot/1.0)".to_string(),
        }
    }
}
