//! External capability contracts.
//!
//! The engine never binds a concrete network or model client into a checker.
//! These traits define the deterministic contract; the host wires real
//! implementations (a reqwest-backed prober ships in `crate::probe`) and
//! tests substitute scripted stubs.

use std::time::Duration;

use async_trait::async_trait;

use citegate_core::CitegateResult;

/// Classified outcome of one URL reachability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The request completed with this HTTP status.
    Status(u16),
    /// The probe exceeded its timeout. Terminal; no automatic retry.
    Timeout,
    /// Any other failure, carrying a short error-category label.
    Failed(String),
}

/// Lightweight URL existence probe: HEAD-style request, redirects followed,
/// certificate validation relaxed to tolerate research-grade sources.
#[async_trait]
pub trait UrlProber: Send + Sync {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome;
}

/// Text-completion capability: given a prompt, a target model identifier and
/// a token budget, returns generated text.
///
/// An `Err` here means the capability itself is broken (setup defect); a
/// useless or malformed completion is an `Ok` whose content the caller must
/// tolerate.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str, model: &str, max_tokens: u32) -> CitegateResult<String>;
}
