//! reqwest-backed URL prober.

use std::time::Duration;

use async_trait::async_trait;

use citegate_core::config::ProbeConfig;
use citegate_core::{CitegateError, CitegateResult};

use crate::capability::{ProbeOutcome, UrlProber};

/// Default prober: one shared `reqwest::Client`, HEAD requests, redirects
/// followed, TLS certificate validation disabled.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build the prober. Fails only on client construction, which is a setup
    /// defect and must surface.
    pub fn new(config: &ProbeConfig) -> CitegateResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| CitegateError::probe(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProber for HttpProber {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome {
        let response = self.client.head(url).timeout(timeout).send().await;
        match response {
            Ok(resp) => ProbeOutcome::Status(resp.status().as_u16()),
            Err(e) if e.is_timeout() => ProbeOutcome::Timeout,
            Err(e) => ProbeOutcome::Failed(classify(&e)),
        }
    }
}

/// Short error-category label for a failed probe, used in findings.
fn classify(e: &reqwest::Error) -> String {
    if e.is_connect() {
        "connect".to_string()
    } else if e.is_redirect() {
        "redirect".to_string()
    } else if e.is_builder() || e.is_request() {
        "request".to_string()
    } else {
        "other".to_string()
    }
}
