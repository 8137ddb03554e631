//! Completeness check: advisory, model-driven detection of uncited claims.
//!
//! The external classifier is itself a model and can hallucinate findings,
//! so nothing here can fail validation: every failure path (call error,
//! malformed response, unparseable JSON) degrades to a warning finding with
//! `ok = true`.

use serde::Deserialize;
use tracing::warn;

use citegate_core::config::CompletenessConfig;
use citegate_core::result::Severity;

use crate::capability::TextCompletion;

/// Outcome of the completeness check. `findings` holds the uncited claims
/// (or a single degradation warning); advisory either way.
#[derive(Debug, Clone, Default)]
pub struct CompletenessOutcome {
    pub ok: bool,
    pub findings: Vec<String>,
    pub severity: Severity,
}

/// JSON shape the classifier is instructed to return.
#[derive(Debug, Deserialize)]
struct ClaimReport {
    #[serde(default)]
    uncited_claims: Vec<String>,
    #[serde(default)]
    severity: Severity,
}

/// Ask the text-completion capability to flag uncited factual claims.
pub async fn check_completeness(
    content: &str,
    completion: &dyn TextCompletion,
    config: &CompletenessConfig,
) -> CompletenessOutcome {
    let truncated = truncate_chars(content, config.max_content_chars);
    let prompt = completeness_prompt(truncated);

    let response = match completion
        .complete(&prompt, &config.model, config.max_tokens)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "citation completeness validation failed");
            return degraded(format!("Warning: Could not validate completeness: {e}"));
        }
    };

    let json_text = extract_json_block(&response);
    let report: ClaimReport = match serde_json::from_str(json_text.trim()) {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, "completeness classifier returned unparseable JSON");
            return degraded(format!("Warning: Could not validate completeness: {e}"));
        }
    };

    CompletenessOutcome {
        ok: report.uncited_claims.is_empty(),
        findings: report.uncited_claims,
        severity: report.severity,
    }
}

fn degraded(finding: String) -> CompletenessOutcome {
    CompletenessOutcome {
        ok: true,
        findings: vec![finding],
        severity: Severity::None,
    }
}

/// Truncate on a character boundary to bound external-call cost.
fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// The classifier may wrap its JSON in a fenced code block; unwrap it.
fn extract_json_block(response: &str) -> &str {
    if let Some((_, rest)) = response.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = response.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        response
    }
}

fn completeness_prompt(content: &str) -> String {
    format!(
        "Analyze this research report for uncited factual claims.\n\
         \n\
         Report:\n\
         {content}\n\
         \n\
         Instructions:\n\
         1. Identify specific factual claims (statistics, dates, quotes, financial figures, specific events)\n\
         2. Check if each claim has a citation - either a markdown hyperlink [Title](URL) or legacy [X] format nearby\n\
         3. Return ONLY claims that clearly lack citations and would benefit from one\n\
         \n\
         Output format (JSON):\n\
         {{\n\
         \x20   \"uncited_claims\": [\n\
         \x20       \"Specific claim text without citation\",\n\
         \x20       ...\n\
         \x20   ],\n\
         \x20   \"severity\": \"high\" | \"medium\" | \"low\" | \"none\"\n\
         }}\n\
         \n\
         If all important factual claims are cited, return: {{\"uncited_claims\": [], \"severity\": \"none\"}}\n\
         Only report significant uncited claims, not general statements or opinions.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use citegate_core::{CitegateError, CitegateResult};

    /// Stub completion returning a canned response (or a scripted failure).
    struct CannedCompletion {
        response: Result<String, String>,
    }

    impl CannedCompletion {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                response: Err(msg.to_string()),
            }
        }
    }

    #[async_trait]
    impl TextCompletion for CannedCompletion {
        async fn complete(
            &self,
            _prompt: &str,
            _model: &str,
            _max_tokens: u32,
        ) -> CitegateResult<String> {
            self.response
                .clone()
                .map_err(CitegateError::completion)
        }
    }

    fn config() -> CompletenessConfig {
        CompletenessConfig::default()
    }

    #[tokio::test]
    async fn clean_report_passes() {
        let stub = CannedCompletion::ok(r#"{"uncited_claims": [], "severity": "none"}"#);
        let outcome = check_completeness("All cited.", &stub, &config()).await;
        assert!(outcome.ok);
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.severity, Severity::None);
    }

    #[tokio::test]
    async fn uncited_claims_surface_as_findings() {
        let stub = CannedCompletion::ok(
            r#"{"uncited_claims": ["Revenue rose 40% in 2024"], "severity": "high"}"#,
        );
        let outcome = check_completeness("Revenue rose 40% in 2024.", &stub, &config()).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.findings, vec!["Revenue rose 40% in 2024".to_string()]);
        assert_eq!(outcome.severity, Severity::High);
    }

    #[tokio::test]
    async fn fenced_json_block_unwrapped() {
        let stub = CannedCompletion::ok(
            "Here is my analysis:\n```json\n{\"uncited_claims\": [\"claim\"], \"severity\": \"low\"}\n```\nDone.",
        );
        let outcome = check_completeness("text", &stub, &config()).await;
        assert_eq!(outcome.findings, vec!["claim".to_string()]);
        assert_eq!(outcome.severity, Severity::Low);
    }

    #[tokio::test]
    async fn bare_fence_unwrapped() {
        let stub =
            CannedCompletion::ok("```\n{\"uncited_claims\": [], \"severity\": \"none\"}\n```");
        let outcome = check_completeness("text", &stub, &config()).await;
        assert!(outcome.ok);
        assert!(outcome.findings.is_empty());
    }

    #[tokio::test]
    async fn garbage_response_fails_open() {
        let stub = CannedCompletion::ok("I could not find any JSON to give you, sorry.");
        let outcome = check_completeness("text", &stub, &config()).await;
        assert!(outcome.ok);
        assert_eq!(outcome.findings.len(), 1);
        assert!(outcome.findings[0].starts_with("Warning: Could not validate completeness:"));
    }

    #[tokio::test]
    async fn call_failure_fails_open() {
        let stub = CannedCompletion::failing("backend unavailable");
        let outcome = check_completeness("text", &stub, &config()).await;
        assert!(outcome.ok);
        assert!(outcome.findings[0].contains("backend unavailable"));
    }

    #[tokio::test]
    async fn content_truncated_before_sending() {
        struct PromptLength(std::sync::Mutex<usize>);

        #[async_trait]
        impl TextCompletion for PromptLength {
            async fn complete(
                &self,
                prompt: &str,
                _model: &str,
                _max_tokens: u32,
            ) -> CitegateResult<String> {
                *self.0.lock().unwrap() = prompt.chars().count();
                Ok(r#"{"uncited_claims": [], "severity": "none"}"#.to_string())
            }
        }

        let stub = PromptLength(std::sync::Mutex::new(0));
        let long_content = "x".repeat(40_000);
        let outcome = check_completeness(&long_content, &stub, &config()).await;
        assert!(outcome.ok);

        let sent = *stub.0.lock().unwrap();
        // Prompt is the 15k-char truncation plus the instruction scaffold.
        assert!(sent < 17_000, "prompt was {sent} chars");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "αβγδε";
        assert_eq!(truncate_chars(s, 3), "αβγ");
        assert_eq!(truncate_chars(s, 10), s);
    }
}
