//! URL accessibility check.
//!
//! Probes every candidate source concurrently, bounded by a counting
//! admission gate, and waits for all probes before aggregating: partial
//! results are never reported as final.
//!
//! Candidates are deduplicated by source id before dispatch, so no two
//! in-flight probes ever target the same source. Status write-back happens in
//! the aggregation step after the join, which keeps the registry borrow out
//! of the spawned tasks entirely.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use citegate_core::extract::truncate_for_display;
use citegate_core::registry::{SourceRegistry, SourceStatus};
use citegate_core::result::Findings;

use crate::capability::{ProbeOutcome, UrlProber};

/// Probe every candidate source and record the observation on its `status`.
///
/// Candidate set: the sources referenced by the citation map when one is
/// present, otherwise every registered source. An empty candidate set
/// trivially passes.
pub async fn check_accessibility(
    registry: &mut SourceRegistry,
    prober: Arc<dyn UrlProber>,
    timeout: Duration,
    max_concurrent: usize,
) -> Findings {
    let candidates = candidate_sources(registry);
    if candidates.is_empty() {
        return Findings::pass();
    }

    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut probes = JoinSet::new();

    for (id, url) in &candidates {
        let id = id.clone();
        let url = url.clone();
        let prober = Arc::clone(&prober);
        let semaphore = Arc::clone(&semaphore);
        probes.spawn(async move {
            // The gate is never closed while probes are joining.
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (id, ProbeOutcome::Failed("gate closed".to_string())),
            };
            let outcome = prober.probe(&url, timeout).await;
            (id, outcome)
        });
    }

    // Join barrier: every probe runs to completion before aggregation.
    let mut outcomes: HashMap<String, ProbeOutcome> = HashMap::new();
    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok((id, outcome)) => {
                outcomes.insert(id, outcome);
            }
            Err(e) => warn!(error = %e, "accessibility probe task failed to join"),
        }
    }

    let mut errors = Vec::new();
    for (id, url) in &candidates {
        let Some(outcome) = outcomes.get(id) else {
            // A panicked probe task leaves its source unverified.
            continue;
        };
        let shown = truncate_for_display(url, 60);
        match outcome {
            ProbeOutcome::Status(code) if *code >= 400 => {
                registry.set_status(id, SourceStatus::Unreachable);
                errors.push(format!("URL returned {code}: {shown}..."));
            }
            ProbeOutcome::Status(_) => {
                registry.set_status(id, SourceStatus::Verified);
            }
            ProbeOutcome::Timeout => {
                registry.set_status(id, SourceStatus::Timeout);
                errors.push(format!("URL timeout: {shown}..."));
            }
            ProbeOutcome::Failed(kind) => {
                registry.set_status(id, SourceStatus::Unreachable);
                errors.push(format!("URL error ({kind}): {shown}..."));
            }
        }
    }

    debug!(
        probed = candidates.len(),
        unreachable = errors.len(),
        "accessibility check complete"
    );
    Findings::from_errors(errors)
}

/// `(id, url)` pairs to probe, deduplicated by id, in a stable order.
fn candidate_sources(registry: &SourceRegistry) -> Vec<(String, String)> {
    let mut seen = BTreeSet::new();
    let mut candidates = Vec::new();

    match registry.citation_map() {
        Some(map) => {
            for id in map.values() {
                if let Some(source) = registry.get(id) {
                    if seen.insert(source.id.clone()) {
                        candidates.push((source.id.clone(), source.url.clone()));
                    }
                }
            }
        }
        None => {
            for source in registry.sources() {
                if seen.insert(source.id.clone()) {
                    candidates.push((source.id.clone(), source.url.clone()));
                }
            }
        }
    }

    candidates
}
