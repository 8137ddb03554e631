//! Source registry: the session-scoped set of discovered sources.
//!
//! The registry keeps two structures in lockstep:
//! - `sources`: id -> Source
//! - `url_to_source_id`: normalized URL -> id
//!
//! Every mutation writes both or neither, so each registered source has
//! exactly one entry in each map. Insertion order is preserved separately
//! because citation numbering and the fix prompt both enumerate sources in
//! discovery order.
//!
//! Only the accessibility checker writes `status`; all other checkers treat
//! the registry as read-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a discovered source.
///
/// Transitions happen only via the accessibility checker; each probe
/// overwrites the field with the latest observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    #[default]
    Unverified,
    Verified,
    Unreachable,
    Timeout,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
            Self::Unreachable => "unreachable",
            Self::Timeout => "timeout",
        }
    }

    /// A terminal status is any state observed by a completed probe.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unverified)
    }
}

/// One discovered reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Stable identifier assigned at registration (`s1`, `s2`, ...).
    pub id: String,
    /// Normalized canonical address; unique per source.
    pub url: String,
    /// Display label.
    pub title: String,
    pub status: SourceStatus,
}

/// Strip exactly one trailing slash.
///
/// This is the canonical URL normalization applied at registration and to
/// every extracted hyperlink citation before lookup.
pub fn normalize_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Session-scoped collection of all discovered sources plus lookup indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRegistry {
    sources: BTreeMap<String, Source>,
    url_to_source_id: BTreeMap<String, String>,
    /// Maps the small integer used in legacy numeric citations to a source
    /// id. When absent, numeric citations are checked against the registry's
    /// cardinality only.
    citation_map: Option<BTreeMap<u32, String>>,
    /// Source ids in registration order.
    order: Vec<String>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a discovered source and return its id.
    ///
    /// The URL is normalized first; re-registering a known URL returns the
    /// existing id instead of creating a duplicate. Both indices are written
    /// as one atomic update.
    pub fn register(&mut self, title: impl Into<String>, url: &str) -> String {
        let normalized = normalize_url(url).to_string();
        if let Some(existing) = self.url_to_source_id.get(&normalized) {
            return existing.clone();
        }

        let id = format!("s{}", self.order.len() + 1);
        let source = Source {
            id: id.clone(),
            url: normalized.clone(),
            title: title.into(),
            status: SourceStatus::Unverified,
        };

        self.sources.insert(id.clone(), source);
        self.url_to_source_id.insert(normalized, id.clone());
        self.order.push(id.clone());
        id
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    /// Exact lookup by normalized URL.
    pub fn get_by_url(&self, url: &str) -> Option<&Source> {
        self.url_to_source_id
            .get(normalize_url(url))
            .and_then(|id| self.sources.get(id))
    }

    pub fn contains_url(&self, normalized_url: &str) -> bool {
        self.url_to_source_id.contains_key(normalized_url)
    }

    /// All registered normalized URLs, for prefix-tolerant matching.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.url_to_source_id.keys().map(String::as_str)
    }

    /// Sources in registration order.
    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.order.iter().filter_map(|id| self.sources.get(id))
    }

    pub fn citation_map(&self) -> Option<&BTreeMap<u32, String>> {
        self.citation_map.as_ref()
    }

    pub fn set_citation_map(&mut self, map: BTreeMap<u32, String>) {
        self.citation_map = Some(map);
    }

    /// Build the canonical numeric citation map: 1..=k over registration
    /// order. Returns the assigned map.
    pub fn assign_citation_numbers(&mut self) -> &BTreeMap<u32, String> {
        let map: BTreeMap<u32, String> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, id)| (i as u32 + 1, id.clone()))
            .collect();
        &*self.citation_map.insert(map)
    }

    /// Overwrite the status of one source. Used by the accessibility checker
    /// when recording a probe observation.
    pub fn set_status(&mut self, id: &str, status: SourceStatus) {
        if let Some(source) = self.sources.get_mut(id) {
            source.status = status;
        }
    }

    /// Render the enumerable citation list handed to the fix prompt.
    ///
    /// One `- [title](url)` line per source, in citation-number order when a
    /// citation map exists, otherwise in registration order.
    pub fn to_citation_list(&self) -> String {
        let mut lines = Vec::with_capacity(self.order.len());
        match &self.citation_map {
            Some(map) => {
                for (num, id) in map {
                    if let Some(s) = self.sources.get(id) {
                        lines.push(format!("[{}] - [{}]({})", num, s.title, s.url));
                    }
                }
            }
            None => {
                for s in self.sources() {
                    lines.push(format!("- [{}]({})", s.title, s.url));
                }
            }
        }
        lines.join("\n")
    }
}
