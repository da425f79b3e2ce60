//! Project descriptor — the user-supplied (or hotspot-derived) definition of a
//! launch. Immutable once a generation run starts; a new run builds a new one.

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Maximum characters carried from a hotspot topic into the project name.
pub const HOTSPOT_NAME_LEN: usize = 8;

/// Ticker assigned to every hotspot-derived project.
pub const HOTSPOT_TICKER: &str = "HOT";

/// Definition of one meme token project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub name: String,
    pub ticker: String,
    pub concept: String,
    pub target_audience: String,
    pub chain: String,
}

impl ProjectDescriptor {
    pub fn new(
        name: impl Into<String>,
        ticker: impl Into<String>,
        concept: impl Into<String>,
        target_audience: impl Into<String>,
        chain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            concept: concept.into(),
            target_audience: target_audience.into(),
            chain: chain.into(),
        }
    }

    /// Derive a descriptor from a trending-topic string.
    ///
    /// The name keeps the first [`HOTSPOT_NAME_LEN`] characters of the topic
    /// (topics are frequently CJK, so truncation is by `char`, never by byte),
    /// the ticker is fixed, and the concept embeds the full topic verbatim.
    pub fn from_hotspot(topic: &str) -> Self {
        let name: String = topic.chars().take(HOTSPOT_NAME_LEN).collect();
        Self {
            name,
            ticker: HOTSPOT_TICKER.into(),
            concept: format!(
                "A meme project built around the trending topic \"{topic}\", \
                 chasing viral spread and cultural resonance."
            ),
            target_audience: "Social media users & Web3 players".into(),
            chain: "Solana".into(),
        }
    }

    /// Required fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.ticker.trim().is_empty() {
            missing.push("ticker");
        }
        if self.concept.trim().is_empty() {
            missing.push("concept");
        }
        missing
    }

    /// Check that `name`, `ticker`, and `concept` are all present.
    ///
    /// `target_audience` and `chain` carry defaults and are never required.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::Validation(format!(
                "missing required project fields: {}",
                missing.join(", ")
            )))
        }
    }
}

impl Default for ProjectDescriptor {
    /// Blank form with the defaults the entry flow pre-fills.
    fn default() -> Self {
        Self {
            name: String::new(),
            ticker: String::new(),
            concept: String::new(),
            target_audience: "DeGen Community".into(),
            chain: "Solana".into(),
        }
    }
}
