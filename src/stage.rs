//! Workflow stage machine — explicit stages and legal transition guards.
//!
//! Gives the session a typed stage model so that:
//! 1. Every stage change is auditable and logged.
//! 2. Skipped or backward transitions are rejected (via `advance()` guards).
//!
//! The controller calls `advance()` after each successful gateway call. Each
//! call validates the transition is legal and records it in the transition log.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// The linear generation workflow stages.
///
/// Invariant: the brand kit is non-null at every stage except `Init`, and the
/// content package only at `Content` and `Distribution`. Exactly one stage is
/// current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStage {
    /// Collecting the project definition; nothing generated yet.
    Init,
    /// Brand identity generated.
    Branding,
    /// Logo and banner merged into the brand kit.
    Visuals,
    /// Marketing content package generated.
    Content,
    /// Everything generated; distribution assets unlocked.
    Distribution,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "INIT"),
            Self::Branding => write!(f, "BRANDING"),
            Self::Visuals => write!(f, "VISUALS"),
            Self::Content => write!(f, "CONTENT"),
            Self::Distribution => write!(f, "DISTRIBUTION"),
        }
    }
}

/// Legal transitions between workflow stages.
///
/// ```text
/// Init → Branding
/// Branding → Visuals | Content
/// Visuals → Content
/// Content → Distribution
/// any → Init                    (full reset)
/// stage → same stage            (regeneration at the current stage)
/// ```
///
/// Content can be entered straight from `Branding`: the marketing call only
/// requires a brand kit, not the visual assets.
fn is_legal_transition(from: WorkflowStage, to: WorkflowStage) -> bool {
    use WorkflowStage::*;

    // Reset is always legal, and regenerating at the current stage keeps it.
    if to == Init || from == to {
        return true;
    }

    matches!(
        (from, to),
        (Init, Branding)
            | (Branding, Visuals)
            | (Branding, Content)
            | (Visuals, Content)
            | (Content, Distribution)
    )
}

/// A single recorded stage transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: WorkflowStage,
    pub to: WorkflowStage,
    /// Milliseconds since the tracker was created.
    pub elapsed_ms: u64,
    /// Optional context about why this transition happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Error returned when an illegal transition is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalTransition {
    pub from: WorkflowStage,
    pub to: WorkflowStage,
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal stage transition: {} → {}", self.from, self.to)
    }
}

impl std::error::Error for IllegalTransition {}

/// Tracks the current stage, enforces legal transitions, and keeps a log of
/// all transitions for diagnostics.
#[derive(Debug)]
pub struct StageTracker {
    current: WorkflowStage,
    created_at: Instant,
    transitions: Vec<TransitionRecord>,
}

impl StageTracker {
    /// Create a new tracker starting at `Init`.
    pub fn new() -> Self {
        Self {
            current: WorkflowStage::Init,
            created_at: Instant::now(),
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> WorkflowStage {
        self.current
    }

    /// Attempt to advance to the given stage.
    pub fn advance(
        &mut self,
        to: WorkflowStage,
        reason: Option<&str>,
    ) -> Result<(), IllegalTransition> {
        if !is_legal_transition(self.current, to) {
            return Err(IllegalTransition {
                from: self.current,
                to,
            });
        }

        let record = TransitionRecord {
            from: self.current,
            to,
            elapsed_ms: self.created_at.elapsed().as_millis() as u64,
            reason: reason.map(String::from),
        };

        tracing::debug!(from = %self.current, to = %to, "Stage transition");

        self.transitions.push(record);
        self.current = to;
        Ok(())
    }

    /// Return to `Init`. Always legal.
    pub fn reset(&mut self, reason: &str) {
        // `to == Init` is unconditionally legal, so the guard cannot fire.
        let _ = self.advance(WorkflowStage::Init, Some(reason));
    }

    /// The full transition log.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
