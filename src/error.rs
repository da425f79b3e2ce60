//! Error taxonomy for the generation workflow.
//!
//! Two layers:
//!
//! - [`GatewayError`] — everything that can go wrong at the provider boundary
//!   (transport, provider rejection, schema violation, missing image payload).
//! - [`WorkflowError`] — what controller operations return to the display
//!   layer. Gateway errors are caught at the controller boundary and surfaced
//!   as a single user-visible indicator; they never escape raw.

use thiserror::Error;

/// Failure at the provider boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Provider reachable but rejected the request or returned a non-success
    /// status.
    #[error("provider error: {0}")]
    Provider(String),

    /// Network / transport-level failure before a well-formed response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider responded, but the payload does not satisfy the declared
    /// structured schema.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// Image request succeeded at transport level but no content part carried
    /// inline image bytes.
    #[error("no image payload in provider response")]
    NoImageReturned,
}

impl GatewayError {
    /// Whether this is a protocol violation (response arrived, shape wrong)
    /// as opposed to a transport/provider failure.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation(_) | Self::NoImageReturned)
    }
}

/// Failure of a controller operation.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Required project fields missing — caught before any external call.
    /// Stage and busy flag untouched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation is already in flight for this session. The busy guard is
    /// authoritative: re-entrant calls are rejected, not queued.
    #[error("another generation is already in flight")]
    Busy,

    /// A gateway call failed. Stage unchanged; the user may retry.
    #[error("generation failed: {0}")]
    Generation(String),
}

impl WorkflowError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// The string stored on the session and shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<GatewayError> for WorkflowError {
    fn from(err: GatewayError) -> Self {
        Self::Generation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_violation_is_protocol_violation() {
        let err = GatewayError::SchemaViolation("missing field `tagline`".into());
        assert!(err.is_protocol_violation());
        assert!(GatewayError::NoImageReturned.is_protocol_violation());
        assert!(!GatewayError::Provider("503".into()).is_protocol_violation());
    }

    #[test]
    fn gateway_error_surfaces_as_generation() {
        let err: WorkflowError = GatewayError::NoImageReturned.into();
        assert!(matches!(err, WorkflowError::Generation(_)));
        assert!(err.user_message().contains("no image payload"));
    }

    #[test]
    fn classification_helpers() {
        assert!(WorkflowError::Validation("x".into()).is_validation());
        assert!(WorkflowError::Busy.is_busy());
        assert!(!WorkflowError::Busy.is_validation());
    }
}
