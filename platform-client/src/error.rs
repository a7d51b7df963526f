//! Gateway error types
//!
//! Every non-2xx platform response becomes a typed fault carrying the
//! numeric status. The reconciliation engine branches on the fault kind:
//! conflict means "refuse and re-fetch", not-found means "the referenced
//! entity is gone, cancel dependent local state", everything else is
//! log-and-abort for the enclosing operation.

use thiserror::Error;

/// Remote-call fault raised by the platform gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Referenced entity does not exist on the platform (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Version conflict — the update carried a stale concurrency token (409)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Payment precondition failed on the platform side (402)
    #[error("payment required: {0}")]
    PaymentRequired(String),

    /// Credentials rejected (401/403)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-2xx answer
    #[error("platform error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// Network-level failure before a status was observed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected entity shape
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The platform answered 2xx with an empty body where an entity was
    /// required
    #[error("empty response where an entity was required")]
    EmptyResponse,
}

impl GatewayError {
    /// Build a typed fault from an HTTP status and response body.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            402 => Self::PaymentRequired(message),
            401 | 403 => Self::Unauthorized(message),
            _ => Self::Server { status, message },
        }
    }

    /// The numeric status, when one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::PaymentRequired(_) => Some(402),
            Self::Unauthorized(_) => Some(401),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
