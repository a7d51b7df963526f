//! Bridge error types
//!
//! Reconciliation either completes a state transition or leaves both
//! sides in their prior-known-good state. The tagged variants force
//! callers to handle each failure class instead of null-checking:
//! conflict ⇒ refuse and re-fetch, not-found ⇒ dependent local state is
//! cancelled, precondition ⇒ abort the enclosing operation, protocol ⇒
//! fatal for the current event.

use platform_client::GatewayError;
use thiserror::Error;

/// POS adapter failure. Adapters wrap whatever their storage raises.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AdapterError(pub String);

impl AdapterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Reconciliation failure classes
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A remote update carried a stale version — caller must re-fetch
    /// and retry; nothing was mutated on either side
    #[error("version conflict: {0}")]
    Conflict(String),

    /// A referenced entity is gone on the platform
    #[error("not found: {0}")]
    NotFound(String),

    /// A local precondition did not hold (missing POS order, null entity,
    /// seating-criteria mismatch)
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The platform sent something outside the agreed contract — fatal
    /// for the current event, never swallowed
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// POS adapter failure
    #[error("POS adapter: {0}")]
    Adapter(#[from] AdapterError),

    /// Any other remote-call fault (transport, 5xx, decode)
    #[error(transparent)]
    Gateway(GatewayError),
}

impl From<GatewayError> for BridgeError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Conflict(m) => Self::Conflict(m),
            GatewayError::NotFound(m) => Self::NotFound(m),
            other => Self::Gateway(other),
        }
    }
}

impl BridgeError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for reconciliation operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Result type for POS adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
