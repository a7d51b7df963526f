//! Shared types for the POS ↔ ordering-platform bridge
//!
//! Domain models, the realtime wire protocol, and utility types used by
//! both the platform client and the reconciliation engine.

pub mod event;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Event re-exports (for convenient access)
pub use event::{PlatformEvent, RealtimeSignal};
