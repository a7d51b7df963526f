//! Platform client — request/response gateway + realtime push channel
//!
//! Two channels to the ordering platform:
//! - [`gateway::PlatformGateway`]: typed request/response surface; every
//!   call returns the entity or a [`error::GatewayError`] carrying the
//!   HTTP-style status.
//! - [`channel::RealtimeChannel`]: one long-lived push connection per
//!   venue, with reconnect, keepalive and a staleness watchdog.

pub mod channel;
pub mod error;
pub mod gateway;
pub mod http;

pub use channel::{ChannelConfig, RealtimeChannel, VenueRegistry};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{OrderDecision, PlatformGateway};
pub use http::HttpGateway;
