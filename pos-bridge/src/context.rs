//! Bridge context — the dependency graph, resolved once
//!
//! All cross-component references are built before first use and never
//! mutated afterwards; the optional POS capabilities are `Option` fields
//! rather than nullables checked ad hoc at call sites.

use std::sync::Arc;

use platform_client::PlatformGateway;

use crate::adapter::{PosAdapter, ReservationCapability, RewardCapability};
use crate::config::CaptureMode;

#[derive(Clone)]
pub struct BridgeContext {
    pub adapter: Arc<dyn PosAdapter>,
    pub gateway: Arc<dyn PlatformGateway>,
    pub mode: CaptureMode,
    pub venue: String,
    pub reservations: Option<Arc<dyn ReservationCapability>>,
    pub rewards: Option<Arc<dyn RewardCapability>>,
}

impl BridgeContext {
    pub fn new(
        adapter: Arc<dyn PosAdapter>,
        gateway: Arc<dyn PlatformGateway>,
        mode: CaptureMode,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            adapter,
            gateway,
            mode,
            venue: venue.into(),
            reservations: None,
            rewards: None,
        }
    }

    pub fn with_reservations(mut self, capability: Arc<dyn ReservationCapability>) -> Self {
        self.reservations = Some(capability);
        self
    }

    pub fn with_rewards(mut self, capability: Arc<dyn RewardCapability>) -> Self {
        self.rewards = Some(capability);
        self
    }
}
