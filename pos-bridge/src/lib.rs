//! pos-bridge — order/transaction reconciliation engine
//!
//! Keeps the POS and the remote ordering platform consistent under
//! asynchronous push, network loss, version conflicts and
//! partial-failure payment flows. The POS is the source of truth for
//! menu, pricing and order execution; the platform is the source of
//! truth for consumer-initiated ordering, payment claims, table/booking
//! allocation and loyalty redemption.
//!
//! # 架构
//!
//! ```text
//! RealtimeChannel ──signals──▶ BridgeWorker
//!                                 │ Connected ─▶ ResyncSupervisor
//!                                 │ Timeout ───▶ adapter.disassociate_all
//!                                 └ Event ────▶ Order / Transaction / Seating
//!                                                   │            │
//!                                              PosAdapter   PlatformGateway
//! ```
//!
//! Locally-initiated actions (accept/reject an order-ahead order,
//! allocate a table, redeem a reward) enter the same reconcilers
//! directly, serialized per order id through [`locks::OrderLocks`].

pub mod adapter;
pub mod config;
pub mod context;
pub mod error;
pub mod locks;
pub mod logger;
pub mod orders;
pub mod resync;
pub mod rewards;
pub mod seating;
pub mod transactions;
pub mod worker;

pub use adapter::{
    AvailabilityVerdict, PaymentCoverage, PaymentScope, PosAdapter, PosOrder,
    ReservationCapability, RewardCapability,
};
pub use config::{BridgeConfig, CaptureMode};
pub use context::BridgeContext;
pub use error::{AdapterError, BridgeError, BridgeResult};
pub use locks::OrderLocks;
pub use orders::OrderReconciler;
pub use resync::ResyncSupervisor;
pub use rewards::RewardCoordinator;
pub use seating::SeatingCoordinator;
pub use transactions::TransactionReconciler;
pub use worker::BridgeWorker;
