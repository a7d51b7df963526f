//! Domain models
//!
//! Entities shared between the POS side and the ordering platform. The
//! platform owns every `version` token and the canonical post-update
//! representation; the POS owns the mapping from platform ids to
//! POS-local refs.

pub mod booking;
pub mod checkin;
pub mod consumer;
pub mod member;
pub mod order;
pub mod table;
pub mod transaction;

pub use booking::Booking;
pub use checkin::{Checkin, CheckinCreate};
pub use consumer::Consumer;
pub use member::{Member, Reward};
pub use order::{Adjustment, AdjustmentKind, FulfilmentType, Order, OrderItem, OrderStatus};
pub use table::Table;
pub use transaction::{Transaction, TransactionStatus};
