//! Realtime protocol types for platform → POS push delivery
//!
//! Platform → POS: entity push events, parsed from WebSocket frames.
//! Channel → engine: lifecycle signals the channel itself emits.

use serde::{Deserialize, Serialize};

use crate::models::{Booking, Checkin, Member, Order, Transaction};

/// Push event pushed by the ordering platform over the realtime channel.
///
/// One venue, one connection; events arrive and are handled one at a
/// time in arrival order. An unparseable frame is a protocol violation:
/// it is logged loudly and the event dropped, never silently absorbed
/// into a catch-all variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformEvent {
    OrderCreated { order: Order },
    OrderUpdated { order: Order },
    TransactionCreated { transaction: Transaction },
    TransactionUpdated { transaction: Transaction },
    TableAllocationChanged { checkin: Checkin },
    CheckinCreated { checkin: Checkin },
    Checkout { checkin_id: String },
    MemberCreated { member: Member },
    MemberUpdated { member: Member },
    BookingCreated { booking: Booking },
    BookingUpdated { booking: Booking },
    BookingDeleted { booking_id: String },
}

impl PlatformEvent {
    /// Event kind for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderCreated { .. } => "order_created",
            Self::OrderUpdated { .. } => "order_updated",
            Self::TransactionCreated { .. } => "transaction_created",
            Self::TransactionUpdated { .. } => "transaction_updated",
            Self::TableAllocationChanged { .. } => "table_allocation_changed",
            Self::CheckinCreated { .. } => "checkin_created",
            Self::Checkout { .. } => "checkout",
            Self::MemberCreated { .. } => "member_created",
            Self::MemberUpdated { .. } => "member_updated",
            Self::BookingCreated { .. } => "booking_created",
            Self::BookingUpdated { .. } => "booking_updated",
            Self::BookingDeleted { .. } => "booking_deleted",
        }
    }
}

/// Signal surfaced to the reconciliation engine by the realtime channel.
///
/// `Connected` fires after every successful (re)connect and must trigger
/// a full resync before the engine relies on live events again.
/// `Timeout` fires when the staleness watchdog crosses its threshold;
/// its only mandated consequence is to disassociate platform-pending
/// state on the POS so it can operate autonomously.
#[derive(Debug, Clone)]
pub enum RealtimeSignal {
    /// Connection (re)established; `epoch` tags the session in logs
    Connected { epoch: String },
    /// Connection lost; the channel reconnects on its own
    Disconnected,
    /// Staleness watchdog fired for the current connection
    Timeout,
    /// Parsed platform push event
    Event(PlatformEvent),
}
