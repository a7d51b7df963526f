//! POS adapter boundary
//!
//! The capability set the POS implements. The engine never touches POS
//! storage directly: the adapter is the only authority for "does this
//! order/transaction still exist on the POS" and owns the mapping from
//! platform ids to POS-local refs. Concurrent calls for the same POS
//! order id must not corrupt its records — that guarantee is the
//! adapter's, not the engine's.

use async_trait::async_trait;
use shared::models::{Checkin, Member, Order, Reward, Transaction};

use crate::config::CaptureMode;
use crate::error::AdapterResult;

/// POS-side view of an order the engine reconciles against.
#[derive(Debug, Clone)]
pub struct PosOrder {
    /// POS-local id, opaque to the platform
    pub pos_ref: String,
    /// Platform id once the order has round-tripped
    pub platform_id: Option<String>,
    /// Checkin currently associated with the order
    pub checkin_id: Option<String>,
    /// Whether a payment capture has already been recorded — replaying a
    /// ready-to-pay event for such an order is a no-op
    pub payment_captured: bool,
}

/// Payment state a new platform order is confirmed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentCoverage {
    /// Attached transactions cover the full total
    FullyPaid,
    /// Transactions attached but short of the total — the ready-to-pay
    /// round completes payment later
    AwaitingReadyToPay,
}

/// Scope of a payment capture at the ready-to-pay step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentScope {
    Full,
    /// Consumer pays part through the platform (`not_paying_total > 0`)
    Partial,
}

/// POS answer to an availability judgment.
#[derive(Debug, Clone)]
pub enum AvailabilityVerdict {
    /// POS takes the order; it may have rewritten items and pricing
    Approved { order: Order, pos_ref: String },
    Declined { reason: String },
}

/// Capability set the POS implements.
#[async_trait]
pub trait PosAdapter: Send + Sync {
    // === order state ===
    /// Retrieve a POS order by its POS-local id.
    async fn order_by_pos_ref(&self, pos_ref: &str) -> AdapterResult<Option<PosOrder>>;

    /// Retrieve the POS order linked to a platform order id, if any.
    async fn order_by_platform_id(&self, platform_id: &str) -> AdapterResult<Option<PosOrder>>;

    /// Version token last observed from the platform for this POS order.
    async fn recorded_version(&self, pos_ref: &str) -> AdapterResult<Option<String>>;

    async fn record_version(&self, pos_ref: &str, version: &str) -> AdapterResult<()>;

    /// Record (or clear, with `None`) the checkin associated with a POS
    /// order.
    async fn record_checkin(&self, pos_ref: &str, checkin_id: Option<&str>) -> AdapterResult<()>;

    // === order intake ===
    /// Judge product availability and pricing for a platform order that
    /// arrived without payment attached.
    async fn judge_availability(
        &self,
        order: &Order,
        mode: CaptureMode,
    ) -> AdapterResult<AvailabilityVerdict>;

    /// Confirm a new platform order that arrived with payment attached.
    /// Fulfilment type rides on the order itself. Returns the POS-local
    /// ref.
    async fn confirm_new_order(
        &self,
        order: &Order,
        coverage: PaymentCoverage,
    ) -> AdapterResult<String>;

    /// Notify the POS an order was rejected (consumer missing, declined
    /// availability, platform conflict).
    async fn reject_order(&self, order: &Order, reason: &str) -> AdapterResult<()>;

    /// Platform cancelled the order; no further platform calls follow.
    async fn order_cancelled(&self, platform_id: &str) -> AdapterResult<()>;

    // === pricing / payment ===
    /// The POS is the pricing source of truth: it may rewrite the order
    /// before payment.
    async fn reconcile_totals(&self, order: Order) -> AdapterResult<Order>;

    /// Record a payment capture for an order at the ready-to-pay step.
    async fn capture_payment(&self, order: &Order, scope: PaymentScope) -> AdapterResult<()>;

    /// Judge "ready to pay" for a platform-pushed pending transaction.
    /// `None` means no matching POS order — the claim must be rejected.
    async fn ready_to_pay(&self, transaction: &Transaction) -> AdapterResult<Option<Order>>;

    async fn record_transaction_version(
        &self,
        transaction_id: &str,
        version: &str,
    ) -> AdapterResult<()>;

    /// Record a successfully claimed payment.
    async fn record_payment(&self, transaction: &Transaction) -> AdapterResult<()>;

    /// Cancel a payment locally, releasing any held inventory/tender.
    async fn cancel_payment(&self, transaction: &Transaction) -> AdapterResult<()>;

    // === members / checkins ===
    async fn upsert_member(&self, member: &Member) -> AdapterResult<()>;

    async fn delete_member(&self, member_id: &str) -> AdapterResult<()>;

    /// Platform checkin ids the POS currently treats as active.
    async fn checked_in(&self) -> AdapterResult<Vec<String>>;

    /// Record a platform checkin (created or re-allocated).
    async fn record_platform_checkin(&self, checkin: &Checkin) -> AdapterResult<()>;

    async fn checkin_closed(&self, checkin_id: &str) -> AdapterResult<()>;

    // === lifecycle ===
    /// Connection timeout consequence: stop treating any order/checkin
    /// as platform-managed so the POS can operate autonomously.
    async fn disassociate_all(&self) -> AdapterResult<()>;
}

/// Optional reservation capability — a POS that cannot store bookings
/// simply does not provide this.
#[async_trait]
pub trait ReservationCapability: Send + Sync {
    async fn upsert_booking(&self, booking: &shared::models::Booking) -> AdapterResult<()>;

    async fn delete_booking(&self, booking_id: &str) -> AdapterResult<()>;

    /// Record the booking↔checkin link once seating is confirmed.
    async fn record_booking_checkin(
        &self,
        booking_id: &str,
        checkin_id: &str,
    ) -> AdapterResult<()>;
}

/// Optional loyalty capability.
#[async_trait]
pub trait RewardCapability: Send + Sync {
    /// Apply a confirmed redemption to the POS order.
    async fn apply_redemption(&self, pos_ref: &str, reward: &Reward) -> AdapterResult<()>;
}
