//! Platform gateway trait — the request/response surface of the
//! ordering platform
//!
//! The reconciliation engine only ever talks to this trait; the real
//! HTTP implementation lives in [`crate::http::HttpGateway`] and tests
//! substitute an in-memory one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Booking, Checkin, CheckinCreate, Member, Order, OrderStatus, Reward, Table, Transaction};

use crate::error::GatewayResult;

/// Outcome reported through the order create-result endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDecision {
    Accepted,
    Rejected,
}

/// Request/response surface of the ordering platform.
///
/// Every method returns the typed entity or a
/// [`crate::error::GatewayError`] built from the numeric status. Updates
/// that carry a stale `version` token answer with a conflict fault.
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    // === orders ===
    async fn get_order(&self, order_id: &str) -> GatewayResult<Order>;

    /// Publish a POS-originated order; the platform assigns the id and
    /// the first version token.
    async fn create_order(&self, order: &Order) -> GatewayResult<Order>;

    /// Push an order mutation. The order must carry the version last
    /// observed from the platform.
    async fn update_order(&self, order: &Order) -> GatewayResult<Order>;

    async fn list_orders(&self, status: Option<OrderStatus>) -> GatewayResult<Vec<Order>>;

    /// Orders the platform does not yet know a POS-local id for.
    async fn list_unlinked_orders(&self) -> GatewayResult<Vec<Order>>;

    /// Report the POS decision for a platform-pushed order. Answers with
    /// a conflict fault when `version` is stale.
    async fn submit_order_result(
        &self,
        order_id: &str,
        decision: OrderDecision,
        version: Option<&str>,
    ) -> GatewayResult<Order>;

    // === transactions ===
    async fn get_transaction(&self, transaction_id: &str) -> GatewayResult<Transaction>;

    async fn update_transaction(&self, transaction: &Transaction) -> GatewayResult<Transaction>;

    /// Transactions attached to an unlinked order. HTTP 404 means the
    /// order simply has none yet and is folded to an empty list, not an
    /// error — mock implementations must do the same.
    async fn transactions_for_unlinked_order(
        &self,
        order_id: &str,
    ) -> GatewayResult<Vec<Transaction>>;

    // === checkins ===
    async fn create_checkin(&self, checkin: &CheckinCreate) -> GatewayResult<Checkin>;

    /// Re-issue a checkin's table allocation. An empty `table_names`
    /// list means "deallocate"; an empty platform response is a hard
    /// failure, never a silent no-op.
    async fn update_checkin(
        &self,
        checkin_id: &str,
        checkin: &CheckinCreate,
    ) -> GatewayResult<Checkin>;

    async fn get_checkin(&self, checkin_id: &str) -> GatewayResult<Checkin>;

    async fn list_checkins(&self) -> GatewayResult<Vec<Checkin>>;

    async fn close_checkin(&self, checkin_id: &str) -> GatewayResult<Checkin>;

    // === tables ===
    async fn list_tables(&self) -> GatewayResult<Vec<Table>>;

    async fn get_table(&self, name: &str) -> GatewayResult<Table>;

    async fn create_table(&self, table: &Table) -> GatewayResult<Table>;

    async fn update_table(&self, table: &Table) -> GatewayResult<Table>;

    async fn delete_table(&self, name: &str) -> GatewayResult<()>;

    // === bookings ===
    async fn get_booking(&self, booking_id: &str) -> GatewayResult<Booking>;

    /// Seat a booking; the platform answers with the confirmed checkin.
    async fn seat_booking(
        &self,
        booking_id: &str,
        checkin: &CheckinCreate,
    ) -> GatewayResult<Checkin>;

    // === members / rewards ===
    async fn get_member(&self, member_id: &str) -> GatewayResult<Member>;

    async fn create_member(&self, member: &Member) -> GatewayResult<Member>;

    async fn update_member(&self, member: &Member) -> GatewayResult<Member>;

    async fn delete_member(&self, member_id: &str) -> GatewayResult<()>;

    async fn list_rewards(&self, member_id: &str) -> GatewayResult<Vec<Reward>>;

    async fn redeem_reward(&self, member_id: &str, reward_id: &str) -> GatewayResult<()>;
}
