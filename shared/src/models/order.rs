//! Order Model
//!
//! Orders are independently mutable on both sides: the platform pushes
//! consumer-initiated orders and status changes, the POS accepts,
//! reprices and pays them. Every update sent back to the platform must
//! echo the `version` token last observed from the platform, otherwise
//! the platform answers with a conflict.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::consumer::Consumer;
use super::transaction::Transaction;

/// Order lifecycle status as reported by the ordering platform.
///
/// Unknown status strings fail deserialization on purpose: an
/// unrecognized status means the two sides have diverged on the contract
/// itself, and the event must be aborted loudly rather than absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Fresh platform order, not yet judged (`new` is treated as `pending`)
    New,
    Pending,
    Accepted,
    /// Platform-side "consumer asked for the bill" trigger
    ReadyToPay,
    /// Pushed by the POS once totals are final and capture is underway
    WaitingForPayment,
    Paid,
    Rejected,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states — the platform never mutates an order past these.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Rejected | Self::Cancelled)
    }
}

/// Fulfilment type attached by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfilmentType {
    Delivery,
    Pickup,
    #[default]
    Unknown,
}

/// Order line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order-level surcharge or discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub name: String,
    pub kind: AdjustmentKind,
    /// Signed impact on the order total (discounts are negative)
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Surcharge,
    Discount,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Platform-assigned id; absent for POS-originated orders that have
    /// not round-tripped yet
    pub id: Option<String>,
    /// POS-local id, opaque to the platform
    pub pos_ref: Option<String>,
    pub status: OrderStatus,
    /// Opaque concurrency token; echoed back on every update
    pub version: Option<String>,
    pub checkin_id: Option<String>,
    #[serde(default)]
    pub fulfilment: FulfilmentType,
    pub consumer: Option<Consumer>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,

    // === payment-split fields ===
    #[serde(default)]
    pub pay_total: Decimal,
    /// Portion the consumer is NOT paying through the platform. Must be
    /// zero in bistro mode (single-pass capture has no later round).
    #[serde(default)]
    pub not_paying_total: Decimal,
    #[serde(default)]
    pub split_ways: u32,
    #[serde(default)]
    pub pay_splits: u32,
    #[serde(default)]
    pub tip: Decimal,

    /// Transactions the platform attached on push / listing
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Order total: items plus order-level adjustments plus tip.
    pub fn total(&self) -> Decimal {
        let items: Decimal = self.items.iter().map(OrderItem::line_total).sum();
        let adjustments: Decimal = self.adjustments.iter().map(|a| a.amount).sum();
        items + adjustments + self.tip
    }

    /// Sum of attached transaction amounts, terminal rejects excluded.
    pub fn transactions_total(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| !matches!(t.status, super::TransactionStatus::Rejected | super::TransactionStatus::Cancelled))
            .map(|t| t.amount)
            .sum()
    }

    /// Whether the attached transactions cover the full order total.
    pub fn fully_covered(&self) -> bool {
        !self.transactions.is_empty() && self.transactions_total() >= self.total()
    }
}
