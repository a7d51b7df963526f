//! Member and Reward Models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loyalty member (会员)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Platform-assigned id
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub points_balance: i64,
    /// Opaque concurrency token; echoed back on member updates
    pub version: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Redeemable reward attached to a member.
///
/// Redeeming updates the order (a discount adjustment) before the reward
/// itself is claimed on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub member_id: String,
    pub name: String,
    /// Discount value applied to the order on redemption
    pub amount: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
}
