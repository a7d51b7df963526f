//! Transaction Model
//!
//! A transaction is a payment claim created by the platform when a
//! consumer or partner initiates payment. It must be resolved (claimed
//! or rejected) by the POS before its order can reach a terminal
//! paid/rejected state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment-claim lifecycle status.
///
/// Status may only advance along `pending → waiting → complete |
/// rejected | cancelled`; [`TransactionStatus::can_advance_to`] encodes
/// the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Waiting,
    Complete,
    Rejected,
    Cancelled,
}

impl TransactionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Rejected | Self::Cancelled)
    }

    /// Whether a transition from `self` to `next` respects the lifecycle
    /// ordering.
    pub fn can_advance_to(self, next: TransactionStatus) -> bool {
        match self {
            Self::Pending => matches!(
                next,
                Self::Waiting | Self::Complete | Self::Rejected | Self::Cancelled
            ),
            Self::Waiting => matches!(next, Self::Complete | Self::Rejected | Self::Cancelled),
            _ => false,
        }
    }
}

/// Transaction entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Platform-assigned id
    pub id: String,
    /// Order the claim belongs to (platform order id)
    pub order_id: Option<String>,
    pub amount: Decimal,
    pub status: TransactionStatus,
    /// Opaque concurrency token; re-synchronized after every claim
    pub version: Option<String>,
    /// Initiated by an integration partner rather than the consumer
    #[serde(default)]
    pub partner_initiated: bool,
    /// POS may accept less than the requested amount
    #[serde(default)]
    pub accept_less: bool,
    /// Reject reason, set by the POS on rejection
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
