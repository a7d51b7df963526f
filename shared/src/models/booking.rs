//! Booking Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::consumer::Consumer;

/// Booking entity (预约)
///
/// Created/updated/deleted by the platform. Seating is a POS-initiated
/// transition that creates or reuses a [`super::Checkin`] and links it
/// to both the booking and an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Platform-assigned id
    pub id: String,
    pub table_names: Vec<String>,
    pub date: DateTime<Utc>,
    pub covers: u32,
    pub consumer: Consumer,
    /// Set once the booking has been seated
    pub checkin_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}
