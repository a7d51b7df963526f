//! Consumer Model

use serde::{Deserialize, Serialize};

/// Consumer attached to an order, checkin or booking.
///
/// Presence is the acceptance gate for platform-pushed orders: an order
/// without a consumer record is rejected outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Delivery address, free-form (only meaningful for delivery orders)
    pub address: Option<String>,
}
