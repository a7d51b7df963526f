//! Checkin Model
//!
//! A checkin binds a consumer/table/covers grouping to subsequent
//! orders. Created when a table is first allocated to an unseated order
//! or when a booking is seated; closed explicitly by the POS.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::consumer::Consumer;

/// Checkin entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkin {
    /// Platform-assigned id
    pub id: String,
    pub table_names: Vec<String>,
    pub covers: u32,
    pub consumer: Option<Consumer>,
    #[serde(default)]
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl Checkin {
    /// Set-equality on table names, order-insensitive. Seating criteria
    /// use this rather than containment.
    pub fn same_tables(&self, other: &[String]) -> bool {
        if self.table_names.len() != other.len() {
            return false;
        }
        let mut a: Vec<&str> = self.table_names.iter().map(String::as_str).collect();
        let mut b: Vec<&str> = other.iter().map(String::as_str).collect();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

/// Create/re-issue payload — an empty `table_names` list means
/// "deallocate".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinCreate {
    pub table_names: Vec<String>,
    pub covers: u32,
    pub consumer: Option<Consumer>,
}
