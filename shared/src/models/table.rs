//! Table Model

use serde::{Deserialize, Serialize};

/// Dining table as known to the platform (pure CRUD passthrough).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub is_active: bool,
}
