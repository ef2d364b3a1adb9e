//! Driver record.

use crate::domain::DriverId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: DriverId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    /// Create a driver with a freshly assigned v4 uuid id.
    pub fn create(name: String) -> Self {
        Driver {
            driver_id: DriverId::new(Uuid::new_v4().to_string()),
            name,
            created_at: Utc::now(),
        }
    }
}
