//! Aggregate counter records and their bucket identities.

use crate::domain::bucket::{day_bucket, week_bucket};
use crate::domain::{Decimal, DriverId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket identity of an aggregate: `DAY#YYYY-MM-DD` or `WEEK#YYYY-Www`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AggregationKey(String);

impl AggregationKey {
    /// Day bucket key for the given instant.
    pub fn day_of(ts: DateTime<Utc>) -> Self {
        AggregationKey(format!("DAY#{}", day_bucket(ts)))
    }

    /// Week bucket key for the given instant.
    pub fn week_of(ts: DateTime<Utc>) -> Self {
        AggregationKey(format!("WEEK#{}", week_bucket(ts)))
    }

    /// Get the key as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Running tip total for one driver within one bucket.
///
/// At most one aggregate exists per `(driver_id, aggregation_key)`. The
/// row is created implicitly by the first increment; `created_at` is set
/// once on that first write and `updated_at` on every write, so
/// `created_at <= updated_at` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipAggregate {
    pub driver_id: DriverId,
    pub aggregation_key: AggregationKey,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
