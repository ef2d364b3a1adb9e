//! Tip event: one reported tip, validated once at the consumer boundary.

use crate::domain::{Decimal, DriverId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A single validated tip, ready to apply to the aggregates.
///
/// Never persisted itself; `event_time` is only used to derive bucket
/// keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipEvent {
    pub driver_id: DriverId,
    pub amount: Decimal,
    pub event_time: DateTime<Utc>,
}

/// Rejection of a tip event that does not meet the TipEvent contract.
///
/// Never retried by this service; the external redelivery policy decides
/// what happens to the rejected item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("driver id must not be empty")]
    EmptyDriverId,
    #[error("tip amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("event time is not a valid timestamp: {0}")]
    BadEventTime(String),
}

impl TipEvent {
    /// Validate the raw field values of a tip event.
    ///
    /// # Errors
    /// Returns a `ValidationError` for an empty driver id, a non-positive
    /// amount, or an event time that does not parse as an RFC 3339
    /// instant.
    pub fn validate(
        driver_id: &str,
        amount: Decimal,
        event_time: &str,
    ) -> Result<Self, ValidationError> {
        let driver_id =
            DriverId::parse(driver_id).map_err(|_| ValidationError::EmptyDriverId)?;
        if !amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        let event_time = DateTime::parse_from_rfc3339(event_time)
            .map_err(|_| ValidationError::BadEventTime(event_time.to_string()))?
            .with_timezone(&Utc);
        Ok(TipEvent {
            driver_id,
            amount,
            event_time,
        })
    }
}
