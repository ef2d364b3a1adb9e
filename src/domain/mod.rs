//! Domain types for the tip ledger.
//!
//! This module provides:
//! - Lossless money handling via the Decimal wrapper
//! - Domain primitives: DriverId
//! - Calendar bucketing and aggregate bucket keys
//! - TipEvent and TipAggregate records

pub mod aggregate;
pub mod bucket;
pub mod decimal;
pub mod driver;
pub mod primitives;
pub mod tip;

pub use aggregate::{AggregationKey, TipAggregate};
pub use bucket::{day_bucket, week_bucket};
pub use decimal::Decimal;
pub use driver::Driver;
pub use primitives::{DriverId, DriverIdError};
pub use tip::{TipEvent, ValidationError};
