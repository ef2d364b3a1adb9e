pub mod aggregation;
pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod store;

pub use aggregation::{BatchConsumer, BatchReport, QueueRecord, TipProcessor, TipQueryService};
pub use config::Config;
pub use db::{init_db, DriverRepository};
pub use domain::{
    AggregationKey, Decimal, Driver, DriverId, TipAggregate, TipEvent, ValidationError,
};
pub use error::AppError;
pub use store::{AggregateStore, InMemoryAggregateStore, SqliteAggregateStore, StoreError};
