//! Tip aggregation pipeline: per-event processing, batch consumption, and
//! the read path.

pub mod consumer;
pub mod processor;
pub mod query;

pub use consumer::{BatchConsumer, BatchItemFailure, BatchReport, QueueRecord};
pub use processor::TipProcessor;
pub use query::{DriverTips, TipQueryService};
