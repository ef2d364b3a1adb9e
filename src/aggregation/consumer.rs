//! Batch consumer for inbound tip events.
//!
//! Each record is an isolated failure domain: parse, validate, and apply
//! one record; if any step fails, report that record's id for redelivery
//! and keep going. The consumer never aborts a batch.

use crate::aggregation::TipProcessor;
use crate::domain::{Decimal, TipEvent, ValidationError};
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// One inbound queue record: delivery id plus raw JSON payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRecord {
    pub message_id: String,
    pub body: String,
}

/// Record id handed back to the queue for redelivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    pub item_identifier: String,
}

/// Outcome of one batch: ids of the records that must be redelivered.
/// Empty means the whole batch was applied.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub batch_item_failures: Vec<BatchItemFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.batch_item_failures.is_empty()
    }
}

/// Raw wire shape of a tip event, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTipEvent {
    driver_id: String,
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Decimal,
    event_time: String,
}

impl RawTipEvent {
    fn validate(self) -> Result<TipEvent, ValidationError> {
        TipEvent::validate(&self.driver_id, self.amount, &self.event_time)
    }
}

/// Accepts a JSON number or a numeric-looking string for the amount field.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AmountRepr {
        Number(f64),
        Text(String),
    }

    match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Number(n) => Decimal::from_f64(n)
            .ok_or_else(|| serde::de::Error::custom(format!("amount {} is not representable", n))),
        AmountRepr::Text(s) => Decimal::from_str_canonical(s.trim())
            .map_err(|_| serde::de::Error::custom(format!("amount {:?} is not numeric", s))),
    }
}

/// Why one record failed. Drives the warn log; the only control-flow
/// consequence is that the record's id lands in the batch report.
#[derive(Debug, Error)]
enum RecordFailure {
    #[error("payload did not parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives a bounded batch of queue records through the tip processor.
#[derive(Debug, Clone)]
pub struct BatchConsumer {
    processor: TipProcessor,
}

impl BatchConsumer {
    pub fn new(processor: TipProcessor) -> Self {
        Self { processor }
    }

    /// Process every record in the batch, concurrently and independently.
    ///
    /// Ordering across records is neither guaranteed nor assumed. The
    /// returned report lists exactly the records that must be redelivered.
    pub async fn process_batch(&self, records: Vec<QueueRecord>) -> BatchReport {
        let outcomes =
            futures::future::join_all(records.iter().map(|record| self.process_record(record)))
                .await;

        let mut report = BatchReport::default();
        for (record, outcome) in records.iter().zip(outcomes) {
            if let Err(reason) = outcome {
                warn!("tip record {} failed: {}", record.message_id, reason);
                report.batch_item_failures.push(BatchItemFailure {
                    item_identifier: record.message_id.clone(),
                });
            }
        }
        report
    }

    async fn process_record(&self, record: &QueueRecord) -> Result<(), RecordFailure> {
        let raw: RawTipEvent = serde_json::from_str(&record.body)?;
        let event = raw.validate()?;
        self.processor.apply_tip(&event).await?;
        Ok(())
    }
}
