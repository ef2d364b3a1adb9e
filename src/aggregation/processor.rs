//! Applies one validated tip to its day and week aggregates.

use crate::domain::{AggregationKey, TipEvent};
use crate::store::{AggregateStore, StoreError};
use chrono::Utc;
use std::sync::Arc;

/// Routes each tip into its two calendar buckets via the aggregate store.
#[derive(Debug, Clone)]
pub struct TipProcessor {
    store: Arc<dyn AggregateStore>,
}

impl TipProcessor {
    pub fn new(store: Arc<dyn AggregateStore>) -> Self {
        Self { store }
    }

    /// Apply one tip to its day and week aggregates.
    ///
    /// The write timestamp is captured once so both buckets carry the same
    /// `updated_at`. The two increments run concurrently and both are
    /// awaited; the event counts as applied only when both succeed. A
    /// partially applied event surfaces as an error and is redelivered
    /// whole by the queue.
    ///
    /// # Errors
    /// Propagates the first `StoreError` from either increment.
    pub async fn apply_tip(&self, event: &TipEvent) -> Result<(), StoreError> {
        let now = Utc::now();
        let day = AggregationKey::day_of(event.event_time);
        let week = AggregationKey::week_of(event.event_time);

        let (day_result, week_result) = futures::future::join(
            self.store
                .increment(&event.driver_id, &day, event.amount, now),
            self.store
                .increment(&event.driver_id, &week, event.amount, now),
        )
        .await;

        day_result?;
        week_result?;
        Ok(())
    }
}
