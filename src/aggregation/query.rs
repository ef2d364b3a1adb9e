//! Read path: current day and week totals for one driver.

use crate::db::DriverRepository;
use crate::domain::{AggregationKey, DriverId, TipAggregate};
use crate::error::AppError;
use crate::store::AggregateStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Both current-bucket aggregates for a driver. Either side may be empty
/// when no tip has landed in that bucket yet; that is a valid state, not
/// an error.
#[derive(Debug, Clone)]
pub struct DriverTips {
    pub daily: Option<TipAggregate>,
    pub weekly: Option<TipAggregate>,
}

/// Serves tip totals for the current day and week buckets.
#[derive(Debug, Clone)]
pub struct TipQueryService {
    drivers: DriverRepository,
    store: Arc<dyn AggregateStore>,
}

impl TipQueryService {
    pub fn new(drivers: DriverRepository, store: Arc<dyn AggregateStore>) -> Self {
        Self { drivers, store }
    }

    /// Fetch the driver's aggregates for the buckets containing `now`.
    ///
    /// # Errors
    /// `AppError::NotFound` if the driver does not exist; store errors
    /// propagate untouched.
    pub async fn get_driver_tips(
        &self,
        driver_id: &DriverId,
        now: DateTime<Utc>,
    ) -> Result<DriverTips, AppError> {
        if !self.drivers.exists(driver_id).await? {
            return Err(AppError::NotFound(format!(
                "driver {} not found",
                driver_id
            )));
        }

        let day = AggregationKey::day_of(now);
        let week = AggregationKey::week_of(now);

        let (daily, weekly) = futures::future::try_join(
            self.store.get(driver_id, &day),
            self.store.get(driver_id, &week),
        )
        .await?;

        Ok(DriverTips { daily, weekly })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::TipProcessor;
    use crate::db::init_db;
    use crate::domain::{Decimal, Driver, TipEvent};
    use crate::store::InMemoryAggregateStore;
    use std::str::FromStr;
    use tempfile::TempDir;

    async fn setup() -> (TipQueryService, TipProcessor, DriverRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        let drivers = DriverRepository::new(pool);
        let store: Arc<dyn AggregateStore> = Arc::new(InMemoryAggregateStore::new());
        let queries = TipQueryService::new(drivers.clone(), store.clone());
        let processor = TipProcessor::new(store);
        (queries, processor, drivers, temp_dir)
    }

    #[tokio::test]
    async fn test_unknown_driver_is_not_found() {
        let (queries, _processor, _drivers, _temp) = setup().await;

        let result = queries
            .get_driver_tips(&DriverId::new("ghost".to_string()), Utc::now())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_driver_with_no_tips_returns_empty_sides() {
        let (queries, _processor, drivers, _temp) = setup().await;

        let driver = Driver::create("Ada".to_string());
        drivers.insert(&driver).await.unwrap();

        let tips = queries
            .get_driver_tips(&driver.driver_id, Utc::now())
            .await
            .unwrap();
        assert!(tips.daily.is_none());
        assert!(tips.weekly.is_none());
    }

    #[tokio::test]
    async fn test_read_reflects_write() {
        let (queries, processor, drivers, _temp) = setup().await;

        let driver = Driver::create("Ada".to_string());
        drivers.insert(&driver).await.unwrap();

        let now = Utc::now();
        let event = TipEvent {
            driver_id: driver.driver_id.clone(),
            amount: Decimal::from_str("5.50").unwrap(),
            event_time: now,
        };
        processor.apply_tip(&event).await.unwrap();

        let tips = queries.get_driver_tips(&driver.driver_id, now).await.unwrap();
        let daily = tips.daily.expect("daily aggregate missing");
        let weekly = tips.weekly.expect("weekly aggregate missing");
        assert_eq!(daily.total_amount, Decimal::from_str("5.50").unwrap());
        assert_eq!(weekly.total_amount, Decimal::from_str("5.50").unwrap());
    }
}
