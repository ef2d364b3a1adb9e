use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tiptally::db::init_db;
use tiptally::{
    AggregateStore, AggregationKey, Decimal, DriverId, InMemoryAggregateStore,
    SqliteAggregateStore, StoreError,
};

async fn setup_sqlite_store() -> (Arc<SqliteAggregateStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    (Arc::new(SqliteAggregateStore::new(pool)), temp_dir)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

fn day_key() -> AggregationKey {
    AggregationKey::day_of(ts("2024-01-15T10:30:00Z"))
}

/// N concurrent increments on one key must sum exactly, regardless of
/// interleaving.
async fn assert_atomic_accumulation(store: Arc<dyn AggregateStore>) {
    let driver = DriverId::new("d1".to_string());
    let key = day_key();
    let now = ts("2024-01-15T11:00:00Z");

    let tasks: Vec<_> = (1..=50)
        .map(|i| {
            let store = store.clone();
            let driver = driver.clone();
            let key = key.clone();
            // i cents each: exact expected sum is 50*51/2 = 1275 cents.
            tokio::spawn(async move {
                let amount = Decimal::from_str(&format!("0.{:02}", i)).unwrap();
                store.increment(&driver, &key, amount, now).await
            })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked").expect("increment failed");
    }

    let aggregate = store
        .get(&driver, &key)
        .await
        .expect("get failed")
        .expect("aggregate missing");
    assert_eq!(aggregate.total_amount, dec("12.75"));
}

#[tokio::test]
async fn test_sqlite_atomic_accumulation_under_concurrency() {
    let (store, _temp) = setup_sqlite_store().await;
    assert_atomic_accumulation(store).await;
}

#[tokio::test]
async fn test_memory_atomic_accumulation_under_concurrency() {
    assert_atomic_accumulation(Arc::new(InMemoryAggregateStore::new())).await;
}

#[tokio::test]
async fn test_sqlite_first_write_wins_created_at() {
    let (store, _temp) = setup_sqlite_store().await;
    let driver = DriverId::new("d1".to_string());
    let key = day_key();
    let first = ts("2024-01-15T11:00:00Z");
    let second = ts("2024-01-15T12:00:00Z");
    let third = ts("2024-01-15T13:00:00Z");

    for now in [first, second, third] {
        store
            .increment(&driver, &key, dec("5.50"), now)
            .await
            .unwrap();
    }

    let aggregate = store.get(&driver, &key).await.unwrap().unwrap();
    assert_eq!(aggregate.created_at, first);
    assert_eq!(aggregate.updated_at, third);
    assert_eq!(aggregate.total_amount, dec("16.50"));
    assert!(aggregate.created_at <= aggregate.updated_at);
}

#[tokio::test]
async fn test_sqlite_read_reflects_write() {
    let (store, _temp) = setup_sqlite_store().await;
    let driver = DriverId::new("d1".to_string());
    let key = day_key();

    store
        .increment(&driver, &key, dec("5.50"), ts("2024-01-15T11:00:00Z"))
        .await
        .unwrap();

    let aggregate = store.get(&driver, &key).await.unwrap().unwrap();
    assert_eq!(aggregate.total_amount, dec("5.50"));
    assert_eq!(aggregate.driver_id, driver);
    assert_eq!(aggregate.aggregation_key.as_str(), "DAY#2024-01-15");
}

#[tokio::test]
async fn test_sqlite_absent_key_reads_none() {
    let (store, _temp) = setup_sqlite_store().await;
    let driver = DriverId::new("d1".to_string());

    let absent = store.get(&driver, &day_key()).await.unwrap();
    assert!(absent.is_none());
}

#[tokio::test]
async fn test_sqlite_keys_are_isolated() {
    let (store, _temp) = setup_sqlite_store().await;
    let d1 = DriverId::new("d1".to_string());
    let d2 = DriverId::new("d2".to_string());
    let key = day_key();
    let now = ts("2024-01-15T11:00:00Z");

    store.increment(&d1, &key, dec("1"), now).await.unwrap();
    store.increment(&d2, &key, dec("2"), now).await.unwrap();

    let a1 = store.get(&d1, &key).await.unwrap().unwrap();
    let a2 = store.get(&d2, &key).await.unwrap().unwrap();
    assert_eq!(a1.total_amount, dec("1"));
    assert_eq!(a2.total_amount, dec("2"));
}

#[tokio::test]
async fn test_sqlite_rejects_over_scale_amount() {
    let (store, _temp) = setup_sqlite_store().await;
    let driver = DriverId::new("d1".to_string());

    let result = store
        .increment(
            &driver,
            &day_key(),
            dec("0.00001"),
            ts("2024-01-15T11:00:00Z"),
        )
        .await;
    assert!(matches!(result, Err(StoreError::Rejected(_))));

    // The rejected write must leave no row behind.
    assert!(store.get(&driver, &day_key()).await.unwrap().is_none());
}
