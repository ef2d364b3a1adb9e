pub mod drivers;
pub mod health;
pub mod ingest;
pub mod tips;

use crate::aggregation::{BatchConsumer, TipQueryService};
use crate::db::DriverRepository;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub drivers: DriverRepository,
    pub queries: TipQueryService,
    pub consumer: Arc<BatchConsumer>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/drivers", post(drivers::create_driver))
        .route("/drivers/:id", get(drivers::get_driver))
        .route("/drivers/:id/tips", get(tips::get_driver_tips))
        .route("/internal/tips/batch", post(ingest::ingest_batch))
        .layer(cors)
        .with_state(state)
}
