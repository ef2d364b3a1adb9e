use std::net::SocketAddr;
use std::sync::Arc;
use tiptally::aggregation::{BatchConsumer, TipProcessor, TipQueryService};
use tiptally::{
    api, config::Config, db::init_db, AggregateStore, DriverRepository, SqliteAggregateStore,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    // Initialize database and dependencies
    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn AggregateStore> = Arc::new(SqliteAggregateStore::new(pool.clone()));
    let drivers = DriverRepository::new(pool);
    let processor = TipProcessor::new(store.clone());
    let consumer = Arc::new(BatchConsumer::new(processor));
    let queries = TipQueryService::new(drivers.clone(), store);

    // Create router
    let app = api::create_router(api::AppState {
        drivers,
        queries,
        consumer,
    });

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
