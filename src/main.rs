use price_sync_api::api::AppState;
use price_sync_api::config::SyncConfig;
use price_sync_api::database::repositories::{PriceRecordRepository, PriceRecordRepositoryImpl};
use price_sync_api::database::{establish_connection_pool, Database};
use price_sync_api::quotes::HttpQuoteClient;
use price_sync_api::sync::{PriceSyncScheduler, SyncEngine};
use price_sync_api::create_router;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "price_sync_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --worker runs continuous synchronization as the whole process
    // lifetime; the default mode serves the API with a background sync job
    let worker_mode = std::env::args().any(|arg| arg == "--worker");

    let database = match initialize_database() {
        Some(database) => database,
        None => return,
    };

    let db = database.clone();
    let price_record_repository =
        Arc::new(PriceRecordRepositoryImpl::new(move || db.get_conn()))
            as Arc<dyn PriceRecordRepository>;

    let sync_scheduler = initialize_sync(price_record_repository.clone());

    if worker_mode {
        match sync_scheduler {
            Some(scheduler) => {
                tracing::info!("Starting in worker mode");
                if let Err(e) = scheduler.run_continuous().await {
                    tracing::error!("Continuous synchronization failed to start: {}", e);
                }
            }
            None => {
                tracing::error!("Worker mode requires UPSTREAM_API_KEY to be set... Exiting.");
            }
        }
        return;
    }

    // Register the periodic sync job alongside the API server
    if let Some(scheduler) = &sync_scheduler {
        initialize_cron_scheduler(scheduler.clone()).await;
    }

    let app = create_router(AppState {
        price_record_repository,
        sync_scheduler,
    });

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Price Sync API server running on http://{}", addr);
    tracing::info!("Health check: http://{}/api/v1/health", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.unwrap();
}

/// Initialize the database connection pool
fn initialize_database() -> Option<Database> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL is not set... Exiting.");
            return None;
        }
    };

    let pool_size = std::env::var("DB_POOL_MAX_SIZE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(20);

    match establish_connection_pool(&database_url, pool_size) {
        Ok(database) => Some(database),
        Err(e) => {
            tracing::error!("Failed to establish database connection: {}", e);
            None
        }
    }
}

/// Build the sync engine and scheduler from environment configuration
///
/// Returns `None` when the upstream provider is not configured; the API then
/// serves stored records without synchronization.
fn initialize_sync(
    repository: Arc<dyn PriceRecordRepository>,
) -> Option<Arc<PriceSyncScheduler>> {
    let config = match SyncConfig::from_env() {
        Some(config) => config,
        None => {
            tracing::info!("Price sync: not configured (UPSTREAM_API_KEY not set)");
            return None;
        }
    };

    let quote_client = match HttpQuoteClient::new(
        config.upstream_base_url.clone(),
        config.upstream_api_key.clone(),
        config.fetch_timeout,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to build quote client: {}", e);
            return None;
        }
    };

    tracing::info!(
        "Price sync configured: {} symbols, every {} seconds",
        config.tracked_symbols.len(),
        config.interval.as_secs()
    );

    let engine = Arc::new(SyncEngine::new(
        repository,
        quote_client,
        config.tracked_symbols.clone(),
    ));

    Some(Arc::new(PriceSyncScheduler::new(engine, config.interval)))
}

/// Initialize the cron scheduler for the periodic sync job
async fn initialize_cron_scheduler(sync_scheduler: Arc<PriceSyncScheduler>) {
    use tokio_cron_scheduler::JobScheduler;

    let scheduler = match JobScheduler::new().await {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("Failed to create cron scheduler: {}", e);
            return;
        }
    };

    if let Err(e) = sync_scheduler.register(&scheduler).await {
        tracing::error!("Failed to register price sync job: {}", e);
        return;
    }

    if let Err(e) = scheduler.start().await {
        tracing::error!("Failed to start cron scheduler: {}", e);
        return;
    }

    tracing::info!("Cron scheduler started");

    // Keep scheduler alive (it will run in the background)
    std::mem::forget(scheduler);
}
