use utoipa::OpenApi;

use crate::api::handlers;
use crate::database::models::{NewPriceRecord, PriceRecord};

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Price Sync API",
        version = "1.0.0",
        description = "Tracks market-price records and keeps them synchronized with an upstream quote provider"
    ),
    paths(
        handlers::health_check,
        handlers::get_price_records,
        handlers::get_price_record_by_id,
        handlers::get_price_record_by_name,
        handlers::trigger_refresh,
    ),
    components(
        schemas(
            PriceRecord,
            NewPriceRecord,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Stored price record endpoints"),
        (name = "refresh", description = "Synchronization trigger endpoint"),
    )
)]
pub struct ApiDoc;
