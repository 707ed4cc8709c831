use crate::database::models::PriceRecord;
use crate::database::repositories::PriceRecordRepository;
use crate::sync::PriceSyncScheduler;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub price_record_repository: Arc<dyn PriceRecordRepository>,
    /// Present only when the upstream provider is configured
    pub sync_scheduler: Option<Arc<PriceSyncScheduler>>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListQueryParams {
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of records to skip
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

/// Get all price records
#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "items",
    params(ListQueryParams),
    responses(
        (status = 200, description = "List of price records", body = Vec<PriceRecord>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_price_records(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<Vec<PriceRecord>>, (StatusCode, String)> {
    if params.limit < 0 || params.offset < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "limit and offset must be non-negative".to_string(),
        ));
    }

    state
        .price_record_repository
        .get_all(params.limit, params.offset)
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to list price records: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

/// Get price record by ID
#[utoipa::path(
    get,
    path = "/api/v1/items/{record_id}",
    tag = "items",
    params(
        ("record_id" = i64, Path, description = "Price record ID")
    ),
    responses(
        (status = 200, description = "Price record details", body = PriceRecord),
        (status = 404, description = "Price record not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_price_record_by_id(
    State(state): State<AppState>,
    Path(record_id): Path<i64>,
) -> Result<Json<PriceRecord>, (StatusCode, String)> {
    state
        .price_record_repository
        .find_by_id(record_id)
        .map_err(|e| {
            tracing::error!("Failed to get price record {}: {}", record_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Price record {} not found", record_id),
            )
        })
}

/// Get price record by symbol name
#[utoipa::path(
    get,
    path = "/api/v1/items/name/{name}",
    tag = "items",
    params(
        ("name" = String, Path, description = "Symbol name (e.g., euro)")
    ),
    responses(
        (status = 200, description = "Price record details", body = PriceRecord),
        (status = 404, description = "Price record not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_price_record_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PriceRecord>, (StatusCode, String)> {
    state
        .price_record_repository
        .find_by_name(&name)
        .map_err(|e| {
            tracing::error!("Failed to get price record '{}': {}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Price record '{}' not found", name),
            )
        })
}

/// Trigger a synchronization run
///
/// Schedules a background run and acknowledges the caller immediately; the
/// run completes (or fails per symbol) after the response is sent.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    tag = "refresh",
    responses(
        (status = 202, description = "Synchronization run accepted"),
        (status = 503, description = "Upstream provider not configured")
    )
)]
pub async fn trigger_refresh(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, String)> {
    match &state.sync_scheduler {
        Some(scheduler) => {
            // Fire-and-forget; the handle is intentionally dropped
            let _ = scheduler.trigger();
            Ok(StatusCode::ACCEPTED)
        }
        None => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Price synchronization is not configured".to_string(),
        )),
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testkit::InMemoryPriceStore;

    fn state() -> AppState {
        AppState {
            price_record_repository: Arc::new(InMemoryPriceStore::new()),
            sync_scheduler: None,
        }
    }

    #[tokio::test]
    async fn test_list_rejects_negative_pagination() {
        let params = ListQueryParams {
            limit: -1,
            offset: 0,
        };
        let result = get_price_records(State(state()), Query(params)).await;
        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let params = ListQueryParams {
            limit: 10,
            offset: -5,
        };
        let result = get_price_records(State(state()), Query(params)).await;
        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_accepts_default_pagination() {
        let params = ListQueryParams {
            limit: default_limit(),
            offset: 0,
        };
        let result = get_price_records(State(state()), Query(params)).await;
        assert!(result.unwrap().0.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_unavailable_without_scheduler() {
        let result = trigger_refresh(State(state())).await;
        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
