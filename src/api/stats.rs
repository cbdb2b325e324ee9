use axum::{extract::State, Json};
use std::sync::Arc;

use inventory_search::models::CatalogStats;

use crate::api::ApiResponse;
use crate::state::AppState;

/// GET /api/stats - 商品库统计
pub async fn catalog_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<CatalogStats>> {
    match state.catalog.stats().await {
        Ok(stats) => Json(ApiResponse::success(stats)),
        Err(e) => {
            tracing::error!("Failed to collect catalog stats: {}", e);
            Json(ApiResponse::internal_error(&e.to_string()))
        }
    }
}
