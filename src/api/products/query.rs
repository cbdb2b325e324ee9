use axum::{
    extract::{rejection::JsonRejection, Query, RawQuery, State},
    Json,
};
use std::sync::Arc;

use inventory_search::models::SearchPage;

use super::types::*;
use crate::api::ApiResponse;
use crate::state::AppState;

/// GET /api/products/search - 搜索产品
pub async fn search_get(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Json<ApiResponse<SearchPage>> {
    let params = SearchParams::from_query(raw.as_deref());
    Json(run_search(&state, params).await)
}

/// POST /api/products/search - 搜索产品 (JSON)
pub async fn search_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchParams>, JsonRejection>,
) -> Json<ApiResponse<SearchPage>> {
    match payload {
        Ok(Json(params)) => Json(run_search(&state, params).await),
        Err(rejection) => {
            tracing::debug!("Rejected search body: {}", rejection);
            Json(ApiResponse::error(&rejection.body_text()))
        }
    }
}

async fn run_search(state: &AppState, params: SearchParams) -> ApiResponse<SearchPage> {
    let limits = state.engine.limits();
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(limits.default_per_page);

    let result = state
        .engine
        .search(&params.filter(), &params.q, page, per_page)
        .await;

    // A failed search still returns its (empty) page / 出错时仍返回空结果
    match result.error.clone() {
        Some(error) => ApiResponse::with_data(500, error, result),
        None => ApiResponse::success(result),
    }
}

/// GET /api/products/suggestions - 获取搜索建议
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestionQuery>,
) -> Json<ApiResponse<SuggestionsResponse>> {
    match state
        .catalog
        .suggestions(&query.q, state.suggestion_limit)
        .await
    {
        Ok(suggestions) => Json(ApiResponse::success(SuggestionsResponse { suggestions })),
        Err(e) => {
            tracing::error!("Failed to load suggestions: {}", e);
            Json(ApiResponse::internal_error(&e.to_string()))
        }
    }
}
