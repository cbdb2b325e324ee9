use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::types::*;
use crate::api::ApiResponse;
use crate::state::AppState;

/// GET /api/suppliers - 获取供应商列表
pub async fn list_suppliers(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SuppliersResponse>> {
    match state.catalog.suppliers().await {
        Ok(suppliers) => Json(ApiResponse::success(SuppliersResponse { suppliers })),
        Err(e) => {
            tracing::error!("Failed to list suppliers: {}", e);
            Json(ApiResponse::internal_error(&e.to_string()))
        }
    }
}

/// GET /api/categories - 获取主分类列表
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<CategoriesResponse>> {
    match state.catalog.categories().await {
        Ok(categories) => Json(ApiResponse::success(CategoriesResponse { categories })),
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            Json(ApiResponse::internal_error(&e.to_string()))
        }
    }
}

/// GET /api/subcategories?category= - 获取子分类列表
pub async fn list_subcategories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubcategoryQuery>,
) -> Json<ApiResponse<SubcategoriesResponse>> {
    let Some(category) = query.category.filter(|c| !c.trim().is_empty()) else {
        return Json(ApiResponse::error("Category parameter is required"));
    };

    match state.catalog.subcategories(&category).await {
        Ok(subcategories) => Json(ApiResponse::success(SubcategoriesResponse { subcategories })),
        Err(e) => {
            tracing::error!("Failed to list subcategories of {}: {}", category, e);
            Json(ApiResponse::internal_error(&e.to_string()))
        }
    }
}
