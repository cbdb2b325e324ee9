pub mod products;
pub mod server;
pub mod stats;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            code: 400,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: 500,
            message: message.to_string(),
            data: None,
        }
    }

    /// Non-success code that still carries a payload / 带数据的错误响应
    pub fn with_data(code: i32, message: String, data: T) -> Self {
        Self {
            code,
            message,
            data: Some(data),
        }
    }
}

/// Build the HTTP router / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/suppliers", get(products::list_suppliers))
        .route("/api/categories", get(products::list_categories))
        .route("/api/subcategories", get(products::list_subcategories))
        .route(
            "/api/products/search",
            get(products::search_get).post(products::search_post),
        )
        .route("/api/products/suggestions", get(products::suggestions))
        .route("/api/stats", get(stats::catalog_stats))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse {
            code: 404,
            message: "Endpoint not found".to_string(),
            data: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use inventory_search::catalog::{ensure_schema, SqliteCatalog};
    use inventory_search::config::AppConfig;
    use serde_json::{json, Value};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    /// 25 products: odd rows are red roses, even rows white lilies;
    /// P01-P15 from S1, the rest from S2; ListPrice equals the row number.
    async fn test_state() -> Arc<AppState> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();

        for i in 1..=25i64 {
            let (description, subcategory) = if i % 2 == 1 {
                ("Red Rose", "Roses")
            } else {
                ("White Lily", "Lilies")
            };
            let supplier = if i <= 15 { "S1" } else { "S2" };
            sqlx::query(
                "INSERT INTO products \
                 (Code, SU, SKU, Description, ListPrice, HL, Qty, Stock, Sold, StockStatus, nCategory, nSubCategory) \
                 VALUES (?, ?, ?, ?, ?, '', 1, 1, 0, 'instock', 'Flowers', ?)",
            )
            .bind(format!("C{i}"))
            .bind(supplier)
            .bind(format!("P{i:02}"))
            .bind(description)
            .bind(i as f64)
            .bind(subcategory)
            .execute(&pool)
            .await
            .unwrap();
        }

        let catalog = SqliteCatalog::from_pool(pool);
        Arc::new(AppState::new(catalog, &AppConfig::default()))
    }

    async fn send(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn get_json(state: Arc<AppState>, uri: &str) -> Value {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        body
    }

    async fn post_json(state: Arc<AppState>, uri: &str, body: String) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(state, request).await.1
    }

    #[tokio::test]
    async fn health() {
        let body = get_json(test_state().await, "/api/health").await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn lookups() {
        let state = test_state().await;

        let body = get_json(state.clone(), "/api/suppliers").await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["suppliers"], json!(["ALL", "S1", "S2"]));

        let body = get_json(state.clone(), "/api/categories").await;
        assert_eq!(body["data"]["categories"], json!(["Flowers"]));

        let body = get_json(state.clone(), "/api/subcategories?category=Flowers").await;
        assert_eq!(body["data"]["subcategories"], json!(["Lilies", "Roses"]));

        let body = get_json(state, "/api/subcategories").await;
        assert_eq!(body["code"], 400);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn search_pagination() {
        let state = test_state().await;

        let body = get_json(state.clone(), "/api/products/search?page=3&per_page=10").await;
        let data = &body["data"];
        assert_eq!(data["total_count"], 25);
        assert_eq!(data["total_pages"], 3);
        assert_eq!(data["products"].as_array().unwrap().len(), 5);
        assert_eq!(data["products"][0]["sku"], "P21");
        assert!(data.get("error").is_none());

        let body = get_json(state, "/api/products/search?page=0&per_page=500").await;
        assert_eq!(body["data"]["page"], 1);
        assert_eq!(body["data"]["per_page"], 10);
    }

    #[tokio::test]
    async fn search_with_query_and_filters() {
        let state = test_state().await;

        let body = get_json(state.clone(), "/api/products/search?q=rose").await;
        assert_eq!(body["data"]["total_count"], 13);

        let body = get_json(state.clone(), "/api/products/search?q=rose&suppliers=S2").await;
        assert_eq!(body["data"]["total_count"], 5);

        let body = get_json(
            state.clone(),
            "/api/products/search?q=rose&suppliers=S1&suppliers=S2&min_price=20",
        )
        .await;
        assert_eq!(body["data"]["total_count"], 3);

        let body = get_json(state, "/api/products/search?q=rose%2Blily").await;
        assert_eq!(body["data"]["total_count"], 0);
    }

    #[tokio::test]
    async fn search_post() {
        let state = test_state().await;

        let body = post_json(
            state.clone(),
            "/api/products/search",
            json!({"q": "lily", "max_price": 10, "per_page": 2}).to_string(),
        )
        .await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["total_count"], 5);
        assert_eq!(body["data"]["total_pages"], 3);
        assert_eq!(body["data"]["products"][1]["sku"], "P04");

        let body = post_json(state, "/api/products/search", "{not json".to_string()).await;
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn search_post_with_null_fields() {
        let state = test_state().await;

        let body = post_json(
            state.clone(),
            "/api/products/search",
            json!({"q": null, "suppliers": null, "subcategories": null, "category": null})
                .to_string(),
        )
        .await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["total_count"], 25);

        let body = post_json(
            state,
            "/api/products/search",
            json!({"page": 2.0, "per_page": 10.0}).to_string(),
        )
        .await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["page"], 2);
        assert_eq!(body["data"]["products"][0]["sku"], "P11");
    }

    #[tokio::test]
    async fn search_storage_failure() {
        let state = test_state().await;
        state.catalog.close().await;

        let body = get_json(state, "/api/products/search?q=rose").await;
        assert_eq!(body["code"], 500);
        assert_eq!(body["data"]["total_count"], 0);
        assert_eq!(body["data"]["products"], json!([]));
        assert!(body["data"]["error"].is_string());
    }

    #[tokio::test]
    async fn suggestions_and_stats() {
        let state = test_state().await;

        let body = get_json(state.clone(), "/api/products/suggestions?q=ro").await;
        assert_eq!(body["data"]["suggestions"], json!(["Red Rose", "Roses"]));

        let body = get_json(state.clone(), "/api/products/suggestions?q=r").await;
        assert_eq!(body["data"]["suggestions"], json!([]));

        let body = get_json(state, "/api/stats").await;
        assert_eq!(body["data"]["total_products"], 25);
        assert_eq!(body["data"]["in_stock"], 25);
        assert_eq!(body["data"]["price"]["max"], 25.0);
    }

    #[tokio::test]
    async fn unknown_route() {
        let request = Request::builder()
            .uri("/api/nope")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_state().await, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }
}
