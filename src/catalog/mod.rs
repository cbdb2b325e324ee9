//! Product catalog storage / 商品库存储
//!
//! SQLite-backed record source for the search engine, plus the lookup
//! queries the UI needs (supplier, category and subcategory lists,
//! type-ahead suggestions, summary statistics).

pub mod schema;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::collections::HashSet;

use crate::error::StorageError;
use crate::models::{CatalogStats, LabelCount, PriceStats, Product};
use crate::search::filter::ALL_SUPPLIERS;
use crate::search::{FilterQuery, ProductSource, SqlParam};

pub use schema::ensure_schema;

/// Minimum input length before suggestions are looked up / 搜索建议最小长度
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Per-column cap on suggestion candidates
const SUGGESTIONS_PER_COLUMN: i64 = 5;

/// Columns searched for suggestions, in priority order
const SUGGESTION_COLUMNS: [&str; 3] = ["SKU", "Description", "nSubCategory"];

/// SQLite product catalog / SQLite 商品库
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Open a pool on the given database URL / 连接商品库
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let connect_err = |source| StorageError::Connect {
            url: url.to_string(),
            source,
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(url)
            .await
            .map_err(connect_err)?;

        // Avoid lock errors while the import tooling writes / 设置busy_timeout，避免锁超时
        sqlx::query("PRAGMA busy_timeout=5000")
            .execute(&pool)
            .await
            .map_err(connect_err)?;

        tracing::info!("Catalog database opened: {}", url);
        Ok(Self { pool })
    }

    /// Use an existing pool / 使用现有数据库连接池
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool / 关闭数据库连接池
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Number of product rows / 商品总数
    pub async fn product_count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Supplier codes, prefixed with the "ALL" entry / 获取所有供应商列表
    pub async fn suppliers(&self) -> Result<Vec<String>, StorageError> {
        let suppliers: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT SU FROM products WHERE SU IS NOT NULL AND SU != '' ORDER BY SU",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut list = Vec::with_capacity(suppliers.len() + 1);
        list.push(ALL_SUPPLIERS.to_string());
        list.extend(suppliers);
        Ok(list)
    }

    /// Main categories / 获取所有主分类列表
    pub async fn categories(&self) -> Result<Vec<String>, StorageError> {
        let categories = sqlx::query_scalar(
            "SELECT DISTINCT nCategory FROM products \
             WHERE nCategory IS NOT NULL AND nCategory != '' ORDER BY nCategory",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Subcategories of one category / 根据主分类获取子分类列表
    pub async fn subcategories(&self, category: &str) -> Result<Vec<String>, StorageError> {
        let subcategories = sqlx::query_scalar(
            "SELECT DISTINCT nSubCategory FROM products \
             WHERE nCategory = ? AND nSubCategory IS NOT NULL AND nSubCategory != '' \
             ORDER BY nSubCategory",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(subcategories)
    }

    /// Type-ahead suggestions / 获取搜索建议
    ///
    /// Values from SKU, description and subcategory containing `input`,
    /// de-duplicated in column order and capped at `limit`. Input shorter
    /// than [`MIN_SUGGESTION_CHARS`] yields nothing.
    pub async fn suggestions(&self, input: &str, limit: usize) -> Result<Vec<String>, StorageError> {
        let input = input.trim();
        if input.chars().count() < MIN_SUGGESTION_CHARS {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(input));
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for column in SUGGESTION_COLUMNS {
            let sql = format!(
                "SELECT DISTINCT {column} FROM products \
                 WHERE {column} IS NOT NULL AND {column} != '' AND {column} LIKE ? ESCAPE '\\' \
                 ORDER BY {column} LIMIT ?"
            );
            let values: Vec<String> = sqlx::query_scalar(&sql)
                .bind(pattern.as_str())
                .bind(SUGGESTIONS_PER_COLUMN)
                .fetch_all(&self.pool)
                .await?;

            for value in values {
                if seen.insert(value.clone()) {
                    suggestions.push(value);
                }
            }
        }

        suggestions.truncate(limit);
        Ok(suggestions)
    }

    /// Catalog summary / 数据库统计信息
    pub async fn stats(&self) -> Result<CatalogStats, StorageError> {
        let total_products = self.product_count().await?;

        let in_stock = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products \
             WHERE CAST(COALESCE(NULLIF(Stock, ''), 0) AS INTEGER) > 0",
        )
        .fetch_one(&self.pool)
        .await?;

        let out_of_stock =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE StockStatus = 'outofstock'")
                .fetch_one(&self.pool)
                .await?;

        let by_stock_status: Vec<LabelCount> = sqlx::query_as(
            "SELECT COALESCE(StockStatus, '') AS label, COUNT(*) AS count FROM products \
             GROUP BY label ORDER BY count DESC, label",
        )
        .fetch_all(&self.pool)
        .await?;

        let by_category: Vec<LabelCount> = sqlx::query_as(
            "SELECT nCategory AS label, COUNT(*) AS count FROM products \
             WHERE nCategory IS NOT NULL AND nCategory != '' \
             GROUP BY nCategory ORDER BY count DESC, label",
        )
        .fetch_all(&self.pool)
        .await?;

        let (min, avg, max): (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT MIN(price), AVG(price), MAX(price) FROM ( \
                 SELECT CAST(COALESCE(NULLIF(ListPrice, ''), 0) AS REAL) AS price FROM products \
             ) WHERE price > 0",
        )
        .fetch_one(&self.pool)
        .await?;

        let price = match (min, avg, max) {
            (Some(min), Some(avg), Some(max)) => Some(PriceStats { min, avg, max }),
            _ => None,
        };

        Ok(CatalogStats {
            total_products,
            in_stock,
            out_of_stock,
            by_stock_status,
            by_category,
            price,
        })
    }
}

#[async_trait]
impl ProductSource for SqliteCatalog {
    async fn fetch(&self, query: &FilterQuery) -> Result<Vec<Product>, StorageError> {
        let mut q = sqlx::query_as::<_, Product>(&query.sql);
        for param in &query.params {
            q = match param {
                SqlParam::Text(value) => q.bind(value.as_str()),
                SqlParam::Real(value) => q.bind(*value),
            };
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
