use sqlx::SqlitePool;

use crate::error::StorageError;

/// Create the products table and its lookup indexes if missing / 创建商品表
///
/// Existing tables are left untouched; the catalog is populated by the
/// import tooling, not by this service.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            Code TEXT,
            SU TEXT,
            SKU TEXT UNIQUE,
            Description TEXT,
            ListPrice REAL,
            HL TEXT,
            Qty INTEGER,
            Stock INTEGER,
            Sold INTEGER,
            StockStatus TEXT,
            nCategory TEXT,
            nSubCategory TEXT,
            Comment TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_su ON products(SU)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_products_category ON products(nCategory, nSubCategory)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
