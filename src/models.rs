use serde::{Deserialize, Serialize};

/// Catalog product row / 商品记录
///
/// Identifier and text columns may be NULL in the catalog. `size` is the
/// height/length column, kept as text the way it is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Supplier product code / 供应商代码
    pub code: Option<String>,
    /// Stock-keeping unit / SKU
    pub sku: Option<String>,
    pub description: Option<String>,
    /// List price, `None` when unset / 标价
    pub list_price: Option<f64>,
    /// Height or length / 高度/长度
    pub size: Option<String>,
    pub qty: i64,
    pub stock: i64,
    pub sold: i64,
    pub stock_status: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub comment: Option<String>,
    /// Supplier code / 供应商
    pub supplier: Option<String>,
}

/// Coarse filters pushed down to the catalog / 粗筛条件
///
/// Every field is optional; an empty list means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Supplier allow-list; empty or containing `"ALL"` disables it
    #[serde(default)]
    pub suppliers: Vec<String>,
    #[serde(default)]
    pub min_height: Option<f64>,
    #[serde(default)]
    pub max_height: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    /// Only applied together with `category`
    #[serde(default)]
    pub subcategories: Vec<String>,
}

/// One page of search results / 搜索结果分页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    pub products: Vec<Product>,
    /// Matches across all pages / 总记录数
    pub total_count: usize,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchPage {
    /// Empty page carrying a storage failure / 出错时返回的空结果
    pub fn failed(page: i64, per_page: i64, error: impl Into<String>) -> Self {
        Self {
            products: Vec::new(),
            total_count: 0,
            page,
            per_page,
            total_pages: 0,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Count of products sharing one label / 分组计数
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Catalog summary / 商品库统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_products: i64,
    /// Products with stock > 0 / 有库存商品数
    pub in_stock: i64,
    /// Products whose status is `outofstock` / 缺货商品数
    pub out_of_stock: i64,
    pub by_stock_status: Vec<LabelCount>,
    pub by_category: Vec<LabelCount>,
    /// Over positive prices only
    pub price: Option<PriceStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}
