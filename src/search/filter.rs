//! Coarse filter query builder / 粗筛 SQL 构建
//!
//! Turns a [`ProductFilter`] into a parameterized SELECT against the
//! `products` table. Filter values only ever travel as bound parameters;
//! the SQL text contains column names, operators and `?` placeholders.

use crate::models::ProductFilter;

/// Stand-in for "no upper bound" when a numeric column is empty / 空值上限哨兵
pub const UPPER_SENTINEL: f64 = 999_999.0;

/// Supplier list entry that disables the supplier filter
pub const ALL_SUPPLIERS: &str = "ALL";

/// Columns selected for a [`Product`](crate::models::Product), aliased to its field names.
///
/// Empty-string prices read as absent, empty counters as 0.
pub const PRODUCT_COLUMNS: &str = "\
Code AS code, \
SKU AS sku, \
Description AS description, \
CAST(NULLIF(ListPrice, '') AS REAL) AS list_price, \
CAST(NULLIF(HL, '') AS TEXT) AS size, \
CAST(COALESCE(NULLIF(Qty, ''), 0) AS INTEGER) AS qty, \
CAST(COALESCE(NULLIF(Stock, ''), 0) AS INTEGER) AS stock, \
CAST(COALESCE(NULLIF(Sold, ''), 0) AS INTEGER) AS sold, \
StockStatus AS stock_status, \
nCategory AS category, \
nSubCategory AS subcategory, \
Comment AS comment, \
SU AS supplier";

/// Bound query parameter / 绑定参数
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Real(f64),
}

/// Parameterized query ready for the catalog / 参数化查询
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub sql: String,
    /// In placeholder order
    pub params: Vec<SqlParam>,
}

/// Builds the WHERE clause predicate by predicate / 条件构建器
#[derive(Debug, Default)]
struct Conditions {
    clauses: Vec<String>,
    params: Vec<SqlParam>,
}

impl Conditions {
    fn push(&mut self, clause: impl Into<String>, param: SqlParam) {
        self.clauses.push(clause.into());
        self.params.push(param);
    }

    fn push_in(&mut self, column: &str, values: &[String]) {
        let placeholders = vec!["?"; values.len()].join(", ");
        self.clauses.push(format!("{column} IN ({placeholders})"));
        self.params.extend(values.iter().cloned().map(SqlParam::Text));
    }
}

/// Whether the supplier list actually restricts anything
pub fn supplier_filter_active(suppliers: &[String]) -> bool {
    !suppliers.is_empty() && !suppliers.iter().any(|s| s == ALL_SUPPLIERS)
}

/// Build the coarse query / 构建基础查询
pub fn build(filter: &ProductFilter) -> FilterQuery {
    let mut cond = Conditions::default();

    if supplier_filter_active(&filter.suppliers) {
        cond.push_in("SU", &filter.suppliers);
    }

    // HL is text; empty reads as 0 for the lower bound and as the sentinel for the upper
    if let Some(min) = filter.min_height {
        cond.push(
            "CAST(COALESCE(NULLIF(HL, ''), '0') AS REAL) >= ?",
            SqlParam::Real(min),
        );
    }
    if let Some(max) = filter.max_height {
        cond.push(
            format!("CAST(COALESCE(NULLIF(HL, ''), '{UPPER_SENTINEL}') AS REAL) <= ?"),
            SqlParam::Real(max),
        );
    }

    if let Some(min) = filter.min_price {
        cond.push(
            "CAST(COALESCE(NULLIF(ListPrice, ''), 0) AS REAL) >= ?",
            SqlParam::Real(min),
        );
    }
    if let Some(max) = filter.max_price {
        cond.push(
            format!("CAST(COALESCE(NULLIF(ListPrice, ''), {UPPER_SENTINEL}) AS REAL) <= ?"),
            SqlParam::Real(max),
        );
    }

    if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
        cond.push("nCategory = ?", SqlParam::Text(category.to_string()));
        if !filter.subcategories.is_empty() {
            cond.push_in("nSubCategory", &filter.subcategories);
        }
    }

    let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1=1");
    for clause in &cond.clauses {
        sql.push_str(" AND ");
        sql.push_str(clause);
    }
    sql.push_str(" ORDER BY id");

    FilterQuery {
        sql,
        params: cond.params,
    }
}
