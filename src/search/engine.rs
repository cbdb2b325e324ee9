//! Search orchestration / 搜索流程
//!
//! coarse filter (catalog) -> text postfilter (memory) -> count -> page.
//! Every call takes its page explicitly; nothing is kept between calls.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{Product, ProductFilter, SearchPage};

use super::filter::{self, FilterQuery};
use super::matcher::QueryMatcher;
use super::query;

/// Record source the engine reads from / 商品数据源
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch every row matching the coarse query, in catalog order
    async fn fetch(&self, query: &FilterQuery) -> Result<Vec<Product>, StorageError>;
}

/// Page size bounds / 分页限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_per_page: i64,
    pub max_per_page: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            max_per_page: 100,
        }
    }
}

impl PageLimits {
    /// Clamp page to >= 1; replace an out-of-range page size with the default
    pub fn clamp(&self, page: i64, per_page: i64) -> (i64, i64) {
        let page = page.max(1);
        let per_page = if (1..=self.max_per_page).contains(&per_page) {
            per_page
        } else {
            self.default_per_page
        };
        (page, per_page)
    }
}

/// Slice one page out of the retained rows / 分页
///
/// `per_page <= 0` returns everything as a single page.
pub fn paginate<T>(rows: Vec<T>, page: i64, per_page: i64) -> Vec<T> {
    if per_page <= 0 {
        return rows;
    }
    let start = usize::try_from((page.max(1) - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
    let len = usize::try_from(per_page).unwrap_or(usize::MAX);
    rows.into_iter().skip(start).take(len).collect()
}

/// ceil(total / per_page), or 1 when per_page is not positive
pub fn total_pages(total_count: usize, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 1;
    }
    let total = i64::try_from(total_count).unwrap_or(i64::MAX);
    (total + per_page - 1) / per_page
}

/// Search engine over a product source / 商品搜索引擎
pub struct SearchEngine<S> {
    source: S,
    limits: PageLimits,
}

impl<S: ProductSource> SearchEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_limits(source, PageLimits::default())
    }

    pub fn with_limits(source: S, limits: PageLimits) -> Self {
        Self { source, limits }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Run one search / 搜索产品
    ///
    /// Never fails: a storage error comes back as an empty page with `error` set.
    pub async fn search(
        &self,
        filter: &ProductFilter,
        search_query: &str,
        page: i64,
        per_page: i64,
    ) -> SearchPage {
        let (page, per_page) = self.limits.clamp(page, per_page);

        let coarse = filter::build(filter);
        tracing::debug!(sql = %coarse.sql, params = coarse.params.len(), "coarse product query");

        let rows = match self.source.fetch(&coarse).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Product search failed: {}", e);
                return SearchPage::failed(page, per_page, e.to_string());
            }
        };
        let fetched = rows.len();

        let retained: Vec<Product> = if search_query.trim().is_empty() {
            rows
        } else {
            let parsed = query::parse(search_query);
            tracing::debug!(?parsed, "parsed search query");
            let matcher = QueryMatcher::new(&parsed);
            rows.into_iter().filter(|p| matcher.matches(p)).collect()
        };

        let total_count = retained.len();
        tracing::debug!(fetched, total_count, page, per_page, "product search done");

        SearchPage {
            products: paginate(retained, page, per_page),
            total_count,
            page,
            per_page,
            total_pages: total_pages(total_count, per_page),
            error: None,
        }
    }
}
