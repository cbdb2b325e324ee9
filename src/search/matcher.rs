//! In-memory text postfilter / 关键词后置过滤
//!
//! Runs over rows the catalog already returned for the coarse filters. No
//! storage access happens here.

use crate::models::Product;

use super::normalize::{normalize, normalize_opt};
use super::query::ParsedQuery;

/// Concatenated, normalized searchable columns of a product / 可搜索文本
///
/// SKU, code, description and subcategory, space-joined before
/// normalization. Normalization drops the spaces, so a term may span two
/// adjacent columns.
pub fn searchable_text(product: &Product) -> String {
    let fields = [
        product.sku.as_deref(),
        product.code.as_deref(),
        product.description.as_deref(),
        product.subcategory.as_deref(),
    ];
    // normalization is per character, so normalizing each column and
    // concatenating equals normalizing the space-joined text
    fields.iter().map(|f| normalize_opt(*f)).collect()
}

/// Query with its terms normalized once, reused across rows / 预处理后的查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMatcher {
    Simple(Vec<String>),
    Or(Vec<String>),
    And(Vec<String>),
    Not { include: String, exclude: String },
}

impl QueryMatcher {
    pub fn new(query: &ParsedQuery) -> Self {
        let normalize_all =
            |terms: &[String]| -> Vec<String> { terms.iter().map(|t| normalize(t)).collect() };
        match query {
            ParsedQuery::Simple { terms } => QueryMatcher::Simple(normalize_all(terms)),
            ParsedQuery::Or { terms } => QueryMatcher::Or(normalize_all(terms)),
            ParsedQuery::And { terms } => QueryMatcher::And(normalize_all(terms)),
            ParsedQuery::Not { include, exclude } => QueryMatcher::Not {
                include: normalize(include),
                exclude: normalize(exclude),
            },
        }
    }

    /// Check a product / 检查产品是否匹配搜索条件
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_text(&searchable_text(product))
    }

    /// Check already-normalized text
    pub fn matches_text(&self, text: &str) -> bool {
        let found = |term: &String| !term.is_empty() && text.contains(term.as_str());
        match self {
            QueryMatcher::Simple(terms) => terms.is_empty() || terms.iter().any(found),
            QueryMatcher::Or(terms) => terms.iter().any(found),
            QueryMatcher::And(terms) => terms.iter().all(found),
            QueryMatcher::Not { include, exclude } => {
                found(include) && (exclude.is_empty() || !text.contains(exclude.as_str()))
            }
        }
    }
}

/// One-shot match of a product against a parsed query
pub fn matches(product: &Product, query: &ParsedQuery) -> bool {
    QueryMatcher::new(query).matches(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::parse;

    fn bouquet() -> Product {
        Product {
            code: Some("FL-001".to_string()),
            sku: Some("RRB40".to_string()),
            description: Some("Red Rose Bouquet".to_string()),
            subcategory: Some("Roses".to_string()),
            ..Product::default()
        }
    }

    #[test]
    fn test_searchable_text() {
        assert_eq!(searchable_text(&bouquet()), "rrb40fl001redrosebouquetroses");
        assert_eq!(searchable_text(&Product::default()), "");
    }

    #[test]
    fn test_empty_query_matches_anything() {
        assert!(matches(&bouquet(), &parse("")));
        assert!(matches(&Product::default(), &parse("   ")));
    }

    #[test]
    fn test_simple() {
        let p = bouquet();
        assert!(matches(&p, &parse("rose")));
        assert!(matches(&p, &parse("ROSE BOUQUET")));
        assert!(matches(&p, &parse("fl001")));
        assert!(!matches(&p, &parse("tulip")));
        // term that normalizes to nothing never matches
        assert!(!matches(&p, &parse("!!!")));
    }

    #[test]
    fn test_or() {
        let p = bouquet();
        assert!(matches(&p, &parse("tulip or rose")));
        assert!(!matches(&p, &parse("tulip or lily")));
        assert!(!QueryMatcher::Or(Vec::new()).matches(&p));
    }

    #[test]
    fn test_and() {
        let p = bouquet();
        assert!(matches(&p, &parse("red+rose")));
        assert!(!matches(&p, &parse("red+white")));
        assert!(QueryMatcher::And(Vec::new()).matches(&p));
        assert!(!QueryMatcher::And(vec!["red".to_string(), String::new()]).matches(&p));
    }

    #[test]
    fn test_not() {
        let p = bouquet();
        assert!(matches(&p, &parse("rose-white")));
        assert!(!matches(&p, &parse("rose -red")));
        assert!(matches(&p, &parse("rose-")));
        // exclude only matters when include matched
        assert!(!matches(&p, &parse("tulip-white")));
        assert!(!matches(&p, &parse("-red")));
    }

    #[test]
    fn test_and_query_keeps_dash_literal() {
        let p = Product {
            description: Some("Rose Bouquet red-white".to_string()),
            ..Product::default()
        };
        // parsed as AND of "rose" and "red-white", which normalizes to "redwhite"
        assert!(matches(&p, &parse("rose+red-white")));
    }

    #[test]
    fn test_term_may_span_columns() {
        let p = Product {
            sku: Some("ab".to_string()),
            code: Some("cd".to_string()),
            ..Product::default()
        };
        assert!(matches(&p, &parse("bc")));
    }
}
