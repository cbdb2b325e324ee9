//! Product search core / 商品搜索核心
//!
//! - `normalize`: text normalization shared by query and record side
//! - `query`: the `or` / `+` / `-` query mini-language
//! - `matcher`: in-memory postfilter over fetched rows
//! - `filter`: parameterized coarse query for the catalog
//! - `engine`: filter -> fetch -> postfilter -> paginate
//!
//! Nothing here holds state between searches.

pub mod engine;
pub mod filter;
pub mod matcher;
pub mod normalize;
pub mod query;

pub use engine::{paginate, total_pages, PageLimits, ProductSource, SearchEngine};
pub use filter::{FilterQuery, SqlParam};
pub use matcher::{matches, QueryMatcher};
pub use normalize::normalize;
pub use query::{parse, ParsedQuery};
