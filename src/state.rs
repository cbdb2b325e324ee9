use inventory_search::config::AppConfig;
use inventory_search::{SearchEngine, SqliteCatalog};

/// Shared request state / 全局共享状态
///
/// Read-only after startup; each request borrows it through `Arc`.
pub struct AppState {
    /// Lookup queries (suppliers, categories, suggestions, stats) / 查询
    pub catalog: SqliteCatalog,
    /// Product search over the same catalog / 搜索引擎
    pub engine: SearchEngine<SqliteCatalog>,
    /// Suggestion cap / 搜索建议上限
    pub suggestion_limit: usize,
}

impl AppState {
    pub fn new(catalog: SqliteCatalog, config: &AppConfig) -> Self {
        let engine = SearchEngine::with_limits(catalog.clone(), config.search.page_limits());
        Self {
            catalog,
            engine,
            suggestion_limit: config.search.suggestion_limit,
        }
    }
}
