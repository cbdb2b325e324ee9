pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use catalog::SqliteCatalog;
pub use error::{ConfigError, StorageError};
pub use search::SearchEngine;
