//! Error types / 错误类型

use std::path::PathBuf;

/// Storage collaborator failure / 存储层错误
///
/// Search folds these into an empty result page; lookup routes report them.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to open catalog database {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("catalog query failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Configuration file failure / 配置文件错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write config file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
