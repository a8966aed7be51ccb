use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("failed to read or write config file")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid json")]
    Parse(#[from] serde_json::Error),
}

/// Startup and shutdown failures for the core runtime handle.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("fatal database error")]
    Db(#[from] DbErr),
}
