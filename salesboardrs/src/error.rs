use thiserror::Error;

pub type Result<T> = std::result::Result<T, SalesboardError>;

#[derive(Debug, Error)]
pub enum SalesboardError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("execution error: {0}")]
    Execution(String),
    #[error("duckdb error: {0}")]
    DuckDb(#[from] duckdb::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
