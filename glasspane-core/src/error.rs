use glasspane_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid dashboard data: {0}")]
    Invalid(#[from] ModelError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Dashboard data has not finished loading")]
    NotLoaded,

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
