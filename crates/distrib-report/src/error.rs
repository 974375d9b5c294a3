//! Report error types.

use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to render chart: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
