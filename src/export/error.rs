use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid annotation document: {0}")]
    InvalidDocument(String),
}
