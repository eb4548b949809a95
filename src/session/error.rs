use thiserror::Error;

use crate::adjust::AdjustError;
use crate::annotate::AnnotateError;
use crate::export::ExportError;
use crate::formats::FormatError;
use crate::model::ModelError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no image is loaded")]
    NoImage,

    #[error("image format error: {0}")]
    Format(#[from] FormatError),

    #[error("channel layout error: {0}")]
    Model(#[from] ModelError),

    #[error("adjustment error: {0}")]
    Adjust(#[from] AdjustError),

    #[error("annotation error: {0}")]
    Annotate(#[from] AnnotateError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}
