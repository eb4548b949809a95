use thiserror::Error;

use crate::model::CellTypeId;

use super::{MarkerId, RoiId};

pub type Result<T> = std::result::Result<T, AnnotateError>;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("no marker with id {id}")]
    MarkerNotFound { id: MarkerId },

    #[error("no ROI with id {id}")]
    RoiNotFound { id: RoiId },

    #[error("ROI {id} is already closed")]
    RoiClosed { id: RoiId },

    #[error("ROI {id} has {count} vertices; closing requires at least 3")]
    TooFewVertices { id: RoiId, count: usize },

    #[error("no cell type with id {id}")]
    UnknownCellType { id: CellTypeId },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}
