mod counting;
mod error;
mod history;
mod marker;
mod roi;


pub use counting::CountingEngine;
pub use error::{AnnotateError, Result};
pub use history::{Command, HistoryManager};
pub use marker::{Marker, MarkerId, MarkerStore};
pub use roi::{CountSummary, Roi, RoiId, RoiStore};
