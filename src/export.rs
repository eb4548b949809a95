mod csv;
mod error;
mod json;
mod overlay;

#[cfg(test)]
mod tests;

pub use csv::{counts_csv, write_counts_csv};
pub use error::{ExportError, Result};
pub use json::{
    AdjustmentRecord, CountRecord, Document, ImageInfo, MarkerRecord, RoiRecord, annotations_json,
    parse_annotations, write_annotations_json,
};
pub use overlay::render_overlay;
