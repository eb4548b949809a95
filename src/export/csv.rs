use std::path::Path;

use csv::Writer;

use crate::annotate::RoiStore;
use crate::model::CellTypeConfig;

use super::Result;

/// One row per (ROI, cell type) pair with its count, ROIs in creation order
/// and cell types in definition order. Open ROIs have no counts yet and are
/// skipped.
pub fn counts_csv(rois: &RoiStore, config: &CellTypeConfig) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["ROI", "CellType", "Count"])?;
    for roi in rois.all().iter().filter(|roi| roi.is_closed()) {
        for cell_type in config.all() {
            let count = roi.counts().get(&cell_type.id).copied().unwrap_or(0);
            writer.write_record([
                roi.label.as_str(),
                cell_type.label.as_str(),
                count.to_string().as_str(),
            ])?;
        }
    }
    let buffer = writer.into_inner().map_err(|error| error.into_error())?;
    Ok(String::from_utf8(buffer).expect("csv output is utf-8"))
}

pub fn write_counts_csv(
    path: impl AsRef<Path>,
    rois: &RoiStore,
    config: &CellTypeConfig,
) -> Result<()> {
    let rendered = counts_csv(rois, config)?;
    std::fs::write(path, rendered)?;
    Ok(())
}
