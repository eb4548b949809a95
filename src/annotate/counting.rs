use crate::model::CellTypeConfig;

use super::{CountSummary, MarkerStore, Roi, RoiStore};

/// Recomputes per-ROI, per-type counts from scratch on every change;
/// summaries are never patched incrementally.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingEngine;

impl CountingEngine {
    pub fn recompute(&self, roi: &mut Roi, markers: &MarkerStore, config: &CellTypeConfig) {
        let mut counts = CountSummary::new();
        for cell_type in config.all() {
            counts.insert(cell_type.id, 0);
        }

        // The bounding box only prunes; the polygon test still decides.
        if let Some(bounds) = roi.bounding_box() {
            for marker in markers.all() {
                if !config.contains(marker.type_id) {
                    continue;
                }
                if !bounds.contains(marker.position) {
                    continue;
                }
                if roi.contains(marker.position) {
                    *counts.entry(marker.type_id).or_insert(0) += 1;
                }
            }
        }

        roi.set_counts(counts);
    }

    pub fn recompute_all(
        &self,
        rois: &mut RoiStore,
        markers: &MarkerStore,
        config: &CellTypeConfig,
    ) {
        for roi in rois.all_mut() {
            self.recompute(roi, markers, config);
        }
    }
}
