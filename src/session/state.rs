use std::path::Path;

use image::RgbImage;

use crate::adjust::{ChannelAdjustments, ImageChannelBuffer};
use crate::annotate::{
    AnnotateError, Command, CountingEngine, HistoryManager, Marker, MarkerId, MarkerStore, RoiId,
    RoiStore,
};
use crate::export;
use crate::model::{CellTypeConfig, CellTypeId, ChannelImage, MarkerShape, Point};

use super::{Result, SessionError};

/// The engine facade consumed by the GUI collaborator. Owns the cell type
/// configuration, both stores, the history log and the channel buffer; every
/// marker mutation is routed through history so it stays undoable.
///
/// All operations are synchronous. Image decoding happens outside the
/// session (`formats::read_image` is a pure function), so a caller may run it
/// on a worker thread and attach the finished buffer atomically.
#[derive(Debug, Default)]
pub struct Session {
    config: CellTypeConfig,
    markers: MarkerStore,
    rois: RoiStore,
    history: HistoryManager,
    counting: CountingEngine,
    buffer: Option<ImageChannelBuffer>,
}

impl Session {
    pub fn new(config: CellTypeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_default_types() -> Self {
        Self::new(CellTypeConfig::with_defaults())
    }

    /// Swaps in a freshly decoded image and resets all annotation state,
    /// keeping the configured cell types.
    pub fn attach_image(&mut self, image: ChannelImage) {
        log::info!(
            "attaching {}x{} image with {} channels",
            image.width(),
            image.height(),
            image.channels().len()
        );
        self.buffer = Some(ImageChannelBuffer::new(image));
        self.markers.clear();
        self.rois.clear();
        self.history.clear();
    }

    pub fn has_image(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn image(&self) -> Option<&ChannelImage> {
        self.buffer.as_ref().map(|buffer| buffer.image())
    }

    fn buffer(&self) -> Result<&ImageChannelBuffer> {
        self.buffer.as_ref().ok_or(SessionError::NoImage)
    }

    fn buffer_mut(&mut self) -> Result<&mut ImageChannelBuffer> {
        self.buffer.as_mut().ok_or(SessionError::NoImage)
    }

    pub fn config(&self) -> &CellTypeConfig {
        &self.config
    }

    pub fn add_cell_type(
        &mut self,
        label: impl Into<String>,
        color: [u8; 3],
        shape: MarkerShape,
        size: u32,
    ) -> CellTypeId {
        self.config.add(label, color, shape, size)
    }

    /// Removes a cell type together with its markers. The removals bypass
    /// the undo log, so the whole history is cleared.
    pub fn remove_cell_type(&mut self, id: CellTypeId) -> Result<()> {
        self.config
            .remove(id)
            .ok_or(AnnotateError::UnknownCellType { id })?;
        let doomed = self
            .markers
            .all()
            .iter()
            .filter(|marker| marker.type_id == id)
            .map(|marker| marker.id)
            .collect::<Vec<_>>();
        for marker_id in doomed {
            self.markers.remove(marker_id)?;
        }
        self.history.clear();
        self.recount();
        Ok(())
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    pub fn place_marker(&mut self, position: Point, type_id: CellTypeId) -> Result<MarkerId> {
        self.buffer()?;
        if !self.config.contains(type_id) {
            return Err(AnnotateError::UnknownCellType { id: type_id }.into());
        }
        let marker = Marker {
            id: self.markers.allocate_id(),
            position,
            type_id,
        };
        self.history
            .record(&mut self.markers, Command::AddMarker(marker))?;
        self.recount();
        log::debug!("placed marker {} at ({}, {})", marker.id, position.x, position.y);
        Ok(marker.id)
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Result<()> {
        let marker = *self
            .markers
            .get(id)
            .ok_or(AnnotateError::MarkerNotFound { id })?;
        self.history
            .record(&mut self.markers, Command::RemoveMarker(marker))?;
        self.recount();
        Ok(())
    }

    /// Removes every marker, one undoable command per marker.
    pub fn clear_markers(&mut self) -> Result<()> {
        let doomed = self.markers.all().to_vec();
        for marker in doomed {
            self.history
                .record(&mut self.markers, Command::RemoveMarker(marker))?;
        }
        self.recount();
        Ok(())
    }

    pub fn marker_at(&self, point: Point, radius: f64) -> Option<MarkerId> {
        self.markers.find_at(point, radius)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.markers)?;
        self.recount();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.markers)?;
        self.recount();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn rois(&self) -> &RoiStore {
        &self.rois
    }

    pub fn begin_roi(&mut self, label: impl Into<String>) -> Result<RoiId> {
        self.buffer()?;
        Ok(self.rois.begin(label))
    }

    pub fn add_roi_vertex(&mut self, id: RoiId, point: Point) -> Result<()> {
        self.rois.add_vertex(id, point)?;
        Ok(())
    }

    pub fn close_roi(&mut self, id: RoiId) -> Result<()> {
        self.rois.close(id)?;
        self.recount();
        Ok(())
    }

    /// Drops an ROI regardless of whether it is still open; an open ROI is
    /// how a drawing in progress gets cancelled.
    pub fn remove_roi(&mut self, id: RoiId) -> Result<()> {
        self.rois.remove(id)?;
        self.recount();
        Ok(())
    }

    pub fn roi_at(&self, point: Point) -> Option<RoiId> {
        self.rois.find_at(point)
    }

    pub fn adjustments(&self, channel: usize) -> Result<ChannelAdjustments> {
        Ok(self.buffer()?.adjustments(channel)?)
    }

    pub fn set_adjustments(&mut self, channel: usize, params: ChannelAdjustments) -> Result<()> {
        self.buffer_mut()?.set_adjustments(channel, params)?;
        Ok(())
    }

    pub fn set_channel_visible(&mut self, channel: usize, visible: bool) -> Result<()> {
        self.buffer_mut()?.set_visible(channel, visible)?;
        Ok(())
    }

    pub fn reset_adjustments(&mut self) -> Result<()> {
        self.buffer_mut()?.reset_adjustments();
        Ok(())
    }

    pub fn composite(&mut self) -> Result<&RgbImage> {
        Ok(self.buffer_mut()?.composite())
    }

    pub fn export_csv(&self) -> Result<String> {
        Ok(export::counts_csv(&self.rois, &self.config)?)
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        export::write_counts_csv(path.as_ref(), &self.rois, &self.config)?;
        log::info!("wrote count table to {}", path.as_ref().display());
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(export::annotations_json(
            self.buffer.as_ref(),
            &self.markers,
            &self.rois,
            &self.config,
        )?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        export::write_annotations_json(
            path.as_ref(),
            self.buffer.as_ref(),
            &self.markers,
            &self.rois,
            &self.config,
        )?;
        log::info!("wrote annotations to {}", path.as_ref().display());
        Ok(())
    }

    pub fn export_overlay(&mut self) -> Result<RgbImage> {
        let composite = self.buffer_mut()?.composite().clone();
        Ok(export::render_overlay(
            &composite,
            &self.markers,
            &self.rois,
            &self.config,
        ))
    }

    pub fn write_overlay(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let overlay = self.export_overlay()?;
        overlay
            .save(path.as_ref())
            .map_err(export::ExportError::from)?;
        log::info!("wrote overlay image to {}", path.as_ref().display());
        Ok(())
    }

    /// Restores markers, ROIs and adjustments from an exported document.
    /// The document is validated and staged completely before any store is
    /// touched, so a malformed input leaves the session unchanged. History
    /// is cleared; imported edits predate this session.
    pub fn import_annotations(&mut self, raw: &str) -> Result<()> {
        let document = export::parse_annotations(raw)?;

        let mut rois = RoiStore::new();
        for record in &document.rois {
            let vertices = record
                .vertices
                .iter()
                .map(|[x, y]| Point::new(*x, *y))
                .collect::<Vec<_>>();
            rois.restore(record.label.clone(), vertices)?;
        }

        let staged_adjustments = document
            .adjustments
            .iter()
            .map(|record| {
                let params = ChannelAdjustments {
                    brightness: record.brightness,
                    contrast: record.contrast,
                    noise_reduction: record.noise_reduction,
                    visible: record.visible,
                };
                params.validate().map(|()| params)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Everything validated; from here on nothing can fail.
        let mut markers = MarkerStore::new();
        for record in &document.markers {
            let type_id = match self.config.by_label(&record.cell_type) {
                Some(cell_type) => cell_type.id,
                None => self.config.add(
                    record.cell_type.clone(),
                    [255, 255, 255],
                    MarkerShape::Circle,
                    20,
                ),
            };
            let marker = Marker {
                id: markers.allocate_id(),
                position: Point::new(record.x, record.y),
                type_id,
            };
            markers.insert(marker);
        }

        self.markers = markers;
        self.rois = rois;
        self.history.clear();

        if let Some(buffer) = self.buffer.as_mut() {
            let channel_count = buffer.image().channels().len();
            for (channel, params) in staged_adjustments
                .into_iter()
                .take(channel_count)
                .enumerate()
            {
                buffer
                    .set_adjustments(channel, params)
                    .expect("validated above");
            }
        }

        self.recount();
        log::info!(
            "imported {} markers and {} ROIs",
            self.markers.len(),
            self.rois.len()
        );
        Ok(())
    }

    fn recount(&mut self) {
        self.counting
            .recompute_all(&mut self.rois, &self.markers, &self.config);
    }
}
