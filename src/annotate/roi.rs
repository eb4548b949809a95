use std::collections::BTreeMap;

use crate::model::{BoundingBox, CellTypeId, Point, polygon_contains};

use super::{AnnotateError, Result};

pub type RoiId = u64;

/// Derived per-ROI counts keyed by cell type. Always recomputed wholesale,
/// never patched incrementally.
pub type CountSummary = BTreeMap<CellTypeId, u64>;

#[derive(Debug, Clone)]
pub struct Roi {
    pub id: RoiId,
    pub label: String,
    vertices: Vec<Point>,
    closed: bool,
    counts: CountSummary,
}

impl Roi {
    fn new(id: RoiId, label: String) -> Self {
        Self {
            id,
            label,
            vertices: Vec::new(),
            closed: false,
            counts: CountSummary::new(),
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn counts(&self) -> &CountSummary {
        &self.counts
    }

    pub(crate) fn set_counts(&mut self, counts: CountSummary) {
        self.counts = counts;
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_vertices(&self.vertices)
    }

    pub fn contains(&self, point: Point) -> bool {
        polygon_contains(&self.vertices, self.closed, point)
    }
}

/// Ordered ROI collection. ROI edits commit immediately and stay outside
/// the marker undo history.
#[derive(Debug, Clone, Default)]
pub struct RoiStore {
    rois: Vec<Roi>,
    next_id: RoiId,
}

impl RoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, label: impl Into<String>) -> RoiId {
        let id = self.next_id;
        self.next_id += 1;
        let mut label = label.into();
        if label.is_empty() {
            label = format!("ROI {}", id + 1);
        }
        self.rois.push(Roi::new(id, label));
        id
    }

    pub fn add_vertex(&mut self, id: RoiId, point: Point) -> Result<()> {
        let roi = self.get_mut(id)?;
        if roi.closed {
            return Err(AnnotateError::RoiClosed { id });
        }
        roi.vertices.push(point);
        Ok(())
    }

    pub fn close(&mut self, id: RoiId) -> Result<()> {
        let roi = self.get_mut(id)?;
        if roi.closed {
            return Err(AnnotateError::RoiClosed { id });
        }
        if roi.vertices.len() < 3 {
            return Err(AnnotateError::TooFewVertices {
                id,
                count: roi.vertices.len(),
            });
        }
        roi.closed = true;
        Ok(())
    }

    pub fn remove(&mut self, id: RoiId) -> Result<Roi> {
        let index = self
            .rois
            .iter()
            .position(|roi| roi.id == id)
            .ok_or(AnnotateError::RoiNotFound { id })?;
        Ok(self.rois.remove(index))
    }

    /// Reinstates a closed ROI from an imported document, preserving its
    /// vertex list and label. Counts start empty until the next recompute.
    pub(crate) fn restore(&mut self, label: String, vertices: Vec<Point>) -> Result<RoiId> {
        if vertices.len() < 3 {
            return Err(AnnotateError::TooFewVertices {
                id: self.next_id,
                count: vertices.len(),
            });
        }
        let id = self.begin(label);
        for point in vertices {
            self.add_vertex(id, point)?;
        }
        self.close(id)?;
        Ok(id)
    }

    pub(crate) fn clear(&mut self) {
        self.rois.clear();
    }

    pub fn get(&self, id: RoiId) -> Option<&Roi> {
        self.rois.iter().find(|roi| roi.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: RoiId) -> Result<&mut Roi> {
        self.rois
            .iter_mut()
            .find(|roi| roi.id == id)
            .ok_or(AnnotateError::RoiNotFound { id })
    }

    pub fn all(&self) -> &[Roi] {
        &self.rois
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Roi] {
        &mut self.rois
    }

    /// First closed ROI containing `point`, in creation order.
    pub fn find_at(&self, point: Point) -> Option<RoiId> {
        self.rois
            .iter()
            .find(|roi| roi.closed && roi.contains(point))
            .map(|roi| roi.id)
    }

    pub fn len(&self) -> usize {
        self.rois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rois.is_empty()
    }
}
