use serde::{Deserialize, Serialize};

use crate::model::{CellTypeId, Point};

use super::{AnnotateError, Result};

pub type MarkerId = u64;

/// One placed count marker. The position is immutable once created;
/// re-placement is a delete plus a create.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Point,
    pub type_id: CellTypeId,
}

/// Insertion-ordered marker collection. Ids are monotonic, so ordering by id
/// is creation order; reinsertion during undo keeps that order intact.
///
/// Mutation is only ever driven through history commands; callers outside the
/// history machinery must treat this store as read-only.
#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    next_id: MarkerId,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate_id(&mut self) -> MarkerId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn insert(&mut self, marker: Marker) {
        self.next_id = self.next_id.max(marker.id + 1);
        let position = self
            .markers
            .partition_point(|existing| existing.id < marker.id);
        self.markers.insert(position, marker);
    }

    pub(crate) fn remove(&mut self, id: MarkerId) -> Result<Marker> {
        let index = self
            .markers
            .iter()
            .position(|marker| marker.id == id)
            .ok_or(AnnotateError::MarkerNotFound { id })?;
        Ok(self.markers.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    pub fn by_type(&self, type_id: CellTypeId) -> impl Iterator<Item = &Marker> {
        self.markers
            .iter()
            .filter(move |marker| marker.type_id == type_id)
    }

    /// Nearest marker within `radius` of `point`, if any.
    pub fn find_at(&self, point: Point, radius: f64) -> Option<MarkerId> {
        self.markers
            .iter()
            .map(|marker| (marker.id, marker.position.distance_to(point)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|(_, left), (_, right)| left.total_cmp(right))
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
