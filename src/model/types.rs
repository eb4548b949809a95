use serde::{Deserialize, Serialize};

pub type CellTypeId = u32;

/// Closed set of marker glyphs, selected by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerShape {
    Dot,
    #[default]
    Circle,
    Square,
    Triangle,
    Cross,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellType {
    pub id: CellTypeId,
    pub label: String,
    pub color: [u8; 3],
    pub shape: MarkerShape,
    pub size: u32,
}

/// Session-owned cell type registry. Definition order is the deterministic
/// ordering for exports; stores and the counting engine receive a reference,
/// never a global.
#[derive(Debug, Clone, Default)]
pub struct CellTypeConfig {
    types: Vec<CellType>,
    next_id: CellTypeId,
}

impl CellTypeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        config.add("Type 1", [255, 100, 100], MarkerShape::Circle, 20);
        config.add("Type 2", [100, 255, 100], MarkerShape::Circle, 20);
        config
    }

    pub fn add(
        &mut self,
        label: impl Into<String>,
        color: [u8; 3],
        shape: MarkerShape,
        size: u32,
    ) -> CellTypeId {
        let id = self.next_id;
        self.next_id += 1;
        self.types.push(CellType {
            id,
            label: label.into(),
            color,
            shape,
            size,
        });
        id
    }

    pub fn remove(&mut self, id: CellTypeId) -> Option<CellType> {
        let index = self.types.iter().position(|cell_type| cell_type.id == id)?;
        Some(self.types.remove(index))
    }

    pub fn get(&self, id: CellTypeId) -> Option<&CellType> {
        self.types.iter().find(|cell_type| cell_type.id == id)
    }

    pub fn by_label(&self, label: &str) -> Option<&CellType> {
        self.types.iter().find(|cell_type| cell_type.label == label)
    }

    pub fn contains(&self, id: CellTypeId) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> &[CellType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
