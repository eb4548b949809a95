use super::{AnnotateError, Marker, MarkerStore, Result};

/// A reversible marker edit. Each command carries the full marker record, so
/// it can invert itself without consulting any other state.
#[derive(Debug, Clone)]
pub enum Command {
    AddMarker(Marker),
    RemoveMarker(Marker),
}

impl Command {
    fn apply(&self, markers: &mut MarkerStore) -> Result<()> {
        match self {
            Command::AddMarker(marker) => {
                markers.insert(*marker);
                Ok(())
            }
            Command::RemoveMarker(marker) => markers.remove(marker.id).map(|_| ()),
        }
    }

    fn invert(&self, markers: &mut MarkerStore) -> Result<()> {
        match self {
            Command::AddMarker(marker) => markers.remove(marker.id).map(|_| ()),
            Command::RemoveMarker(marker) => {
                markers.insert(*marker);
                Ok(())
            }
        }
    }
}

/// Linear undo log with a cursor. Recording after an undo discards the
/// entries beyond the cursor; there is no redo tree.
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    entries: Vec<Command>,
    cursor: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, markers: &mut MarkerStore, command: Command) -> Result<()> {
        command.apply(markers)?;
        self.entries.truncate(self.cursor);
        self.entries.push(command);
        self.cursor += 1;
        Ok(())
    }

    pub fn undo(&mut self, markers: &mut MarkerStore) -> Result<()> {
        if self.cursor == 0 {
            return Err(AnnotateError::NothingToUndo);
        }
        self.entries[self.cursor - 1].invert(markers)?;
        self.cursor -= 1;
        Ok(())
    }

    pub fn redo(&mut self, markers: &mut MarkerStore) -> Result<()> {
        if self.cursor == self.entries.len() {
            return Err(AnnotateError::NothingToRedo);
        }
        self.entries[self.cursor].apply(markers)?;
        self.cursor += 1;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
