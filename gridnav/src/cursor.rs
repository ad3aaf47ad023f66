use std::cell::Cell;

use crate::engine::CellCoord;

/// Records the cell coordinate that most recently received focus.
///
/// The cursor is written only when a tracked cell observes focus arriving,
/// never by the navigation computation itself, so it always reflects where
/// focus genuinely landed.
#[derive(Debug, Default)]
pub struct CursorTracker {
    current: Cell<Option<CellCoord>>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, coord: CellCoord) {
        log::trace!("[cursor] at ({}, {})", coord.row, coord.column);
        self.current.set(Some(coord));
    }

    pub fn current(&self) -> Option<CellCoord> {
        self.current.get()
    }

    pub fn clear(&self) {
        self.current.set(None);
    }
}
