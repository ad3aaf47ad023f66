//! Pure coordinate math for grid navigation. No document access here; the
//! caller supplies the focusability profile and bounds and gets back the
//! coordinate a move lands on, if any.

/// Position of a cell in the grid, in visible-column coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The band of coordinates navigation may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridBounds {
    /// First column horizontal moves may rest on. A selection column is
    /// excluded, so this is 1 when one is shown.
    pub min_column: usize,
    /// Last visible column index.
    pub max_column: usize,
    /// Last row index.
    pub max_row: usize,
}

impl GridBounds {
    pub fn derive(focusability: &[bool], has_selection_column: bool, row_count: usize) -> Self {
        Self {
            min_column: usize::from(has_selection_column),
            max_column: focusability.len().saturating_sub(1),
            max_row: row_count.saturating_sub(1),
        }
    }
}

/// Compute where a single arrow move lands from `current`.
///
/// Vertical deltas clamp to the row band and keep the column. Horizontal
/// deltas keep the row untouched, stale or not, and step column by column
/// in the move's direction until a focusable column is found; a scan that
/// walks past the edge of the column band abandons the move. Returns
/// `None` when the move is abandoned or lands on the coordinate it
/// started from.
pub fn shift_target(
    current: CellCoord,
    vertical: i8,
    horizontal: i8,
    bounds: GridBounds,
    focusability: &[bool],
) -> Option<CellCoord> {
    let min = bounds.min_column as i64;
    let max = bounds.max_column as i64;

    let mut row = current.row as i64;
    if vertical != 0 {
        row = (row + i64::from(vertical)).clamp(0, bounds.max_row as i64);
    }

    let mut column = current.column as i64;
    if horizontal != 0 {
        while (min..=max).contains(&column) {
            column += i64::from(horizontal);
            if column >= 0 && focusability.get(column as usize).copied().unwrap_or(false) {
                break;
            }
        }
        if !(min..=max).contains(&column) {
            log::debug!("[navigate] no focusable column in direction {horizontal}, move abandoned");
            return None;
        }
    }

    let target = CellCoord::new(row as usize, column as usize);
    (target != current).then_some(target)
}
