//! Arrow-key navigation between editable grid cells.
//!
//! `FocusNavigation` wires three things onto a grid container: a focus-in
//! observer on every cell in a focusable column (they keep the cursor
//! honest), one keydown listener on the container (it computes and performs
//! moves), and an inline-editing guard that stands navigation down while a
//! cell editor is open.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use griddom::{Event, EventKind, EventResult, GridDom, Key, ListenerGuard};

use crate::columns::{ColumnDef, resolve_focusability};
use crate::cursor::CursorTracker;
use crate::engine::{CellCoord, GridBounds, shift_target};
use crate::{locate, transfer};

/// Data key that marks the subtree hosting inline cell editors. A value of
/// `"true"` anywhere in the grid means an editor is open.
pub const EDITING_ACTIVE_DATA: &str = "inline-editing-active";

/// State shared between the navigation handle and its listeners.
struct NavState {
    container: String,
    cursor: CursorTracker,
    focusability: RefCell<Vec<bool>>,
    bounds: Cell<GridBounds>,
}

pub struct FocusNavigation {
    state: Rc<NavState>,
    /// Focus-in observers, one per tracked cell. Rebuilt on every sync.
    observers: HashMap<CellCoord, ListenerGuard>,
    keydown: Option<ListenerGuard>,
    /// Inputs the focusability profile was last resolved from.
    resolved_for: Option<(Vec<ColumnDef>, bool)>,
}

impl FocusNavigation {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            state: Rc::new(NavState {
                container: container.into(),
                cursor: CursorTracker::new(),
                focusability: RefCell::new(Vec::new()),
                bounds: Cell::new(GridBounds::default()),
            }),
            observers: HashMap::new(),
            keydown: None,
            resolved_for: None,
        }
    }

    /// Bring the registration in line with the grid as currently rendered.
    /// Call after every render that may have changed rows, columns, or the
    /// container itself.
    pub fn sync(
        &mut self,
        dom: &GridDom,
        columns: &[ColumnDef],
        has_selection_column: bool,
        row_count: usize,
    ) {
        // Re-resolve the focusability profile only when its inputs changed.
        let unchanged = self
            .resolved_for
            .as_ref()
            .is_some_and(|(cols, selection)| {
                cols.as_slice() == columns && *selection == has_selection_column
            });
        if !unchanged {
            *self.state.focusability.borrow_mut() =
                resolve_focusability(columns, has_selection_column);
            self.resolved_for = Some((columns.to_vec(), has_selection_column));
        }
        self.state.bounds.set(GridBounds::derive(
            &self.state.focusability.borrow(),
            has_selection_column,
            row_count,
        ));

        // The previous registration is dropped wholesale and rebuilt against
        // the current document.
        self.observers.clear();
        self.keydown = None;

        if !dom.contains(&self.state.container) {
            log::debug!(
                "[navigate] container {} not in document, registration skipped",
                self.state.container
            );
            return;
        }

        let mut tracked: Vec<(CellCoord, String)> = Vec::new();
        {
            let focusability = self.state.focusability.borrow();
            locate::for_each_cell(dom, &self.state.container, &mut |element, row, column| {
                if focusability.get(column).copied().unwrap_or(false) {
                    tracked.push((CellCoord::new(row, column), element.id.clone()));
                }
            });
        }

        for (coord, cell_id) in tracked {
            let state = Rc::clone(&self.state);
            let guard = dom.listen(&cell_id, EventKind::FocusIn, move |_, _| {
                state.cursor.record(coord);
                EventResult::Ignored
            });
            if let Some(guard) = guard {
                self.observers.insert(coord, guard);
            }
        }
        log::trace!(
            "[navigate] tracking {} cells in {}",
            self.observers.len(),
            self.state.container
        );

        let state = Rc::clone(&self.state);
        self.keydown = dom.listen(
            &self.state.container,
            EventKind::KeyDown,
            move |dom, event| handle_keydown(&state, dom, event),
        );
    }

    /// Drop all listeners and forget the cursor. The handle can be re-armed
    /// with a later `sync`.
    pub fn detach(&mut self) {
        self.observers.clear();
        self.keydown = None;
        self.state.cursor.clear();
        self.resolved_for = None;
    }

    /// Coordinate of the last cell that received focus, if any.
    pub fn cursor(&self) -> Option<CellCoord> {
        self.state.cursor.current()
    }

    /// Number of cells currently under focus observation.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

/// Container-level keydown handling: guard, map the arrow, compute, move.
fn handle_keydown(state: &NavState, dom: &GridDom, event: &Event) -> EventResult {
    let Event::KeyDown { key, .. } = event else {
        return EventResult::Ignored;
    };

    if editing_guard_blocks(state, dom) {
        return EventResult::Ignored;
    }

    let (vertical, horizontal): (i8, i8) = match key {
        Key::Up => (-1, 0),
        Key::Down => (1, 0),
        Key::Left => (0, -1),
        Key::Right => (0, 1),
        _ => return EventResult::Ignored,
    };

    // Arrows are claimed from here on even when no move results; the grid
    // is the sole consumer of arrow keys while it holds focus.
    let Some(current) = state.cursor.current() else {
        return EventResult::Consumed;
    };

    let target = {
        let focusability = state.focusability.borrow();
        shift_target(
            current,
            vertical,
            horizontal,
            state.bounds.get(),
            &focusability,
        )
    };
    if let Some(target) = target {
        log::debug!(
            "[navigate] ({}, {}) -> ({}, {})",
            current.row,
            current.column,
            target.row,
            target.column
        );
        transfer::focus_cell(dom, &state.container, target);
    }
    EventResult::Consumed
}

/// Navigation stands down while an inline editor is open anywhere in the
/// grid, and while focus sits outside the region the marker governs.
fn editing_guard_blocks(state: &NavState, dom: &GridDom) -> bool {
    let mut editor_open = false;
    dom.visit_subtree(&state.container, &mut |element| {
        if element
            .get_data(EDITING_ACTIVE_DATA)
            .is_some_and(|value| value == "true")
        {
            editor_open = true;
        }
    });
    if editor_open {
        log::debug!("[navigate] inline editor active, arrows released");
        return true;
    }

    let in_region = dom
        .focused()
        .and_then(|focused| dom.closest_with_data(&focused, EDITING_ACTIVE_DATA))
        .is_some();
    if !in_region {
        log::debug!("[navigate] focus outside the editing region, arrows released");
        return true;
    }
    false
}
