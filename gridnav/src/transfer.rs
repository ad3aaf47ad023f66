use griddom::GridDom;

use crate::engine::CellCoord;
use crate::locate;

/// Focus the control in the cell at `coord` and bring it into view.
///
/// The move is abandoned without side effects when the grid no longer has a
/// cell there or the cell holds no control.
pub fn focus_cell(dom: &GridDom, container: &str, coord: CellCoord) {
    let Some(cell) = locate::cell_at(dom, container, coord) else {
        log::debug!(
            "[transfer] no cell at ({}, {}), move abandoned",
            coord.row,
            coord.column
        );
        return;
    };
    let Some(control) = locate::last_control_in(dom, &cell) else {
        log::debug!("[transfer] cell {cell} holds no control, move abandoned");
        return;
    };
    if dom.focus_element(&control) {
        dom.scroll_into_view(&control);
    }
}
