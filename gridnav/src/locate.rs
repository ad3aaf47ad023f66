//! Structural queries over a grid subtree: enumerating cells by coordinate
//! and finding the control a cell delegates focus to.

use griddom::{Element, GridDom, Kind};

use crate::engine::CellCoord;

/// Walk every cell under `container`, calling `visit` with the cell element
/// and its (row, column) position. Rows are counted in document order and
/// may sit behind wrapper panels; columns restart at 0 for each row, and a
/// cell outside any row is never visited.
///
/// The visitor runs while the document is borrowed, so it must not call
/// back into `dom`.
pub fn for_each_cell(
    dom: &GridDom,
    container: &str,
    visit: &mut dyn FnMut(&Element, usize, usize),
) {
    let mut rows: Vec<String> = Vec::new();
    dom.visit_subtree(container, &mut |element| {
        if element.kind == Kind::Row {
            rows.push(element.id.clone());
        }
    });

    for (row, row_id) in rows.iter().enumerate() {
        let mut column = 0usize;
        dom.visit_subtree(row_id, &mut |element| {
            if element.kind == Kind::Cell {
                visit(element, row, column);
                column += 1;
            }
        });
    }
}

/// Id of the cell at `coord`, if the grid currently has one there.
pub fn cell_at(dom: &GridDom, container: &str, coord: CellCoord) -> Option<String> {
    let mut found = None;
    for_each_cell(dom, container, &mut |element, row, column| {
        if found.is_none() && row == coord.row && column == coord.column {
            found = Some(element.id.clone());
        }
    });
    found
}

/// The control a cell delegates focus to: its last control in document order.
pub fn last_control_in(dom: &GridDom, cell: &str) -> Option<String> {
    let mut last = None;
    dom.visit_subtree(cell, &mut |element| {
        if element.kind == Kind::Control {
            last = Some(element.id.clone());
        }
    });
    last
}
