//! Scroll offsets and minimal scroll-into-view.
//!
//! Containers declare a viewport (`viewport_rows` / `viewport_cols`) and
//! carry their own offsets. Rows are one terminal line tall; horizontal
//! positions come from cell widths.

use crate::element::{self, Element, Kind};

pub fn scroll_offset(root: &Element, id: &str) -> Option<(u16, u16)> {
    element::find(root, id).map(|el| (el.scroll_x, el.scroll_y))
}

/// Adjust a container's offsets by a delta, clamped to its content size.
pub fn scroll_by(root: &mut Element, id: &str, dx: i16, dy: i16) {
    let (content_w, content_h, viewport_cols, viewport_rows) = {
        let Some(container) = element::find(root, id) else {
            return;
        };
        let (w, h) = content_size(container);
        (w, h, container.viewport_cols, container.viewport_rows)
    };
    let Some(container) = element::find_mut(root, id) else {
        return;
    };
    let max_x = content_w.saturating_sub(viewport_cols.unwrap_or(content_w));
    let max_y = content_h.saturating_sub(viewport_rows.unwrap_or(content_h));
    container.scroll_x = add_clamped(container.scroll_x, dx, max_x);
    container.scroll_y = add_clamped(container.scroll_y, dy, max_y);
}

/// Scroll the nearest scrollable ancestor of `target` the smallest amount
/// that brings the target fully inside the viewport. Already-visible targets
/// move nothing.
pub fn scroll_into_view(root: &mut Element, target: &str) {
    let (container_id, mut scroll_x, mut scroll_y, vertical, horizontal) = {
        let Some(path) = element::bubble_path(root, target) else {
            return;
        };
        let Some(container) = path
            .iter()
            .skip(1)
            .find(|el| el.viewport_rows.is_some() || el.viewport_cols.is_some())
        else {
            return;
        };
        let row = path.iter().find(|el| el.kind == Kind::Row);
        let cell = path.iter().find(|el| el.kind == Kind::Cell);

        let vertical = match (container.viewport_rows, row) {
            (Some(viewport), Some(row)) => {
                row_position(container, &row.id).map(|top| (viewport, top))
            }
            _ => None,
        };
        let horizontal = match (container.viewport_cols, row, cell) {
            (Some(viewport), Some(row), Some(cell)) => {
                cell_span(row, &cell.id).map(|span| (viewport, span))
            }
            _ => None,
        };
        (
            container.id.clone(),
            container.scroll_x,
            container.scroll_y,
            vertical,
            horizontal,
        )
    };

    if let Some((viewport, top)) = vertical {
        let bottom = top.saturating_add(1);
        if top < scroll_y {
            scroll_y = top;
        } else if bottom > scroll_y + viewport {
            scroll_y = bottom.saturating_sub(viewport);
        }
    }
    if let Some((viewport, (left, right))) = horizontal {
        if left < scroll_x {
            scroll_x = left;
        } else if right > scroll_x + viewport {
            scroll_x = right.saturating_sub(viewport);
        }
    }

    if let Some(container) = element::find_mut(root, &container_id) {
        if (container.scroll_x, container.scroll_y) != (scroll_x, scroll_y) {
            log::trace!("[scroll] {container_id} -> ({scroll_x}, {scroll_y})");
        }
        container.scroll_x = scroll_x;
        container.scroll_y = scroll_y;
    }
}

/// Content extent of a container: widest row, number of rows.
fn content_size(container: &Element) -> (u16, u16) {
    let mut rows = 0u16;
    let mut width = 0u16;
    element::visit(container, &mut |el| {
        if el.kind == Kind::Row {
            rows += 1;
            width = width.max(row_width(el));
        }
    });
    (width, rows)
}

fn row_width(row: &Element) -> u16 {
    let mut width = 0u16;
    element::visit(row, &mut |el| {
        if el.kind == Kind::Cell {
            width += el.width.unwrap_or(1);
        }
    });
    width
}

/// Index of a row among a container's row descendants, in document order.
fn row_position(container: &Element, row_id: &str) -> Option<u16> {
    let mut index = 0u16;
    let mut found = None;
    element::visit(container, &mut |el| {
        if el.kind == Kind::Row {
            if el.id == row_id {
                found = found.or(Some(index));
            }
            index = index.saturating_add(1);
        }
    });
    found
}

/// Horizontal extent (left, right) of a cell within its row.
fn cell_span(row: &Element, cell_id: &str) -> Option<(u16, u16)> {
    let mut x = 0u16;
    let mut span = None;
    element::visit(row, &mut |el| {
        if el.kind == Kind::Cell && span.is_none() {
            let width = el.width.unwrap_or(1);
            if el.id == cell_id {
                span = Some((x, x + width));
            } else {
                x += width;
            }
        }
    });
    span
}

fn add_clamped(value: u16, delta: i16, max: u16) -> u16 {
    (value as i32 + delta as i32).clamp(0, max as i32) as u16
}
