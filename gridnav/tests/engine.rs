use gridnav::{CellCoord, GridBounds, shift_target};

#[test]
fn test_bounds_follow_selection_and_rows() {
    let focusability = [false, false, true, true];
    let bounds = GridBounds::derive(&focusability, true, 5);
    assert_eq!(
        bounds,
        GridBounds {
            min_column: 1,
            max_column: 3,
            max_row: 4
        }
    );

    let empty = GridBounds::derive(&[], false, 0);
    assert_eq!(
        empty,
        GridBounds {
            min_column: 0,
            max_column: 0,
            max_row: 0
        }
    );
}

#[test]
fn test_vertical_moves_clamp_to_rows() {
    let focusability = [false, true, true];
    let bounds = GridBounds::derive(&focusability, false, 5);
    let from = CellCoord::new(2, 1);

    assert_eq!(
        shift_target(from, 1, 0, bounds, &focusability),
        Some(CellCoord::new(3, 1))
    );
    assert_eq!(
        shift_target(from, -1, 0, bounds, &focusability),
        Some(CellCoord::new(1, 1))
    );
}

#[test]
fn test_vertical_at_edges_is_a_no_op() {
    let focusability = [true, true];
    let bounds = GridBounds::derive(&focusability, false, 5);

    assert_eq!(
        shift_target(CellCoord::new(4, 1), 1, 0, bounds, &focusability),
        None
    );
    assert_eq!(
        shift_target(CellCoord::new(0, 1), -1, 0, bounds, &focusability),
        None
    );
}

#[test]
fn test_horizontal_moves_never_touch_the_row() {
    // A row index gone stale after rows shrank rides through unclamped;
    // the cell lookup at transfer time is what retires it.
    let focusability = [false, true, false, true];
    let bounds = GridBounds::derive(&focusability, true, 3);

    assert_eq!(
        shift_target(CellCoord::new(4, 1), 0, 1, bounds, &focusability),
        Some(CellCoord::new(4, 3))
    );
}

#[test]
fn test_horizontal_skips_readonly_columns() {
    // Selection column at 0, then one readonly and two editable columns.
    let focusability = [false, false, true, true];
    let bounds = GridBounds::derive(&focusability, true, 3);

    assert_eq!(
        shift_target(CellCoord::new(0, 3), 0, -1, bounds, &focusability),
        Some(CellCoord::new(0, 2))
    );

    let sparse = [true, false, false, true];
    let bounds = GridBounds::derive(&sparse, false, 3);
    assert_eq!(
        shift_target(CellCoord::new(1, 3), 0, -1, bounds, &sparse),
        Some(CellCoord::new(1, 0))
    );
}

#[test]
fn test_left_sequence_stops_then_abandons() {
    // Selection column plus two editable data columns: the first Left lands
    // on column 1, the second scans into the selection column and is
    // dropped.
    let focusability = [false, true, true];
    let bounds = GridBounds::derive(&focusability, true, 5);

    let first = shift_target(CellCoord::new(0, 2), 0, -1, bounds, &focusability);
    assert_eq!(first, Some(CellCoord::new(0, 1)));
    assert_eq!(
        shift_target(CellCoord::new(0, 1), 0, -1, bounds, &focusability),
        None
    );
}

#[test]
fn test_horizontal_abandons_at_the_band_edge() {
    // Leftward from the first editable column scans into the selection
    // column and past it, so the move is dropped.
    let focusability = [false, true, true];
    let bounds = GridBounds::derive(&focusability, true, 3);
    assert_eq!(
        shift_target(CellCoord::new(0, 1), 0, -1, bounds, &focusability),
        None
    );

    // No focusable column at all in the scan direction.
    let focusability = [false, false, true];
    let bounds = GridBounds::derive(&focusability, true, 3);
    assert_eq!(
        shift_target(CellCoord::new(0, 2), 0, -1, bounds, &focusability),
        None
    );

    // Rightward off the last column.
    let focusability = [true, true];
    let bounds = GridBounds::derive(&focusability, false, 3);
    assert_eq!(
        shift_target(CellCoord::new(0, 1), 0, 1, bounds, &focusability),
        None
    );
}

#[test]
fn test_no_wrap_past_column_zero() {
    let focusability = [true, false];
    let bounds = GridBounds::derive(&focusability, false, 3);

    assert_eq!(
        shift_target(CellCoord::new(0, 0), 0, -1, bounds, &focusability),
        None
    );
    assert_eq!(
        shift_target(CellCoord::new(0, 0), 0, 1, bounds, &focusability),
        None
    );
}

#[test]
fn test_zero_deltas_do_not_move() {
    let focusability = [true, true];
    let bounds = GridBounds::derive(&focusability, false, 3);
    assert_eq!(
        shift_target(CellCoord::new(1, 1), 0, 0, bounds, &focusability),
        None
    );
}

#[test]
fn test_diagonal_applies_both_axes() {
    let focusability = [true, true];
    let bounds = GridBounds::derive(&focusability, false, 3);
    assert_eq!(
        shift_target(CellCoord::new(0, 0), 1, 1, bounds, &focusability),
        Some(CellCoord::new(1, 1))
    );
}

#[test]
fn test_empty_grid_clamps_to_origin() {
    let focusability = [true, true];
    let bounds = GridBounds::derive(&focusability, false, 0);
    assert_eq!(
        shift_target(CellCoord::new(0, 1), 1, 0, bounds, &focusability),
        None
    );
}
