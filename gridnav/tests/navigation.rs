use griddom::{Element, EventResult, GridDom, Key, Modifiers};
use gridnav::{CellCoord, ColumnDef, EDITING_ACTIVE_DATA, FocusNavigation};

// Fixture: a grid with a selection column and three data columns, of which
// the first and third are editable. Visible-column coordinates:
//   0 selection, 1 status (editable), 2 name (readonly), 3 owner (editable)
// The editing marker sits on the row body; the footer button lives inside
// the grid but outside the marked region.

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::editable("status"),
        ColumnDef::readonly("name"),
        ColumnDef::editable("owner"),
    ]
}

fn data_row(row: usize) -> Element {
    Element::row().id(format!("row-{row}")).children(vec![
        Element::cell()
            .id(format!("cell-{row}-0"))
            .child(Element::control("sel").id(format!("select-{row}"))),
        Element::cell()
            .id(format!("cell-{row}-1"))
            .child(Element::control("status").id(format!("edit-{row}-1"))),
        Element::cell()
            .id(format!("cell-{row}-2"))
            .child(Element::text(format!("record {row}"))),
        Element::cell()
            .id(format!("cell-{row}-3"))
            .child(Element::control("owner").id(format!("edit-{row}-3"))),
    ])
}

fn grid(rows: usize) -> Element {
    Element::panel().id("grid").children(vec![
        Element::panel()
            .id("body")
            .data(EDITING_ACTIVE_DATA, "false")
            .children((0..rows).map(data_row).collect()),
        Element::panel()
            .id("footer")
            .child(Element::control("load more").id("load-more")),
    ])
}

fn app(rows: usize) -> Element {
    Element::panel().id("app").child(grid(rows))
}

fn armed(rows: usize) -> (GridDom, FocusNavigation) {
    let dom = GridDom::new(app(rows));
    let mut nav = FocusNavigation::new("grid");
    nav.sync(&dom, &columns(), true, rows);
    (dom, nav)
}

fn press(dom: &GridDom, key: Key) -> EventResult {
    dom.dispatch_key(key, Modifiers::new())
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_sync_attaches_observers_and_keydown() {
    let (dom, nav) = armed(3);
    // Two tracked cells per row, plus the container keydown listener.
    assert_eq!(nav.observer_count(), 6);
    assert_eq!(dom.listener_count(), 7);
    assert_eq!(dom.listener_count_on("grid"), 1);
}

#[test]
fn test_resync_does_not_duplicate_listeners() {
    let (dom, mut nav) = armed(3);
    nav.sync(&dom, &columns(), true, 3);
    nav.sync(&dom, &columns(), true, 3);
    assert_eq!(nav.observer_count(), 6);
    assert_eq!(dom.listener_count(), 7);
    assert_eq!(dom.listener_count_on("grid"), 1);
}

#[test]
fn test_detach_drops_listeners_and_cursor() {
    let (dom, mut nav) = armed(3);
    dom.focus_element("edit-1-1");
    assert_eq!(nav.cursor(), Some(CellCoord::new(1, 1)));

    nav.detach();
    assert_eq!(dom.listener_count(), 0);
    assert_eq!(nav.cursor(), None);
}

#[test]
fn test_sync_skips_missing_container_then_recovers() {
    let dom = GridDom::new(Element::panel().id("app"));
    let mut nav = FocusNavigation::new("grid");
    nav.sync(&dom, &columns(), true, 2);
    assert_eq!(dom.listener_count(), 0);
    assert_eq!(nav.observer_count(), 0);

    dom.set_children("app", vec![grid(2)]);
    nav.sync(&dom, &columns(), true, 2);
    assert_eq!(nav.observer_count(), 4);
    assert_eq!(dom.listener_count(), 5);
}

// =============================================================================
// Cursor tracking
// =============================================================================

#[test]
fn test_focus_in_records_cursor() {
    let (dom, nav) = armed(3);
    assert_eq!(nav.cursor(), None);

    dom.focus_element("edit-2-3");
    assert_eq!(nav.cursor(), Some(CellCoord::new(2, 3)));
}

#[test]
fn test_untracked_focus_leaves_cursor_alone() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-0-1");
    dom.focus_element("select-1");
    assert_eq!(nav.cursor(), Some(CellCoord::new(0, 1)));
}

#[test]
fn test_tab_traversal_records_cursor() {
    let (dom, nav) = armed(3);
    dom.focus_element("select-1");
    assert_eq!(nav.cursor(), None);

    // Document order puts edit-1-1 right after the row's selection control.
    dom.focus_next();
    assert_eq!(dom.focused().as_deref(), Some("edit-1-1"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(1, 1)));
}

// =============================================================================
// Arrow keys
// =============================================================================

#[test]
fn test_arrow_moves_focus_and_cursor() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-0-1");

    let result = press(&dom, Key::Down);
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(dom.focused().as_deref(), Some("edit-1-1"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(1, 1)));
}

#[test]
fn test_left_skips_the_readonly_column() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-1-3");

    press(&dom, Key::Left);
    assert_eq!(dom.focused().as_deref(), Some("edit-1-1"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(1, 1)));
}

#[test]
fn test_left_abandons_into_the_selection_column() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-1-1");

    let result = press(&dom, Key::Left);
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(dom.focused().as_deref(), Some("edit-1-1"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(1, 1)));
}

#[test]
fn test_down_clamps_at_the_last_row() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-2-1");

    let result = press(&dom, Key::Down);
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(dom.focused().as_deref(), Some("edit-2-1"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(2, 1)));
}

#[test]
fn test_arrow_without_cursor_is_claimed_but_inert() {
    let (dom, nav) = armed(3);
    // Focus inside the marked region on a control no observer watches.
    dom.focus_element("select-0");
    assert_eq!(nav.cursor(), None);

    let result = press(&dom, Key::Down);
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(dom.focused().as_deref(), Some("select-0"));
    assert_eq!(nav.cursor(), None);
}

#[test]
fn test_non_arrow_keys_pass_through() {
    let (dom, _nav) = armed(3);
    dom.focus_element("edit-0-1");

    assert_eq!(press(&dom, Key::Enter), EventResult::Ignored);
    assert_eq!(press(&dom, Key::Char('x')), EventResult::Ignored);
    assert_eq!(dom.focused().as_deref(), Some("edit-0-1"));
}

// =============================================================================
// Editing guard
// =============================================================================

#[test]
fn test_open_editor_releases_arrows() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-0-1");
    dom.set_data("cell-0-1", EDITING_ACTIVE_DATA, "true");

    let result = press(&dom, Key::Down);
    assert_eq!(result, EventResult::Ignored);
    assert_eq!(dom.focused().as_deref(), Some("edit-0-1"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(0, 1)));
}

#[test]
fn test_focus_outside_the_marked_region_releases_arrows() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-0-1");
    dom.focus_element("load-more");

    let result = press(&dom, Key::Down);
    assert_eq!(result, EventResult::Ignored);
    assert_eq!(dom.focused().as_deref(), Some("load-more"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(0, 1)));
}

// =============================================================================
// Re-render lifecycle & transfer
// =============================================================================

#[test]
fn test_resync_rebuilds_over_new_rows() {
    let (dom, mut nav) = armed(2);
    assert_eq!(nav.observer_count(), 4);

    dom.set_children("body", (0..4).map(data_row).collect());
    nav.sync(&dom, &columns(), true, 4);
    assert_eq!(nav.observer_count(), 8);
    assert_eq!(dom.listener_count(), 9);

    dom.focus_element("edit-3-1");
    press(&dom, Key::Up);
    assert_eq!(dom.focused().as_deref(), Some("edit-2-1"));
}

#[test]
fn test_stale_bounds_abandon_the_transfer() {
    let (dom, nav) = armed(3);
    dom.focus_element("edit-1-1");

    // Rows shrink without a resync, so the bounds still allow row 2.
    dom.set_children("body", (0..2).map(data_row).collect());
    let result = press(&dom, Key::Down);

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(dom.focused().as_deref(), Some("edit-1-1"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(1, 1)));
}

#[test]
fn test_stale_row_abandons_a_horizontal_move() {
    let (dom, mut nav) = armed(5);
    dom.focus_element("edit-4-1");
    assert_eq!(nav.cursor(), Some(CellCoord::new(4, 1)));

    // Rows shrink and the registration follows, but no tracked cell has
    // been focused since, so the cursor still points at the vanished row.
    dom.set_children("body", (0..3).map(data_row).collect());
    nav.sync(&dom, &columns(), true, 3);
    dom.focus_element("select-0");

    let result = press(&dom, Key::Right);
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(dom.focused().as_deref(), Some("select-0"));
    assert_eq!(nav.cursor(), Some(CellCoord::new(4, 1)));
}

#[test]
fn test_transfer_scrolls_the_target_into_view() {
    let dom = GridDom::new(
        Element::panel().id("app").child(
            Element::panel().id("grid").child(
                Element::panel()
                    .id("body")
                    .data(EDITING_ACTIVE_DATA, "false")
                    .viewport_rows(2)
                    .children((0..4).map(data_row).collect()),
            ),
        ),
    );
    let mut nav = FocusNavigation::new("grid");
    nav.sync(&dom, &columns(), true, 4);

    dom.focus_element("edit-0-1");
    press(&dom, Key::Down);
    assert_eq!(dom.scroll_offset("body"), Some((0, 0)));

    press(&dom, Key::Down);
    assert_eq!(dom.focused().as_deref(), Some("edit-2-1"));
    assert_eq!(dom.scroll_offset("body"), Some((0, 1)));
}

#[test]
fn test_changed_columns_narrow_the_tracked_set() {
    let (dom, mut nav) = armed(2);
    assert_eq!(nav.observer_count(), 4);

    let narrowed = vec![
        ColumnDef::editable("status"),
        ColumnDef::readonly("name"),
        ColumnDef::readonly("owner"),
    ];
    nav.sync(&dom, &narrowed, true, 2);
    assert_eq!(nav.observer_count(), 2);

    // Column 3 is no longer tracked, so focusing it records nothing.
    dom.focus_element("edit-1-3");
    assert_eq!(nav.cursor(), None);
}
