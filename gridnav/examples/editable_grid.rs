use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, execute, queue, terminal};
use griddom::{Element, GridDom, Kind};
use gridnav::{CellCoord, ColumnDef, EDITING_ACTIVE_DATA, FocusNavigation, locate};
use simplelog::{Config, LevelFilter, WriteLogger};
use unicode_width::UnicodeWidthStr;

const GRID: &str = "grid";
const VIEWPORT_ROWS: u16 = 6;

const SEL_WIDTH: u16 = 4;
const NAME_WIDTH: u16 = 14;
const STATUS_WIDTH: u16 = 12;
const OWNER_WIDTH: u16 = 12;

/// Raw-mode terminal session, restored on drop.
struct Screen {
    stdout: io::Stdout,
}

impl Screen {
    fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

struct RowData {
    name: String,
    status: String,
    owner: String,
}

struct Model {
    rows: Vec<RowData>,
    next_record: usize,
    editing: Option<CellCoord>,
}

/// One rendered cell: the id that can hold focus and the padded label.
struct CellView {
    id: String,
    label: String,
    width: u16,
}

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("editable_grid.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut model = Model {
        rows: (0..12)
            .map(|i| RowData {
                name: format!("record {i}"),
                status: if i % 3 == 0 { "active" } else { "idle" }.to_string(),
                owner: format!("user{}", i % 4),
            })
            .collect(),
        next_record: 12,
        editing: None,
    };

    let dom = GridDom::new(ui(&model));
    let mut nav = FocusNavigation::new(GRID);
    nav.sync(&dom, &columns(), true, model.rows.len());

    let mut screen = Screen::new()?;

    loop {
        draw(&mut screen.stdout, &dom, &nav, &model)?;

        let CrosstermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Enter if model.editing.is_some() => {
                model.editing = None;
                rebuild(&dom, &mut nav, &model);
            }
            KeyCode::Backspace if model.editing.is_some() => {
                if let Some(coord) = model.editing {
                    if let Some(field) = field_mut(&mut model, coord) {
                        field.pop();
                    }
                    rebuild(&dom, &mut nav, &model);
                }
            }
            KeyCode::Char(ch) if model.editing.is_some() => {
                if let Some(coord) = model.editing {
                    if let Some(field) = field_mut(&mut model, coord) {
                        field.push(ch);
                    }
                    rebuild(&dom, &mut nav, &model);
                }
            }
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Enter => {
                // Edit the cell the navigation cursor rests on.
                if let Some(coord) = nav.cursor() {
                    if locate::cell_at(&dom, GRID, coord).is_some() {
                        model.editing = Some(coord);
                        rebuild(&dom, &mut nav, &model);
                    }
                }
            }
            KeyCode::Char('a') => {
                let index = model.next_record;
                model.next_record += 1;
                model.rows.push(RowData {
                    name: format!("record {index}"),
                    status: "idle".to_string(),
                    owner: format!("user{}", index % 4),
                });
                rebuild(&dom, &mut nav, &model);
            }
            KeyCode::Char('d') => {
                if model.rows.pop().is_some() {
                    rebuild(&dom, &mut nav, &model);
                }
            }
            _ => {
                // Tab seeds and cycles focus; arrows reach the navigation
                // listener by bubbling from the focused control.
                dom.handle_raw(&CrosstermEvent::Key(key));
                if let Some(focused) = dom.focused() {
                    dom.scroll_into_view(&focused);
                }
            }
        }
    }
}

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::readonly("name"),
        ColumnDef::editable("status"),
        ColumnDef::editable("owner"),
    ]
}

fn ui(model: &Model) -> Element {
    Element::panel().id("app").child(
        Element::panel().id(GRID).child(
            Element::panel()
                .id("body")
                .data(EDITING_ACTIVE_DATA, "false")
                .viewport_rows(VIEWPORT_ROWS)
                .children(build_rows(model)),
        ),
    )
}

fn build_rows(model: &Model) -> Vec<Element> {
    model
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| data_row(index, row, model.editing))
        .collect()
}

fn data_row(index: usize, row: &RowData, editing: Option<CellCoord>) -> Element {
    Element::row().id(format!("row-{index}")).children(vec![
        Element::cell()
            .id(format!("cell-{index}-0"))
            .width(SEL_WIDTH)
            .child(Element::control("[ ]").id(format!("select-{index}"))),
        Element::cell()
            .id(format!("cell-{index}-1"))
            .width(NAME_WIDTH)
            .child(Element::text(row.name.as_str())),
        field_cell(index, 2, &row.status, STATUS_WIDTH, editing),
        field_cell(index, 3, &row.owner, OWNER_WIDTH, editing),
    ])
}

fn field_cell(
    row: usize,
    column: usize,
    value: &str,
    width: u16,
    editing: Option<CellCoord>,
) -> Element {
    let here = editing == Some(CellCoord::new(row, column));
    let label = if here {
        format!("{value}_")
    } else {
        value.to_string()
    };
    let cell = Element::cell()
        .id(format!("cell-{row}-{column}"))
        .width(width)
        .child(Element::control(label).id(format!("field-{row}-{column}")));
    if here {
        cell.data(EDITING_ACTIVE_DATA, "true")
    } else {
        cell
    }
}

fn field_mut(model: &mut Model, coord: CellCoord) -> Option<&mut String> {
    let row = model.rows.get_mut(coord.row)?;
    match coord.column {
        2 => Some(&mut row.status),
        3 => Some(&mut row.owner),
        _ => None,
    }
}

fn rebuild(dom: &GridDom, nav: &mut FocusNavigation, model: &Model) {
    dom.set_children("body", build_rows(model));
    nav.sync(dom, &columns(), true, model.rows.len());
}

fn draw(
    stdout: &mut io::Stdout,
    dom: &GridDom,
    nav: &FocusNavigation,
    model: &Model,
) -> io::Result<()> {
    let mut rows: Vec<Vec<CellView>> = Vec::new();
    dom.visit_subtree("body", &mut |element| match element.kind {
        Kind::Row => rows.push(Vec::new()),
        Kind::Cell => {
            if let Some(row) = rows.last_mut() {
                row.push(CellView {
                    id: element.id.clone(),
                    label: String::new(),
                    width: element.width.unwrap_or(10),
                });
            }
        }
        Kind::Control | Kind::Text => {
            if let Some(cell) = rows.last_mut().and_then(|row| row.last_mut()) {
                cell.label = element.text.clone();
                if element.kind == Kind::Control {
                    cell.id = element.id.clone();
                }
            }
        }
        Kind::Panel => {}
    });

    let focused = dom.focused();
    let (_, scroll_y) = dom.scroll_offset("body").unwrap_or((0, 0));

    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        Print("Tab/Shift-Tab cycle focus, arrows move between editable cells"),
        cursor::MoveTo(0, 1),
        Print("Enter edits the cursor cell, Esc closes, a adds a row, d drops one, q quits"),
    )?;

    let header = format!(
        "{:<sel$} {:<name$} {:<status$} {:<owner$}",
        "",
        "name",
        "status",
        "owner",
        sel = SEL_WIDTH as usize,
        name = NAME_WIDTH as usize,
        status = STATUS_WIDTH as usize,
        owner = OWNER_WIDTH as usize,
    );
    queue!(
        stdout,
        cursor::MoveTo(0, 3),
        SetAttribute(Attribute::Bold),
        Print(header),
        SetAttribute(Attribute::Reset),
    )?;

    let first = scroll_y as usize;
    for (index, row) in rows
        .iter()
        .enumerate()
        .skip(first)
        .take(VIEWPORT_ROWS as usize)
    {
        let screen_row = (index - first) as u16 + 4;
        queue!(stdout, cursor::MoveTo(0, screen_row))?;
        for cell in row {
            let padding = (cell.width as usize).saturating_sub(cell.label.width());
            let text = format!("{}{} ", cell.label, " ".repeat(padding));
            if focused.as_deref() == Some(cell.id.as_str()) {
                queue!(
                    stdout,
                    SetAttribute(Attribute::Reverse),
                    Print(&text),
                    SetAttribute(Attribute::Reset),
                )?;
            } else {
                queue!(stdout, Print(&text))?;
            }
        }
    }

    let cursor_label = match nav.cursor() {
        Some(coord) => format!("({}, {})", coord.row, coord.column),
        None => "-".to_string(),
    };
    let mode = if model.editing.is_some() {
        "editing"
    } else {
        "navigate"
    };
    let status = format!(
        "cursor {cursor_label}  mode {mode}  rows {}  scroll {scroll_y}",
        model.rows.len(),
    );
    queue!(stdout, cursor::MoveTo(0, VIEWPORT_ROWS + 5), Print(status))?;
    stdout.flush()
}
