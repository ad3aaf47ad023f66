use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, execute, queue, terminal};
use griddom::{Element, GridDom, Kind};
use simplelog::{Config, LevelFilter, WriteLogger};
use unicode_width::UnicodeWidthStr;

const GRID: &str = "grid";
const VIEWPORT_ROWS: u16 = 6;

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

/// One rendered cell: the id that can hold focus and the padded label.
struct CellView {
    id: String,
    label: String,
    width: u16,
}

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("focus_scroll.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let dom = GridDom::new(ui());
    let mut screen = Screen::new()?;

    loop {
        draw(&mut screen.stdout, &dom)?;

        let CrosstermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Up => dom.scroll_by(GRID, 0, -1),
            KeyCode::Down => dom.scroll_by(GRID, 0, 1),
            _ => {
                // Tab / Shift-Tab cycle focus through the document
                dom.handle_raw(&CrosstermEvent::Key(key));
                if let Some(focused) = dom.focused() {
                    dom.scroll_into_view(&focused);
                }
            }
        }
    }
}

fn ui() -> Element {
    Element::panel().id("app").child(
        Element::panel()
            .id(GRID)
            .viewport_rows(VIEWPORT_ROWS)
            .children((0..16).map(data_row).collect()),
    )
}

fn data_row(index: usize) -> Element {
    Element::row().id(format!("row-{index}")).children(vec![
        Element::cell()
            .id(format!("cell-{index}-0"))
            .width(10)
            .child(Element::text(format!("record {index}"))),
        Element::cell()
            .id(format!("cell-{index}-1"))
            .width(12)
            .child(Element::control("open").id(format!("open-{index}"))),
        Element::cell()
            .id(format!("cell-{index}-2"))
            .width(12)
            .child(Element::control("delete").id(format!("delete-{index}"))),
    ])
}

fn draw(stdout: &mut io::Stdout, dom: &GridDom) -> io::Result<()> {
    // Flatten the grid into rows of cells. The visitor must not call back
    // into the document, so collect first and query focus/scroll after.
    let mut rows: Vec<Vec<CellView>> = Vec::new();
    dom.visit_subtree(GRID, &mut |element| match element.kind {
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
    let (_, scroll_y) = dom.scroll_offset(GRID).unwrap_or((0, 0));

    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        Print("Tab/Shift-Tab move focus, Up/Down scroll, q quits"),
    )?;

    let first = scroll_y as usize;
    for (index, row) in rows
        .iter()
        .enumerate()
        .skip(first)
        .take(VIEWPORT_ROWS as usize)
    {
        let screen_row = (index - first) as u16 + 2;
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

    let status = format!(
        "focused: {}  scroll: {scroll_y}",
        focused.as_deref().unwrap_or("none"),
    );
    queue!(stdout, cursor::MoveTo(0, VIEWPORT_ROWS + 3), Print(status))?;
    stdout.flush()
}
