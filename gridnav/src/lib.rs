//! Arrow-key focus navigation for editable grids built on [`griddom`].
//!
//! The crate splits into pure pieces (column profiles, coordinate math,
//! cursor state) and the [`FocusNavigation`] handle that registers them
//! against a live document.

pub mod columns;
pub mod cursor;
pub mod engine;
pub mod locate;
pub mod navigation;
pub mod transfer;

pub use columns::{ColumnDef, resolve_focusability};
pub use cursor::CursorTracker;
pub use engine::{CellCoord, GridBounds, shift_target};
pub use navigation::{EDITING_ACTIVE_DATA, FocusNavigation};
