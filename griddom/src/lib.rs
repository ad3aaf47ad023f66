//! A retained element tree for terminal data grids.
//!
//! Documents are built from [`Element`] nodes (panels, rows, cells,
//! controls, text), held behind a cloneable [`GridDom`] handle that owns
//! focus state, event listeners, bubbling dispatch, and scrolling. Raw
//! crossterm input converts at the edge; everything inside is synchronous
//! and single-threaded.

pub mod dom;
pub mod element;
pub mod event;
pub mod scroll;

pub use dom::{GridDom, ListenerGuard};
pub use element::{Element, Kind};
pub use event::{Event, EventKind, EventResult, Key, Modifiers};
