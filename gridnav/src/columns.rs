//! Column configuration and the focusability profile derived from it.

/// Declarative description of one grid column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub header: String,
    /// Editable columns host a control and can receive the navigation focus.
    pub editable: bool,
}

impl ColumnDef {
    pub fn editable(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            editable: true,
        }
    }

    pub fn readonly(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            editable: false,
        }
    }
}

/// Derive the per-column focusability flags for a grid.
///
/// The result has one entry per visible column, in display order. When the
/// grid shows a selection column it occupies position 0 and is never a
/// navigation target, so a `false` entry is prepended for it.
pub fn resolve_focusability(columns: &[ColumnDef], has_selection_column: bool) -> Vec<bool> {
    let mut flags: Vec<bool> = columns.iter().map(|column| column.editable).collect();
    if has_selection_column {
        flags.insert(0, false);
    }
    flags
}
