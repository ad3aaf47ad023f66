use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Semantic role of an element within a grid document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Generic container (grid root, wrappers, headers).
    Panel,
    /// A grid row.
    Row,
    /// A data cell within a row.
    Cell,
    /// An interactive control (button-like, natively focusable).
    Control,
    /// Static text leaf.
    Text,
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub kind: Kind,

    // Content
    pub text: String,
    pub children: Vec<Element>,

    // Custom data storage (marker attributes, handler ids, etc.)
    pub data: HashMap<String, String>,

    // Interaction
    pub focusable: bool,
    /// Disabled elements don't receive focus.
    pub disabled: bool,

    // Geometry (cells declare a column width; containers a viewport)
    pub width: Option<u16>,
    pub viewport_rows: Option<u16>,
    pub viewport_cols: Option<u16>,
    pub scroll_x: u16,
    pub scroll_y: u16,
}

impl Element {
    fn new(kind: Kind, prefix: &str) -> Self {
        Self {
            id: generate_id(prefix),
            kind,
            text: String::new(),
            children: Vec::new(),
            data: HashMap::new(),
            focusable: false,
            disabled: false,
            width: None,
            viewport_rows: None,
            viewport_cols: None,
            scroll_x: 0,
            scroll_y: 0,
        }
    }

    pub fn panel() -> Self {
        Self::new(Kind::Panel, "panel")
    }

    pub fn row() -> Self {
        Self::new(Kind::Row, "row")
    }

    pub fn cell() -> Self {
        Self::new(Kind::Cell, "cell")
    }

    pub fn control(label: impl Into<String>) -> Self {
        let mut element = Self::new(Kind::Control, "control");
        element.text = label.into();
        element.focusable = true;
        element
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut element = Self::new(Kind::Text, "text");
        element.text = content.into();
        element
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Content
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    // Data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Geometry
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn viewport_rows(mut self, rows: u16) -> Self {
        self.viewport_rows = Some(rows);
        self
    }

    pub fn viewport_cols(mut self, cols: u16) -> Self {
        self.viewport_cols = Some(cols);
        self
    }
}

/// Recursively find an element by id.
pub fn find<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }
    for child in &root.children {
        if let Some(found) = find(child, id) {
            return Some(found);
        }
    }
    None
}

/// Recursively find an element by id, mutably.
pub fn find_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }
    for child in &mut root.children {
        if let Some(found) = find_mut(child, id) {
            return Some(found);
        }
    }
    None
}

/// Visit an element and all descendants in document order.
pub fn visit(root: &Element, visitor: &mut dyn FnMut(&Element)) {
    visitor(root);
    for child in &root.children {
        visit(child, visitor);
    }
}

/// Path from the target element up to the root (target first), or `None`
/// if the id does not resolve. This is the event bubbling order.
pub fn bubble_path<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    if root.id == id {
        return Some(vec![root]);
    }
    for child in &root.children {
        if let Some(mut path) = bubble_path(child, id) {
            path.push(root);
            return Some(path);
        }
    }
    None
}

/// Collect focusable, non-disabled element ids in document order.
pub fn collect_focusable(root: &Element, out: &mut Vec<String>) {
    if root.focusable && !root.disabled {
        out.push(root.id.clone());
    }
    for child in &root.children {
        collect_focusable(child, out);
    }
}
