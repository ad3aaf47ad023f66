/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, delivered to the focused element and bubbled upward
    KeyDown {
        target: String,
        key: Key,
        modifiers: Modifiers,
    },
    /// Focus entered an element (bubbles through ancestors)
    FocusIn { target: String },
    /// Focus left an element (bubbles through ancestors)
    FocusOut { target: String },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::FocusIn { .. } => EventKind::FocusIn,
            Event::FocusOut { .. } => EventKind::FocusOut,
        }
    }

    /// Id of the element the event originated at.
    pub fn target(&self) -> &str {
        match self {
            Event::KeyDown { target, .. }
            | Event::FocusIn { target }
            | Event::FocusOut { target } => target,
        }
    }
}

/// Event categories listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    FocusIn,
    FocusOut,
}

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}
