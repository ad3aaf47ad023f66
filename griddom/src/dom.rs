//! The live document: a shared handle over the element tree plus focus,
//! listeners, and dispatch.
//!
//! Everything is single-threaded. Methods snapshot what they need, release
//! the interior borrow, then invoke callbacks, so a listener may call back
//! into the document (moving focus from inside a keydown handler is the
//! normal case).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::element::{self, Element};
use crate::event::{Event, EventKind, EventResult, Key, Modifiers};
use crate::scroll;

/// Listener callback. Receives the document handle so it can query or
/// mutate the tree without capturing it (capturing the handle in a listener
/// would leak the document through a reference cycle).
pub type ListenerFn = dyn Fn(&GridDom, &Event) -> EventResult;

struct ListenerEntry {
    id: u64,
    target: String,
    kind: EventKind,
    callback: Rc<ListenerFn>,
}

struct DomState {
    root: Element,
    focused: Option<String>,
    listeners: Vec<ListenerEntry>,
    next_listener_id: u64,
}

/// Shared handle to a grid document. Cheap to clone.
#[derive(Clone)]
pub struct GridDom {
    state: Rc<RefCell<DomState>>,
}

/// Detaches its listener when dropped. A guard that outlives the document
/// is inert.
pub struct ListenerGuard {
    id: u64,
    state: Weak<RefCell<DomState>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|entry| entry.id != self.id);
        }
    }
}

impl GridDom {
    pub fn new(root: Element) -> Self {
        Self {
            state: Rc::new(RefCell::new(DomState {
                root,
                focused: None,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    // =========================================================================
    // Tree access
    // =========================================================================

    pub fn contains(&self, id: &str) -> bool {
        element::find(&self.state.borrow().root, id).is_some()
    }

    pub fn get_data(&self, id: &str, key: &str) -> Option<String> {
        let state = self.state.borrow();
        element::find(&state.root, id).and_then(|el| el.get_data(key).cloned())
    }

    pub fn set_data(&self, id: &str, key: &str, value: &str) -> bool {
        let mut state = self.state.borrow_mut();
        match element::find_mut(&mut state.root, id) {
            Some(el) => {
                el.data.insert(key.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn remove_data(&self, id: &str, key: &str) -> bool {
        let mut state = self.state.borrow_mut();
        match element::find_mut(&mut state.root, id) {
            Some(el) => el.data.remove(key).is_some(),
            None => false,
        }
    }

    /// Replace a container's children, as a re-render would. Listeners whose
    /// target left the tree are pruned, and stale focus is cleared.
    pub fn set_children(&self, container: &str, children: Vec<Element>) -> bool {
        let mut state = self.state.borrow_mut();
        {
            let Some(slot) = element::find_mut(&mut state.root, container) else {
                return false;
            };
            slot.children = children;
        }
        let DomState {
            root,
            listeners,
            focused,
            ..
        } = &mut *state;
        let before = listeners.len();
        listeners.retain(|entry| element::find(root, &entry.target).is_some());
        let pruned = before - listeners.len();
        if pruned > 0 {
            log::debug!("[dom] pruned {pruned} listeners for removed elements");
        }
        let stale = focused
            .as_deref()
            .is_some_and(|id| element::find(root, id).is_none());
        if stale {
            *focused = None;
        }
        true
    }

    /// Visit an element and its descendants in document order.
    /// The tree stays borrowed for the walk: the visitor must not call back
    /// into the document.
    pub fn visit_subtree(&self, id: &str, visitor: &mut dyn FnMut(&Element)) {
        let state = self.state.borrow();
        if let Some(el) = element::find(&state.root, id) {
            element::visit(el, visitor);
        }
    }

    /// Nearest self-or-ancestor of `id` carrying the data key, if any.
    pub fn closest_with_data(&self, id: &str, key: &str) -> Option<String> {
        let state = self.state.borrow();
        let path = element::bubble_path(&state.root, id)?;
        path.iter()
            .find(|el| el.data.contains_key(key))
            .map(|el| el.id.clone())
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused(&self) -> Option<String> {
        self.state.borrow().focused.clone()
    }

    /// Move focus to an element. Returns false when the element is missing,
    /// not focusable, or disabled. Emits bubbling `FocusOut` along the old
    /// chain, then `FocusIn` along the new one.
    pub fn focus_element(&self, id: &str) -> bool {
        let previous = {
            let mut state = self.state.borrow_mut();
            let Some(el) = element::find(&state.root, id) else {
                return false;
            };
            if !el.focusable || el.disabled {
                return false;
            }
            if state.focused.as_deref() == Some(id) {
                return true;
            }
            state.focused.replace(id.to_string())
        };
        log::debug!("[focus] -> {id}");
        if let Some(old) = previous {
            self.deliver(&old, &Event::FocusOut { target: old.clone() });
        }
        self.deliver(id, &Event::FocusIn { target: id.to_string() });
        true
    }

    pub fn blur(&self) {
        let previous = self.state.borrow_mut().focused.take();
        if let Some(old) = previous {
            self.deliver(&old, &Event::FocusOut { target: old.clone() });
        }
    }

    /// Focus the next focusable element in document order, wrapping.
    pub fn focus_next(&self) -> bool {
        self.cycle_focus(1)
    }

    /// Focus the previous focusable element in document order, wrapping.
    pub fn focus_prev(&self) -> bool {
        self.cycle_focus(-1)
    }

    fn cycle_focus(&self, step: isize) -> bool {
        let next = {
            let state = self.state.borrow();
            let mut ids = Vec::new();
            element::collect_focusable(&state.root, &mut ids);
            if ids.is_empty() {
                return false;
            }
            let position = state
                .focused
                .as_ref()
                .and_then(|focused| ids.iter().position(|id| id == focused));
            let index = match position {
                Some(current) => {
                    let len = ids.len() as isize;
                    (current as isize + step).rem_euclid(len) as usize
                }
                None if step > 0 => 0,
                None => ids.len() - 1,
            };
            ids.swap_remove(index)
        };
        self.focus_element(&next)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Attach a listener to an element. Returns `None` when the target is
    /// not in the tree. Dropping the guard detaches the listener.
    pub fn listen<F>(&self, target: &str, kind: EventKind, callback: F) -> Option<ListenerGuard>
    where
        F: Fn(&GridDom, &Event) -> EventResult + 'static,
    {
        let mut state = self.state.borrow_mut();
        if element::find(&state.root, target).is_none() {
            return None;
        }
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.push(ListenerEntry {
            id,
            target: target.to_string(),
            kind,
            callback: Rc::new(callback),
        });
        Some(ListenerGuard {
            id,
            state: Rc::downgrade(&self.state),
        })
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listener_count_on(&self, id: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.target == id)
            .count()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Deliver a key press to the focused element, bubbling to the root.
    /// With nothing focused there is no target and nothing fires.
    pub fn dispatch_key(&self, key: Key, modifiers: Modifiers) -> EventResult {
        let Some(target) = self.focused() else {
            return EventResult::Ignored;
        };
        let event = Event::KeyDown {
            target: target.clone(),
            key,
            modifiers,
        };
        self.deliver(&target, &event)
    }

    /// Convert a raw terminal event. Tab and BackTab cycle focus; other key
    /// presses go through [`dispatch_key`](Self::dispatch_key).
    pub fn handle_raw(&self, raw: &crossterm::event::Event) -> EventResult {
        use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind};
        match raw {
            CrosstermEvent::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                match key_event.code {
                    KeyCode::Tab => {
                        if self.focus_next() {
                            EventResult::Consumed
                        } else {
                            EventResult::Ignored
                        }
                    }
                    KeyCode::BackTab => {
                        if self.focus_prev() {
                            EventResult::Consumed
                        } else {
                            EventResult::Ignored
                        }
                    }
                    code => self.dispatch_key(code.into(), key_event.modifiers.into()),
                }
            }
            _ => EventResult::Ignored,
        }
    }

    /// Walk the bubble path from `origin` to the root, invoking listeners in
    /// order until one consumes the event. Listeners are snapshotted before
    /// any of them runs, so mid-dispatch attachment or removal never exposes
    /// a half-updated set.
    fn deliver(&self, origin: &str, event: &Event) -> EventResult {
        let kind = event.kind();
        let callbacks: Vec<Rc<ListenerFn>> = {
            let state = self.state.borrow();
            let Some(path) = element::bubble_path(&state.root, origin) else {
                return EventResult::Ignored;
            };
            let mut callbacks = Vec::new();
            for ancestor in &path {
                for entry in &state.listeners {
                    if entry.kind == kind && entry.target == ancestor.id {
                        callbacks.push(Rc::clone(&entry.callback));
                    }
                }
            }
            callbacks
        };
        for callback in callbacks {
            if callback(self, event).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Scroll the nearest scrollable ancestor the minimum amount needed to
    /// bring `id` fully into its viewport.
    pub fn scroll_into_view(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        scroll::scroll_into_view(&mut state.root, id);
    }

    pub fn scroll_by(&self, id: &str, dx: i16, dy: i16) {
        let mut state = self.state.borrow_mut();
        scroll::scroll_by(&mut state.root, id, dx, dy);
    }

    pub fn scroll_offset(&self, id: &str) -> Option<(u16, u16)> {
        scroll::scroll_offset(&self.state.borrow().root, id)
    }
}
