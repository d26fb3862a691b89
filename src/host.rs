//! Page-global resources: keyboard/mouse listeners and the body scroll lock.
//!
//! The page document is shared by every widget on it, so nothing hands out
//! raw access. Components acquire what they need as guards and the guard's
//! `Drop` gives it back:
//!
//! ```text
//! Document::listen(kind, owner)  →  ListenerGuard   (unregisters on drop)
//! Document::lock_scroll()        →  ScrollLock      (restores overflow on drop)
//! ```
//!
//! A component that holds its guards inside the state variant that needs them
//! (e.g. `Open(..)`, `Fullscreen(..)`) releases them on every path that leaves
//! that variant: explicit close, Escape, replacement, or the component itself
//! being dropped.
//!
//! Events are delivered the way the DOM delivers them: to every listener
//! for the event kind, in attachment order. A listener detached by an
//! earlier one during the same dispatch is skipped.
//!
//! Everything here is single-threaded. [`Document`] is a cheap `Rc` handle;
//! clones observe the same registrations.

use log::{debug, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// DOM event families the page listens to globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    KeyDown,
    MouseDown,
}

/// Owner tag of a registered listener, used to route dispatched events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Listener {
    ModalEscape,
    CarouselKeys,
    SwitcherOutsideClick,
}

impl Listener {
    pub fn name(self) -> &'static str {
        match self {
            Listener::ModalEscape => "modal-escape",
            Listener::CarouselKeys => "carousel-keys",
            Listener::SwitcherOutsideClick => "switcher-outside-click",
        }
    }
}

/// CSS `overflow` of the page body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// A key press, named the way the DOM names `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => f.write_str("Escape"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug)]
struct Registration {
    id: u64,
    kind: EventKind,
    listener: Listener,
}

#[derive(Debug, Default)]
struct DocumentState {
    next_id: u64,
    registrations: Vec<Registration>,
    overflow: Overflow,
    scroll_locks: usize,
}

/// Handle to the page document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    state: Rc<RefCell<DocumentState>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a global listener. It stays registered until the guard drops.
    pub fn listen(&self, kind: EventKind, listener: Listener) -> ListenerGuard {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.registrations.push(Registration { id, kind, listener });
        debug!("attached {listener:?} on {kind:?} (#{id})");
        ListenerGuard {
            document: self.clone(),
            id,
        }
    }

    /// Suppress page scrolling until the returned lock drops.
    ///
    /// Only one lock is expected at a time. A second acquisition is logged
    /// and counted so the page stays locked until both are released.
    pub fn lock_scroll(&self) -> ScrollLock {
        let mut state = self.state.borrow_mut();
        if state.scroll_locks > 0 {
            warn!(
                "scroll lock acquired while already held ({} active)",
                state.scroll_locks
            );
        }
        state.scroll_locks += 1;
        state.overflow = Overflow::Hidden;
        debug!("body overflow hidden");
        ScrollLock {
            document: self.clone(),
        }
    }

    /// Active listeners for `kind`, in attachment (dispatch) order.
    pub fn listeners(&self, kind: EventKind) -> Vec<Listener> {
        self.state
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.listener)
            .collect()
    }

    pub fn is_listening(&self, kind: EventKind, listener: Listener) -> bool {
        self.state
            .borrow()
            .registrations
            .iter()
            .any(|r| r.kind == kind && r.listener == listener)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.state
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    pub fn overflow(&self) -> Overflow {
        self.state.borrow().overflow
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.state.borrow().scroll_locks > 0
    }

    pub fn scroll_lock_count(&self) -> usize {
        self.state.borrow().scroll_locks
    }

    fn unregister(&self, id: u64) {
        let mut state = self.state.borrow_mut();
        if let Some(pos) = state.registrations.iter().position(|r| r.id == id) {
            let reg = state.registrations.remove(pos);
            debug!("detached {:?} on {:?} (#{id})", reg.listener, reg.kind);
        }
    }

    fn unlock_scroll(&self) {
        let mut state = self.state.borrow_mut();
        state.scroll_locks = state.scroll_locks.saturating_sub(1);
        if state.scroll_locks == 0 {
            state.overflow = Overflow::Auto;
            debug!("body overflow restored");
        }
    }
}

/// A registered global listener. Dropping it unregisters.
#[must_use = "the listener is detached as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ListenerGuard {
    document: Document,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.document.unregister(self.id);
    }
}

/// Held page scroll suppression. Dropping it restores scrolling.
#[must_use = "scrolling is restored as soon as the lock is dropped"]
#[derive(Debug)]
pub struct ScrollLock {
    document: Document,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.document.unlock_scroll();
    }
}
