//! Project detail modal.
//!
//! ```text
//!            open(p)                 open(q)
//! Closed ───────────▶ Open(p) ───────────────▶ Open(q)   fresh carousel at 0
//!    ▲                   │
//!    └─── close() ───────┘   close button, backdrop click, Escape, drop
//! ```
//!
//! The open variant owns everything that only exists while the modal is up:
//! the project, a carousel mounted for its images, the Escape listener and
//! the page scroll lock. Leaving the variant by any path drops all four, so
//! there is no separate teardown step to forget.

use crate::carousel::{Carousel, CarouselEvent, CarouselTarget};
use crate::host::{Document, EventKind, Key, Listener, ListenerGuard, ScrollLock};
use crate::types::ProjectRecord;
use log::debug;
use serde::Serialize;
use std::rc::Rc;

/// Clickable parts of the modal.
///
/// `Panel` stands for any non-interactive spot inside the panel (text,
/// badges, padding). It is contained: it never reaches the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Backdrop,
    Panel,
    Close,
    Link,
    Carousel(CarouselTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum ModalEvent {
    Opened { title: String },
    Closed,
    /// Host should open this URL in a new browsing context.
    OpenLink(String),
    Carousel(CarouselEvent),
}

#[derive(Debug)]
struct OpenModal {
    project: Rc<ProjectRecord>,
    carousel: Carousel,
    _escape: ListenerGuard,
    _scroll: ScrollLock,
}

#[derive(Debug, Default)]
enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

#[derive(Debug)]
pub struct ProjectModal {
    document: Document,
    state: ModalState,
}

impl ProjectModal {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            state: ModalState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn selected(&self) -> Option<&Rc<ProjectRecord>> {
        match &self.state {
            ModalState::Open(open) => Some(&open.project),
            ModalState::Closed => None,
        }
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        match &self.state {
            ModalState::Open(open) => Some(&open.carousel),
            ModalState::Closed => None,
        }
    }

    pub fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        match &mut self.state {
            ModalState::Open(open) => Some(&mut open.carousel),
            ModalState::Closed => None,
        }
    }

    /// Show `project`, replacing whatever was open.
    ///
    /// The previous open state is dropped before anything is acquired, so a
    /// switch between projects never holds two listeners or two locks.
    pub fn open(&mut self, project: Rc<ProjectRecord>) -> ModalEvent {
        self.state = ModalState::Closed;

        let escape = self.document.listen(EventKind::KeyDown, Listener::ModalEscape);
        let scroll = self.document.lock_scroll();
        let carousel = Carousel::new(
            &self.document,
            project.images.clone(),
            project.gradient.clone(),
        );
        debug!("modal opened for {:?}", project.title);
        let title = project.title.clone();
        self.state = ModalState::Open(OpenModal {
            project,
            carousel,
            _escape: escape,
            _scroll: scroll,
        });
        ModalEvent::Opened { title }
    }

    /// Hide the modal. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            ModalState::Open(open) => {
                debug!("modal closed for {:?}", open.project.title);
                true
            }
            ModalState::Closed => false,
        }
    }

    /// Handle a key delivered to the modal's Escape listener.
    pub fn handle_key(&mut self, key: &Key) -> Option<ModalEvent> {
        match key {
            Key::Escape => self.close().then_some(ModalEvent::Closed),
            _ => None,
        }
    }

    pub fn click(&mut self, target: ModalTarget) -> Option<ModalEvent> {
        let ModalState::Open(open) = &mut self.state else {
            return None;
        };
        // The fullscreen overlay sits above the panel and the backdrop.
        if open.carousel.is_fullscreen() && !matches!(target, ModalTarget::Carousel(_)) {
            return None;
        }
        match target {
            ModalTarget::Backdrop | ModalTarget::Close => {
                self.close().then_some(ModalEvent::Closed)
            }
            ModalTarget::Panel => None,
            ModalTarget::Link => open.project.link.clone().map(ModalEvent::OpenLink),
            ModalTarget::Carousel(t) => open.carousel.click(t).map(ModalEvent::Carousel),
        }
    }
}
