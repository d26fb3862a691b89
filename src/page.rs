//! One visitor session on the portfolio page.
//!
//! [`Page`] owns the document and every stateful widget on it, and turns raw
//! input (a click on some target, a key press, a mouse press) into calls on
//! those widgets.
//!
//! ## Routing
//!
//! - **Clicks** go to the widget that owns the target. A click is preceded by
//!   a mousedown, as in a browser, so a click anywhere outside an open
//!   language dropdown also closes it. While the modal is up its backdrop
//!   covers the page, so only modal targets are reachable.
//! - **Keys** go to every global key listener that binds them, in attachment
//!   order, as the DOM delivers a keydown to each `document` listener. Escape
//!   is bound by both the modal and the fullscreen carousel, so one Escape in
//!   fullscreen closes the whole modal. Arrow keys are bound by the
//!   fullscreen carousel alone.

use crate::carousel::Carousel;
use crate::content::{LoadedContent, SiteContent};
use crate::host::{Document, EventKind, Key, Listener};
use crate::locale::{LanguageSwitcher, Locale, SwitcherTarget};
use crate::modal::{ModalEvent, ModalTarget, ProjectModal};
use log::{debug, warn};
use serde::Serialize;
use std::rc::Rc;

/// Anchor of the contact section.
pub const CONTACT_ANCHOR: &str = "contact";

/// Something a visitor can click or press the mouse on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// "View more" on the n-th project card.
    ProjectCard(usize),
    Modal(ModalTarget),
    Switcher(SwitcherTarget),
    /// Header contact button.
    Contact,
    /// Header CV download button.
    DownloadCv,
    /// Any other point on the page.
    Elsewhere,
}

/// Outcome of an input the host has to act on, or that is worth reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum PageEvent {
    Modal(ModalEvent),
    /// Write the locale cookie and reload content.
    LocaleChanged(Locale),
    ScrollTo(String),
    Download(String),
}

/// Result of one key press.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyDispatch {
    /// Listeners that bound the key, in delivery order.
    pub handled_by: Vec<Listener>,
    pub events: Vec<PageEvent>,
}

#[derive(Debug)]
pub struct Page {
    document: Document,
    content: SiteContent,
    /// Locale whose content file is loaded; differs from the switcher's
    /// locale when that one has no file of its own.
    content_locale: Locale,
    modal: ProjectModal,
    switcher: LanguageSwitcher,
}

impl Page {
    pub fn new(document: &Document, content: SiteContent, locale: Locale) -> Self {
        Self {
            document: document.clone(),
            content,
            content_locale: locale,
            modal: ProjectModal::new(document),
            switcher: LanguageSwitcher::new(document, locale),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// Locale the visitor picked.
    pub fn locale(&self) -> Locale {
        self.switcher.current()
    }

    /// Locale of the content on the page, which sets the document language.
    pub fn content_locale(&self) -> Locale {
        self.content_locale
    }

    pub fn modal(&self) -> &ProjectModal {
        &self.modal
    }

    pub fn switcher(&self) -> &LanguageSwitcher {
        &self.switcher
    }

    /// Swap in content reloaded for a new locale.
    ///
    /// The open project belongs to the old content, so the modal closes.
    pub fn replace_content(&mut self, loaded: LoadedContent) {
        self.modal.close();
        if loaded.locale != self.locale() {
            warn!(
                "no content for {}, showing {} content",
                self.locale(),
                loaded.locale
            );
        }
        self.content = loaded.content;
        self.content_locale = loaded.locale;
    }

    /// Open the modal on the `index`-th project.
    pub fn select_project(&mut self, index: usize) -> Option<ModalEvent> {
        match self.content.projects.get(index) {
            Some(project) => Some(self.modal.open(Rc::clone(project))),
            None => {
                warn!(
                    "ignoring selection of project {index} ({} projects)",
                    self.content.projects.len()
                );
                None
            }
        }
    }

    pub fn click(&mut self, target: Target) -> Option<PageEvent> {
        self.mouse_down(target);

        if self.modal.is_open() {
            return match target {
                Target::Modal(t) => self.modal.click(t).map(PageEvent::Modal),
                _ => None,
            };
        }
        match target {
            Target::ProjectCard(i) => self.select_project(i).map(PageEvent::Modal),
            Target::Switcher(t) => {
                self.switcher.click(t);
                self.switcher.take_pending().map(PageEvent::LocaleChanged)
            }
            Target::Contact => Some(PageEvent::ScrollTo(CONTACT_ANCHOR.to_string())),
            Target::DownloadCv => self.content.profile.cv.clone().map(PageEvent::Download),
            Target::Modal(_) | Target::Elsewhere => None,
        }
    }

    /// Deliver a mousedown to the global mousedown listeners.
    pub fn mouse_down(&mut self, target: Target) {
        for listener in self.document.listeners(EventKind::MouseDown) {
            if listener == Listener::SwitcherOutsideClick {
                self.switcher
                    .mouse_down(matches!(target, Target::Switcher(_)));
            }
        }
    }

    pub fn key_down(&mut self, key: &Key) -> KeyDispatch {
        let mut dispatch = KeyDispatch::default();
        for listener in self.document.listeners(EventKind::KeyDown) {
            // Detached by an earlier listener in this dispatch.
            if !self.document.is_listening(EventKind::KeyDown, listener) {
                continue;
            }
            let event = match listener {
                Listener::CarouselKeys if Carousel::binds(key) => self
                    .modal
                    .carousel_mut()
                    .and_then(|c| c.handle_key(key))
                    .map(|e| PageEvent::Modal(ModalEvent::Carousel(e))),
                Listener::ModalEscape if *key == Key::Escape => {
                    self.modal.handle_key(key).map(PageEvent::Modal)
                }
                _ => continue,
            };
            dispatch.handled_by.push(listener);
            dispatch.events.extend(event);
        }
        if dispatch.handled_by.is_empty() {
            debug!("key {key} not bound by any listener");
        }
        dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{CarouselEvent, CarouselTarget};
    use crate::test_helpers::{content_with_projects, page_with_projects, project};

    #[test]
    fn card_click_opens_modal_at_first_image() {
        let (doc, mut page) = page_with_projects(&[3, 2]);
        let event = page.click(Target::ProjectCard(1));
        assert!(matches!(
            event,
            Some(PageEvent::Modal(ModalEvent::Opened { .. }))
        ));
        assert_eq!(page.modal().carousel().unwrap().current_index(), Some(0));
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn out_of_range_card_is_ignored() {
        let (_doc, mut page) = page_with_projects(&[1]);
        assert!(page.click(Target::ProjectCard(5)).is_none());
        assert!(!page.modal().is_open());
    }

    #[test]
    fn escape_in_fullscreen_closes_modal() {
        let (doc, mut page) = page_with_projects(&[3]);
        page.click(Target::ProjectCard(0));
        page.click(Target::Modal(ModalTarget::Carousel(CarouselTarget::Expand)));
        assert_eq!(doc.listener_count(EventKind::KeyDown), 2);

        let dispatch = page.key_down(&Key::Escape);
        assert_eq!(dispatch.handled_by, vec![Listener::ModalEscape]);
        assert_eq!(dispatch.events, vec![PageEvent::Modal(ModalEvent::Closed)]);
        assert!(!page.modal().is_open());
        assert_eq!(doc.listener_count(EventKind::KeyDown), 0);
        assert!(!doc.is_scroll_locked());

        assert!(page.key_down(&Key::Escape).handled_by.is_empty());
    }

    #[test]
    fn overlay_close_keeps_modal_open() {
        let (doc, mut page) = page_with_projects(&[3]);
        page.click(Target::ProjectCard(0));
        page.click(Target::Modal(ModalTarget::Carousel(CarouselTarget::Expand)));
        let event = page.click(Target::Modal(ModalTarget::Carousel(CarouselTarget::OverlayClose)));

        assert_eq!(
            event,
            Some(PageEvent::Modal(ModalEvent::Carousel(CarouselEvent::FullscreenExited)))
        );
        assert!(page.modal().is_open());
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn arrows_ignored_outside_fullscreen() {
        let (_doc, mut page) = page_with_projects(&[3]);
        page.click(Target::ProjectCard(0));
        let dispatch = page.key_down(&Key::ArrowRight);
        assert!(dispatch.handled_by.is_empty());
        assert_eq!(page.modal().carousel().unwrap().current_index(), Some(0));
    }

    #[test]
    fn arrows_navigate_in_fullscreen() {
        let (_doc, mut page) = page_with_projects(&[3]);
        page.click(Target::ProjectCard(0));
        page.click(Target::Modal(ModalTarget::Carousel(CarouselTarget::Image)));
        let dispatch = page.key_down(&Key::ArrowLeft);
        assert_eq!(dispatch.handled_by, vec![Listener::CarouselKeys]);
        assert_eq!(page.modal().carousel().unwrap().current_index(), Some(2));
    }

    #[test]
    fn one_escape_listener_after_reopen() {
        let (doc, mut page) = page_with_projects(&[2, 2]);
        page.click(Target::ProjectCard(0));
        page.click(Target::Modal(ModalTarget::Close));
        page.click(Target::ProjectCard(1));

        assert_eq!(doc.listeners(EventKind::KeyDown), vec![Listener::ModalEscape]);
        let dispatch = page.key_down(&Key::Escape);
        assert_eq!(dispatch.handled_by, vec![Listener::ModalEscape]);
        assert_eq!(doc.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn page_targets_unreachable_while_modal_open() {
        let (_doc, mut page) = page_with_projects(&[1, 1]);
        page.click(Target::ProjectCard(0));
        assert!(page.click(Target::ProjectCard(1)).is_none());
        assert!(page.click(Target::Contact).is_none());
        assert_eq!(page.modal().selected().unwrap().title, "Project 0");
    }

    #[test]
    fn switcher_flow_emits_locale_change() {
        let (doc, mut page) = page_with_projects(&[]);
        assert!(page.click(Target::Switcher(SwitcherTarget::Trigger)).is_none());
        assert!(page.switcher().is_open());

        let event = page.click(Target::Switcher(SwitcherTarget::Option(Locale::Es)));
        assert_eq!(event, Some(PageEvent::LocaleChanged(Locale::Es)));
        assert_eq!(page.locale(), Locale::Es);
        assert_eq!(doc.listener_count(EventKind::MouseDown), 0);
    }

    #[test]
    fn click_elsewhere_closes_switcher() {
        let (_doc, mut page) = page_with_projects(&[]);
        page.click(Target::Switcher(SwitcherTarget::Trigger));
        page.click(Target::Elsewhere);
        assert!(!page.switcher().is_open());
    }

    #[test]
    fn contact_and_cv_buttons() {
        let (_doc, mut page) = page_with_projects(&[]);
        assert_eq!(
            page.click(Target::Contact),
            Some(PageEvent::ScrollTo("contact".into()))
        );
        assert_eq!(
            page.click(Target::DownloadCv),
            Some(PageEvent::Download("/cv.docx".into()))
        );
    }

    #[test]
    fn replacing_content_closes_modal() {
        let (doc, mut page) = page_with_projects(&[2]);
        page.click(Target::ProjectCard(0));
        let mut content = page.content().clone();
        content.projects = vec![project("Other", 1)];
        page.replace_content(LoadedContent {
            locale: Locale::Pt,
            content,
        });

        assert!(!page.modal().is_open());
        assert!(!doc.is_scroll_locked());
        assert_eq!(page.content().projects[0].title, "Other");
    }

    #[test]
    fn fallback_content_keeps_its_own_locale() {
        let (_doc, mut page) = page_with_projects(&[]);
        page.click(Target::Switcher(SwitcherTarget::Trigger));
        page.click(Target::Switcher(SwitcherTarget::Option(Locale::Es)));
        page.replace_content(LoadedContent {
            locale: Locale::Pt,
            content: content_with_projects(&[1]),
        });

        assert_eq!(page.locale(), Locale::Es);
        assert_eq!(page.content_locale(), Locale::Pt);
    }
}
