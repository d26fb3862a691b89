//! Scripted interaction sessions.
//!
//! A replay script is a plain-text list of inputs, one per line, that is fed
//! through a [`Page`] exactly as a visitor's clicks and key presses would be.
//! After every input the session's state is captured, so a script doubles as
//! an executable walkthrough of the carousel and modal behavior.
//!
//! ```text
//! # comments and blank lines are ignored
//! click card:0               open the first project
//! click carousel:expand      fullscreen
//! key ArrowRight             next image (fullscreen only)
//! key Escape                 close the modal (and fullscreen with it)
//! click switcher             open the language dropdown
//! click locale:en            switch locale (content is reloaded)
//! mousedown elsewhere        press outside the dropdown
//! ```
//!
//! Click targets: `card:N`, `backdrop`, `panel`, `close`, `link`,
//! `carousel:{image,expand,prev,next,dot:N,overlay,overlay-image,
//! overlay-close,overlay-prev,overlay-next,thumbs,thumb:N}`, `switcher`,
//! `locale:CODE`, `contact`, `cv`, `elsewhere`.

use crate::carousel::{CarouselTarget, Direction};
use crate::content::{ContentError, LoadedContent};
use crate::host::{EventKind, Key, Listener, Overflow};
use crate::locale::{Locale, SwitcherTarget};
use crate::modal::ModalTarget;
use crate::page::{Page, PageEvent, Target};
use log::info;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Click(Target),
    MouseDown(Target),
    Key(Key),
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the script.
    pub line: usize,
    /// The line as written, trimmed.
    pub source: String,
    pub action: Action,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ReplayError> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let source = raw.trim();
        if source.is_empty() || source.starts_with('#') {
            continue;
        }
        let action =
            parse_action(source).map_err(|message| ReplayError::Parse { line, message })?;
        lines.push(ScriptLine {
            line,
            source: source.to_string(),
            action,
        });
    }
    Ok(lines)
}

fn parse_action(source: &str) -> Result<Action, String> {
    let mut words = source.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let arg = words
        .next()
        .ok_or_else(|| format!("'{verb}' needs an argument"))?;
    if let Some(extra) = words.next() {
        return Err(format!("unexpected '{extra}'"));
    }
    match verb {
        "click" => parse_target(arg).map(Action::Click),
        "mousedown" => parse_target(arg).map(Action::MouseDown),
        "key" => Ok(Action::Key(Key::from(arg))),
        other => Err(format!("unknown action '{other}' (expected click, mousedown, key)")),
    }
}

fn parse_index(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("'{s}' is not an index"))
}

fn parse_target(arg: &str) -> Result<Target, String> {
    let (head, rest) = match arg.split_once(':') {
        Some((head, rest)) => (head, Some(rest)),
        None => (arg, None),
    };
    let target = match (head, rest) {
        ("card", Some(n)) => Target::ProjectCard(parse_index(n)?),
        ("backdrop", None) => Target::Modal(ModalTarget::Backdrop),
        ("panel", None) => Target::Modal(ModalTarget::Panel),
        ("close", None) => Target::Modal(ModalTarget::Close),
        ("link", None) => Target::Modal(ModalTarget::Link),
        ("carousel", Some(part)) => Target::Modal(ModalTarget::Carousel(parse_carousel(part)?)),
        ("switcher", None) => Target::Switcher(SwitcherTarget::Trigger),
        ("locale", Some(code)) => Target::Switcher(SwitcherTarget::Option(
            code.parse::<Locale>().map_err(|e| e.to_string())?,
        )),
        ("contact", None) => Target::Contact,
        ("cv", None) => Target::DownloadCv,
        ("elsewhere", None) => Target::Elsewhere,
        _ => return Err(format!("unknown target '{arg}'")),
    };
    Ok(target)
}

fn parse_carousel(part: &str) -> Result<CarouselTarget, String> {
    let target = match part.split_once(':') {
        Some(("dot", n)) => CarouselTarget::Dot(parse_index(n)?),
        Some(("thumb", n)) => CarouselTarget::Thumbnail(parse_index(n)?),
        Some(_) => return Err(format!("unknown carousel target '{part}'")),
        None => match part {
            "image" => CarouselTarget::Image,
            "expand" => CarouselTarget::Expand,
            "prev" => CarouselTarget::Previous,
            "next" => CarouselTarget::Next,
            "overlay" => CarouselTarget::Overlay,
            "overlay-image" => CarouselTarget::OverlayImage,
            "overlay-close" => CarouselTarget::OverlayClose,
            "overlay-prev" => CarouselTarget::OverlayPrevious,
            "overlay-next" => CarouselTarget::OverlayNext,
            "thumbs" => CarouselTarget::ThumbnailStrip,
            _ => return Err(format!("unknown carousel target '{part}'")),
        },
    };
    Ok(target)
}

/// Observable session state after an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub locale: Locale,
    /// Locale of the loaded content; differs from `locale` on fallback.
    pub content_locale: Locale,
    pub switcher_open: bool,
    pub project: Option<String>,
    pub index: Option<usize>,
    pub image_count: usize,
    pub image: Option<String>,
    pub fullscreen: bool,
    pub direction: Option<Direction>,
    pub key_listeners: usize,
    pub mouse_listeners: usize,
    pub overflow: Overflow,
}

impl Snapshot {
    pub fn capture(page: &Page) -> Self {
        let doc = page.document();
        let modal = page.modal();
        let carousel = modal.carousel();
        Self {
            locale: page.locale(),
            content_locale: page.content_locale(),
            switcher_open: page.switcher().is_open(),
            project: modal.selected().map(|p| p.title.clone()),
            index: carousel.and_then(|c| c.current_index()),
            image_count: carousel.map_or(0, |c| c.len()),
            image: carousel.and_then(|c| c.current_image()).map(str::to_string),
            fullscreen: carousel.is_some_and(|c| c.is_fullscreen()),
            direction: carousel.map(|c| c.direction()),
            key_listeners: doc.listener_count(EventKind::KeyDown),
            mouse_listeners: doc.listener_count(EventKind::MouseDown),
            overflow: doc.overflow(),
        }
    }
}

/// One replayed input and what came of it.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub line: usize,
    pub input: String,
    /// Key listeners the input was delivered to.
    pub handled_by: Vec<Listener>,
    pub events: Vec<PageEvent>,
    pub state: Snapshot,
}

/// Feed `script` through `page`.
///
/// A locale change calls `reload` for the new locale's content and swaps it
/// into the page before the next input. The reloaded content may come from
/// the fallback locale's file.
pub fn run<F>(
    page: &mut Page,
    script: &[ScriptLine],
    mut reload: F,
) -> Result<Vec<Step>, ReplayError>
where
    F: FnMut(Locale) -> Result<LoadedContent, ContentError>,
{
    let mut steps = Vec::with_capacity(script.len());
    for entry in script {
        let (handled_by, events) = match &entry.action {
            Action::Click(target) => (Vec::new(), page.click(*target).into_iter().collect()),
            Action::MouseDown(target) => {
                page.mouse_down(*target);
                (Vec::new(), Vec::new())
            }
            Action::Key(key) => {
                let dispatch = page.key_down(key);
                (dispatch.handled_by, dispatch.events)
            }
        };
        for event in &events {
            if let PageEvent::LocaleChanged(locale) = event {
                info!("reloading content for {locale}");
                page.replace_content(reload(*locale)?);
            }
        }
        steps.push(Step {
            line: entry.line,
            input: entry.source.clone(),
            handled_by,
            events,
            state: Snapshot::capture(page),
        });
    }
    Ok(steps)
}
