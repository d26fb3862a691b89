//! Supported locales and the header language switcher.
//!
//! The chosen locale persists in a `locale` cookie for a year. The switcher
//! is a dropdown: while it is open it listens for mousedown anywhere on the
//! page and closes when the press lands outside it.

use crate::host::{Document, EventKind, Listener, ListenerGuard};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cookie lifetime in seconds (one year).
pub const COOKIE_MAX_AGE: u32 = 31_536_000;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unsupported locale '{0}' (expected one of: pt, en, es)")]
pub struct UnknownLocale(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Pt, Locale::En, Locale::Es];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Name of the language in that language.
    pub fn label(self) -> &'static str {
        match self {
            Locale::Pt => "Português",
            Locale::En => "English",
            Locale::Es => "Español",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Locale::Pt => "🇧🇷",
            Locale::En => "🇺🇸",
            Locale::Es => "🇪🇸",
        }
    }

    /// Read the `locale` entry of a `Cookie` header.
    ///
    /// Missing, empty, or unsupported values yield `None`.
    pub fn from_cookie_header(header: &str) -> Option<Locale> {
        header
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix("locale="))
            .and_then(|value| value.parse().ok())
    }

    /// `Set-Cookie` value that persists this locale site-wide.
    pub fn cookie(self) -> String {
        format!("locale={};path=/;max-age={COOKIE_MAX_AGE}", self.code())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Locale::Pt),
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// Clickable parts of the switcher. Anything else on the page is outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherTarget {
    Trigger,
    Option(Locale),
}

#[derive(Debug)]
pub struct LanguageSwitcher {
    document: Document,
    current: Locale,
    pending: Option<Locale>,
    dropdown: Option<ListenerGuard>,
}

impl LanguageSwitcher {
    pub fn new(document: &Document, current: Locale) -> Self {
        Self {
            document: document.clone(),
            current,
            pending: None,
            dropdown: None,
        }
    }

    pub fn current(&self) -> Locale {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_some()
    }

    pub fn toggle(&mut self) {
        if self.dropdown.take().is_none() {
            self.dropdown = Some(
                self.document
                    .listen(EventKind::MouseDown, Listener::SwitcherOutsideClick),
            );
        }
    }

    pub fn close(&mut self) {
        self.dropdown = None;
    }

    /// Switch to `locale`. The change stays pending until the page reloads
    /// its content for it (see [`take_pending`](Self::take_pending)).
    pub fn select(&mut self, locale: Locale) {
        self.current = locale;
        self.pending = Some(locale);
        self.close();
    }

    /// Locale whose cookie must be written and content reloaded, if any.
    pub fn take_pending(&mut self) -> Option<Locale> {
        self.pending.take()
    }

    pub fn click(&mut self, target: SwitcherTarget) {
        match target {
            SwitcherTarget::Trigger => self.toggle(),
            SwitcherTarget::Option(locale) if self.is_open() => self.select(locale),
            SwitcherTarget::Option(_) => {}
        }
    }

    /// Mousedown delivered to the outside-click listener.
    pub fn mouse_down(&mut self, inside: bool) {
        if !inside {
            self.close();
        }
    }
}
