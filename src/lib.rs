//! # Folio
//!
//! A single-page developer portfolio: profile, education, work history,
//! skills, and a grid of project cards. A card opens a modal with the
//! project's long description and an image carousel that can go fullscreen.
//!
//! # Architecture: Widgets Over a Shared Document
//!
//! The interactive parts of the page are plain state machines. Anything they
//! do to the page as a whole (listening for global keys, freezing body
//! scroll, listening for outside clicks) is an acquisition on the shared
//! [`host::Document`] that returns a guard. Dropping the guard undoes it.
//!
//! ```text
//! Page ─┬─ ProjectModal ── Closed | Open { project, Carousel, Escape guard, ScrollLock }
//!       │                                          └─ fullscreen: Option<key guard>
//!       └─ LanguageSwitcher ── dropdown: Option<mousedown guard>
//! ```
//!
//! Because the open modal *owns* its guards, "listener attached and scroll
//! locked iff the modal is open" holds by construction: closing the modal,
//! opening another project over it, or dropping the page all release them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Image carousel: wraparound navigation, inline and fullscreen modes |
//! | [`modal`] | Project detail modal: open/closed state, backdrop and Escape handling |
//! | [`host`] | Shared document state: global listeners and the body scroll lock |
//! | [`locale`] | Supported locales, the locale cookie, and the language switcher |
//! | [`page`] | One visitor session: routes clicks and keys to the widgets |
//! | [`content`] | Per-locale TOML content loading and validation |
//! | [`types`] | The project record shown in cards and in the modal |
//! | [`config`] | `config.toml` loading, merging over stock defaults, CSS generation |
//! | [`render`] | Renders a page state to HTML using Maud |
//! | [`replay`] | Scripted interaction sessions for the `replay` command |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Every Listener Hears the Key
//!
//! Key presses are dispatched like DOM events: every attached listener that
//! binds the key receives it, in attachment order. The modal's Escape
//! listener is attached before the fullscreen one, so Escape in fullscreen
//! closes the modal, and the carousel it owns leaves fullscreen with it.
//!
//! ## Content Can Lag the Switcher
//!
//! Picking a locale with no content file serves the default locale's
//! content. The page keeps both: the switcher shows what was picked and
//! the rendered `lang` follows the content actually shown.
//!
//! ## Content Is Resolved, Not Looked Up
//!
//! Each locale has its own content file with every display string in it.
//! The widgets never see translation keys: a [`types::ProjectRecord`] carries
//! its title, description, and link label already in the page's language.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a build error and all interpolation is escaped.

pub mod carousel;
pub mod config;
pub mod content;
pub mod host;
pub mod locale;
pub mod modal;
pub mod output;
pub mod page;
pub mod render;
pub mod replay;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
