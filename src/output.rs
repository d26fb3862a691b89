//! CLI output formatting for every command.
//!
//! Output leads with what the visitor would see (project titles, image
//! positions, the open modal) and keeps file names as secondary context.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Locale: en
//! 001 Pain Map (4 images)
//! 002 Biovolt (1 image)
//!
//! Assets
//!     robots.txt
//!
//! Wrote index.html
//! ```
//!
//! ## Check
//!
//! ```text
//! pt → pt.toml (3 projects, 5 images)
//! en → en.toml (2 projects, 5 images)
//! es → pt.toml (3 projects, 5 images, fallback)
//!
//! Checked 3 locales
//! ```
//!
//! ## Replay
//!
//! ```text
//! 003 click carousel:expand
//!     Event: fullscreen entered
//!     Modal: Mapa da Dor, image 2/4, forward, fullscreen
//!     Page: pt, scroll locked, 2 key listeners
//!
//! 016 click locale:es
//!     Event: locale set to es (cookie locale=es;path=/;max-age=31536000)
//!     Modal: closed
//!     Page: es (pt content), scroll free, 0 key listeners
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::carousel::{CarouselEvent, Direction};
use crate::content::LocaleReport;
use crate::host::Overflow;
use crate::modal::ModalEvent;
use crate::page::PageEvent;
use crate::render::RenderSummary;
use crate::replay::{Snapshot, Step};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 image`, `4 images`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    }
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_output(summary: &RenderSummary) -> Vec<String> {
    let mut lines = Vec::new();

    if summary.locale == summary.requested {
        lines.push(format!("Locale: {}", summary.locale));
    } else {
        lines.push(format!(
            "Locale: {} ({} requested, no {}.toml)",
            summary.locale,
            summary.requested,
            summary.requested.code()
        ));
    }

    for (i, (title, images)) in summary.projects.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            title,
            plural(*images, "image")
        ));
    }

    if !summary.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &summary.assets {
            lines.push(format!("{}{}", indent(1), asset.display()));
        }
    }

    lines.push(String::new());
    let written = summary
        .index
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| summary.index.display().to_string());
    lines.push(format!("Wrote {written}"));
    lines
}

pub fn print_render_output(summary: &RenderSummary) {
    for line in format_render_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(reports: &[LocaleReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        let fallback = if report.source == report.locale {
            ""
        } else {
            ", fallback"
        };
        lines.push(format!(
            "{} \u{2192} {}.toml ({}, {}{})",
            report.locale,
            report.source.code(),
            plural(report.projects, "project"),
            plural(report.images, "image"),
            fallback
        ));
    }
    lines.push(String::new());
    lines.push(format!("Checked {}", plural(reports.len(), "locale")));
    lines
}

pub fn print_check_output(reports: &[LocaleReport]) {
    for line in format_check_output(reports) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

/// One-line description of an event for the replay log.
pub fn describe_event(event: &PageEvent) -> String {
    match event {
        PageEvent::Modal(ModalEvent::Opened { title }) => format!("opened {title}"),
        PageEvent::Modal(ModalEvent::Closed) => "closed".to_string(),
        PageEvent::Modal(ModalEvent::OpenLink(url)) => format!("open {url} in a new tab"),
        PageEvent::Modal(ModalEvent::Carousel(CarouselEvent::Slide(slide))) => format!(
            "slide {} \u{2192} {} ({})",
            slide.from + 1,
            slide.to + 1,
            direction_name(slide.direction)
        ),
        PageEvent::Modal(ModalEvent::Carousel(CarouselEvent::FullscreenEntered)) => {
            "fullscreen entered".to_string()
        }
        PageEvent::Modal(ModalEvent::Carousel(CarouselEvent::FullscreenExited)) => {
            "fullscreen exited".to_string()
        }
        PageEvent::LocaleChanged(locale) => {
            format!("locale set to {locale} (cookie {})", locale.cookie())
        }
        PageEvent::ScrollTo(anchor) => format!("scroll to #{anchor}"),
        PageEvent::Download(path) => format!("download {path}"),
    }
}

fn modal_line(state: &Snapshot) -> String {
    let Some(project) = &state.project else {
        return "Modal: closed".to_string();
    };
    let position = match state.index {
        Some(i) => format!("image {}/{}", i + 1, state.image_count),
        None => "no images".to_string(),
    };
    let mut line = format!("Modal: {project}, {position}");
    if state.image_count > 1 {
        if let Some(direction) = state.direction {
            line.push_str(", ");
            line.push_str(direction_name(direction));
        }
    }
    if state.fullscreen {
        line.push_str(", fullscreen");
    }
    line
}

fn page_line(state: &Snapshot) -> String {
    let scroll = match state.overflow {
        Overflow::Hidden => "scroll locked",
        Overflow::Auto => "scroll free",
    };
    let locale = if state.content_locale == state.locale {
        state.locale.to_string()
    } else {
        format!("{} ({} content)", state.locale, state.content_locale)
    };
    let mut line = format!(
        "Page: {}, {}, {}",
        locale,
        scroll,
        plural(state.key_listeners, "key listener")
    );
    if state.switcher_open {
        line.push_str(", switcher open");
    }
    line
}

/// Format one replayed input with its outcome and the resulting state.
pub fn format_step(step: &Step) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(step.line), step.input)];
    if !step.handled_by.is_empty() {
        let names: Vec<&str> = step.handled_by.iter().map(|l| l.name()).collect();
        lines.push(format!("{}Handled by: {}", indent(1), names.join(", ")));
    }
    for event in &step.events {
        lines.push(format!("{}Event: {}", indent(1), describe_event(event)));
    }
    lines.push(format!("{}{}", indent(1), modal_line(&step.state)));
    lines.push(format!("{}{}", indent(1), page_line(&step.state)));
    lines
}

pub fn format_replay_output(steps: &[Step]) -> Vec<String> {
    let mut lines = Vec::new();
    for step in steps {
        lines.extend(format_step(step));
    }
    lines.push(String::new());
    lines.push(format!("Replayed {}", plural(steps.len(), "input")));
    lines
}

pub fn print_replay_output(steps: &[Step]) {
    for line in format_replay_output(steps) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
