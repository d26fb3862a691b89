//! HTML rendering.
//!
//! Renders the portfolio page and the current state of its widgets as static
//! markup. The same functions serve the `render` command (a fresh page:
//! modal closed, dropdown closed) and the `replay` snapshot (whatever state
//! the scripted session left behind).
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html       # The page, in the requested locale
//! └── ...              # Everything under content/assets/, copied verbatim
//! ```
//!
//! ## Widget Markup
//!
//! - **Carousel**: empty sets render only `div.carousel-fallback` carrying
//!   the project's style token. Otherwise the current image, an expand
//!   button, and with more than one image the prev/next buttons, the
//!   `2/4` indicator and one dot per image. Fullscreen adds an overlay with
//!   the `2 / 4` counter, a close button and a thumbnail strip.
//! - **Modal**: nothing at all while closed. Open renders a backdrop and a
//!   sibling panel (so the panel is not inside the backdrop's click area).
//! - **Switcher**: trigger with the current locale code; the option list
//!   only while the dropdown is open.
//!
//! All interpolation goes through maud and is escaped.

use crate::carousel::{Carousel, Direction};
use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, ContentError, Labels, SiteContent};
use crate::host::Document;
use crate::locale::{LanguageSwitcher, Locale};
use crate::modal::ProjectModal;
use crate::page::{CONTACT_ANCHOR, Page};
use crate::types::ProjectRecord;
use log::{debug, info};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Asset path error: {0}")]
    AssetPath(#[from] std::path::StripPrefixError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What a `render` run produced.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub requested: Locale,
    /// Locale whose content was rendered.
    pub locale: Locale,
    pub index: PathBuf,
    pub projects: Vec<(String, usize)>,
    pub assets: Vec<PathBuf>,
}

/// Render the page for `locale` (or the configured default) into `output_dir`.
pub fn generate(
    source_dir: &Path,
    output_dir: &Path,
    locale: Option<Locale>,
) -> Result<RenderSummary, RenderError> {
    let config = config::load_config(source_dir)?;
    let requested = locale.unwrap_or(config.default_locale);
    let loaded = content::load_content(source_dir, requested, config.default_locale)?;

    let document = Document::new();
    let page = Page::new(&document, loaded.content, loaded.locale);

    let index = write_index(&page, &config, output_dir)?;
    let assets = copy_assets(&source_dir.join("assets"), output_dir)?;

    let projects = page
        .content()
        .projects
        .iter()
        .map(|p| (p.title.clone(), p.images.len()))
        .collect();
    Ok(RenderSummary {
        requested,
        locale: loaded.locale,
        index,
        projects,
        assets,
    })
}

/// Write the page in its current state to `output_dir/index.html`.
pub fn write_index(
    page: &Page,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(output_dir)?;
    let index = output_dir.join("index.html");
    fs::write(&index, render_page(page, config).into_string())?;
    info!("wrote {}", index.display());
    Ok(index)
}

/// Copy `assets_dir` into `output_dir`, returning copied paths relative to it.
///
/// A missing assets directory copies nothing.
pub fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let mut copied = Vec::new();
    if !assets_dir.is_dir() {
        return Ok(copied);
    }
    for entry in WalkDir::new(assets_dir).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(assets_dir)?;
        let target = output_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            debug!("copied asset {}", relative.display());
            copied.push(relative.to_path_buf());
        }
    }
    Ok(copied)
}

/// Full stylesheet: config-driven variables followed by the static rules.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_motion_css(config),
        CSS_STATIC
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    lang: Locale,
    css: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    }
}

/// Renders the header language dropdown.
pub fn render_switcher(switcher: &LanguageSwitcher) -> Markup {
    let current = switcher.current();
    let expanded = if switcher.is_open() { "true" } else { "false" };
    html! {
        div.locale-switcher.open[switcher.is_open()] {
            button.locale-trigger type="button" aria-expanded=(expanded) {
                span.locale-code { (current.code().to_uppercase()) }
                span.chevron { "▾" }
            }
            @if switcher.is_open() {
                ul.locale-menu role="menu" {
                    @for locale in Locale::ALL {
                        li {
                            button.locale-option.current[locale == current]
                                type="button" data-locale=(locale.code()) {
                                span.flag { (locale.flag()) }
                                span.label { (locale.label()) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn site_header(content: &SiteContent, switcher: &LanguageSwitcher) -> Markup {
    let labels = &content.labels;
    html! {
        header.site-header {
            span.monogram { (content.profile.monogram()) }
            nav.header-actions {
                (render_switcher(switcher))
                a.button.outline href={ "#" (CONTACT_ANCHOR) } { (labels.contact) }
                @if let Some(cv) = &content.profile.cv {
                    a.button href=(cv) download { (labels.download_cv) }
                }
            }
        }
    }
}

// ============================================================================
// Carousel and modal
// ============================================================================

/// Renders a carousel: inline view plus the overlay when fullscreen.
pub fn render_carousel(carousel: &Carousel, labels: &Labels) -> Markup {
    let (Some(index), Some(src)) = (carousel.current_index(), carousel.current_image()) else {
        return html! {
            div class={ "carousel-fallback " (carousel.fallback()) } {}
        };
    };
    let slide_style = format!("--slide-sign: {};", carousel.direction().sign());
    let alt = format!("Slide {}", index + 1);

    html! {
        div.carousel data-index=(index) data-count=(carousel.len()) {
            div.slide data-direction=(direction_name(carousel.direction())) style=(slide_style) {
                img.slide-image src=(src) alt=(alt);
            }
            div.carousel-top {
                @if let Some(indicator) = carousel.indicator() {
                    span.indicator { (indicator) }
                }
                button.expand type="button" aria-label=(labels.fullscreen) { "⤢" }
            }
            @if carousel.has_navigation() {
                button.nav.prev type="button" aria-label=(labels.previous) { "‹" }
                button.nav.next type="button" aria-label=(labels.next) { "›" }
                div.dots {
                    @for i in 0..carousel.len() {
                        button.dot.active[i == index] type="button" data-dot=(i)
                            aria-label={ (i + 1) " / " (carousel.len()) } {}
                    }
                }
            }
        }
        @if carousel.is_fullscreen() {
            (render_fullscreen(carousel, index, src, labels))
        }
    }
}

fn render_fullscreen(carousel: &Carousel, index: usize, src: &str, labels: &Labels) -> Markup {
    let slide_style = format!("--slide-sign: {};", carousel.direction().sign());
    let alt = format!("Slide {}", index + 1);
    html! {
        div.fullscreen-overlay role="dialog" aria-modal="true" {
            div.overlay-top {
                @if let Some(counter) = carousel.counter() {
                    span.counter { (counter) }
                }
                button.overlay-close type="button" aria-label=(labels.close) { "×" }
            }
            div.overlay-slide
                data-direction=(direction_name(carousel.direction()))
                style=(slide_style)
            {
                img.overlay-image src=(src) alt=(alt);
            }
            @if carousel.has_navigation() {
                button.overlay-nav.prev type="button" aria-label=(labels.previous) { "‹" }
                button.overlay-nav.next type="button" aria-label=(labels.next) { "›" }
                div.thumbnail-strip {
                    @for (i, image) in carousel.images().iter().enumerate() {
                        button.thumbnail.active[i == index] type="button" data-thumb=(i) {
                            img src=(image) alt={ "Thumb " (i + 1) } loading="lazy";
                        }
                    }
                }
            }
        }
    }
}

/// Renders the project modal. Closed renders nothing.
pub fn render_modal(modal: &ProjectModal, labels: &Labels) -> Markup {
    let (Some(project), Some(carousel)) = (modal.selected(), modal.carousel()) else {
        return html! {};
    };
    html! {
        div.modal-backdrop {}
        div.modal-panel role="dialog" aria-modal="true" aria-label=(project.title) {
            button.modal-close type="button" aria-label=(labels.close) { "×" }
            div.modal-carousel {
                (render_carousel(carousel, labels))
            }
            div.modal-body {
                h2 { (project.title) }
                p.full-description { (project.full_description) }
                (render_badges(&project.technologies))
                @if let Some(link) = &project.link {
                    a.button.block href=(link) target="_blank" rel="noopener noreferrer" {
                        (project.link_text)
                    }
                }
            }
        }
    }
}

fn render_badges(technologies: &[String]) -> Markup {
    html! {
        @if !technologies.is_empty() {
            ul.badges {
                @for tech in technologies {
                    li.badge { (tech) }
                }
            }
        }
    }
}

// ============================================================================
// Page sections
// ============================================================================

fn hero(content: &SiteContent) -> Markup {
    let profile = &content.profile;
    html! {
        section.hero {
            h1 { (profile.name) }
            h2.role { (profile.role) }
            @if let Some(subtitle) = &profile.subtitle {
                p.subtitle { (subtitle) }
            }
            div.bio { (markdown(&profile.description)) }
            (social_links(content))
        }
    }
}

fn social_links(content: &SiteContent) -> Markup {
    let profile = &content.profile;
    html! {
        div.social {
            @if let Some(github) = &profile.github {
                a.social-link href=(github) target="_blank" rel="noopener noreferrer" { "GitHub" }
            }
            @if let Some(linkedin) = &profile.linkedin {
                a.social-link href=(linkedin) target="_blank" rel="noopener noreferrer" {
                    "LinkedIn"
                }
            }
        }
    }
}

fn education(content: &SiteContent) -> Markup {
    html! {
        @if !content.education.is_empty() {
            section.education {
                h2 { (content.labels.education) }
                @for entry in &content.education {
                    article.card {
                        h3 { (entry.degree) }
                        p.muted { (entry.institution) }
                        @if !entry.description.is_empty() {
                            p { (entry.description) }
                        }
                        @if let Some(period) = &entry.period {
                            p.period { (period) }
                        }
                    }
                }
            }
        }
    }
}

fn project_card(index: usize, project: &ProjectRecord, labels: &Labels) -> Markup {
    html! {
        article.project-card data-project=(index) {
            @if let Some(cover) = project.cover() {
                img.cover src=(cover) alt=(project.title) loading="lazy";
            } @else {
                div class={ "cover " (project.gradient) } {}
            }
            h3 { (project.title) }
            p.muted { (project.description) }
            (render_badges(&project.technologies))
            button.view-more type="button" data-project=(index) { (labels.view_more) }
        }
    }
}

fn projects(content: &SiteContent) -> Markup {
    html! {
        @if !content.projects.is_empty() {
            section.projects {
                h2 { (content.labels.projects) }
                div.project-grid {
                    @for (i, project) in content.projects.iter().enumerate() {
                        (project_card(i, project, &content.labels))
                    }
                }
            }
        }
    }
}

fn work(content: &SiteContent) -> Markup {
    html! {
        @if !content.work.is_empty() {
            section.work {
                h2 { (content.labels.work) }
                @for job in &content.work {
                    article.card {
                        h3 { (job.title) }
                        p.muted { (job.company) }
                        @if !job.description.is_empty() {
                            p { (job.description) }
                        }
                        @if let Some(period) = &job.period {
                            p.period { (period) }
                        }
                    }
                }
            }
        }
    }
}

fn courses(content: &SiteContent) -> Markup {
    html! {
        @if !content.courses.is_empty() {
            section.courses {
                h2 { (content.labels.courses) }
                @for course in &content.courses {
                    div.course {
                        h3 { (course.title) }
                        p.muted { (course.description) }
                    }
                }
            }
        }
    }
}

fn skills(content: &SiteContent) -> Markup {
    html! {
        @if !content.skills.is_empty() {
            section.skills {
                h2 { (content.labels.skills) }
                div.skill-groups {
                    @for group in &content.skills {
                        div.skill-group {
                            h3 { (group.title) }
                            ul {
                                @for item in &group.items {
                                    li { (item) }
                                }
                            }
                        }
                    }
                }
            }
        }
        @if let Some(languages) = &content.languages {
            section.languages {
                h2 { (content.labels.languages) }
                p { (languages) }
            }
        }
    }
}

fn contact(content: &SiteContent) -> Markup {
    let c = &content.contact;
    html! {
        section.contact id=(CONTACT_ANCHOR) {
            h2 { (c.title.as_deref().unwrap_or(&content.labels.contact)) }
            @if let Some(description) = &c.description {
                p { (description) }
            }
            @if let Some(email) = &c.email {
                a.button href={ "mailto:" (email) } { (email) }
            }
            (social_links(content))
        }
        @if let Some(footer) = &content.footer {
            footer.site-footer { p { (footer) } }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the whole page in its current state.
pub fn render_page(page: &Page, config: &SiteConfig) -> Markup {
    let content = page.content();
    let css = stylesheet(config);
    let body_class = page.document().is_scroll_locked().then_some("scroll-locked");

    let body = html! {
        (site_header(content, page.switcher()))
        main {
            (hero(content))
            (education(content))
            (projects(content))
            (work(content))
            (courses(content))
            (skills(content))
            (contact(content))
        }
        (render_modal(page.modal(), &content.labels))
    };

    base_document(&content.profile.name, page.content_locale(), &css, body_class, body)
}

// ============================================================================
// Tests
// ============================================================================
