//! Content loading.
//!
//! Every display string on the page comes from one TOML file per locale in
//! the content directory. Nothing downstream looks up translation keys: the
//! loader hands over fully resolved records.
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (optional)
//! ├── pt.toml            # Portuguese content (default locale)
//! ├── en.toml
//! ├── es.toml
//! └── assets/            # Images, CV, favicon → copied to the output root
//! ```
//!
//! A locale without its own file falls back to the default locale's file.
//!
//! ## File shape
//!
//! ```toml
//! [profile]
//! name = "Julia Kfouri"
//! initials = "JK"
//! role = "Frontend developer"
//! description = "Markdown **allowed** here."
//!
//! [labels]
//! visit_project = "Visit project"
//!
//! [[projects]]
//! title = "Pain map"
//! description = "Mapping chronic pain"
//! images = ["/mapa-dor1.png", "/mapa-dor2.png"]
//! gradient = "gradient-blue"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::Locale;
use crate::types::ProjectRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("No content file for '{requested}' or fallback '{fallback}' in {dir}")]
    MissingLocale {
        requested: Locale,
        fallback: Locale,
        dir: PathBuf,
    },
    #[error("Content validation error in {locale}.toml: {message}")]
    Validation { locale: Locale, message: String },
}

/// Everything the page displays, for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContent {
    pub profile: Profile,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Rc<ProjectRecord>>,
    #[serde(default)]
    pub work: Vec<Job>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    /// Spoken languages paragraph.
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    /// Header monogram; derived from `name` when omitted.
    #[serde(default)]
    pub initials: Option<String>,
    pub role: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Markdown.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Downloadable CV, relative to the site root (e.g. `/cv.docx`).
    #[serde(default)]
    pub cv: Option<String>,
}

impl Profile {
    pub fn monogram(&self) -> String {
        match &self.initials {
            Some(initials) => initials.clone(),
            None => self
                .name
                .split_whitespace()
                .filter_map(|word| word.chars().next())
                .flat_map(char::to_uppercase)
                .collect(),
        }
    }
}

/// Section headings and button labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
    pub contact: String,
    pub download_cv: String,
    pub education: String,
    pub projects: String,
    pub view_more: String,
    pub visit_project: String,
    pub work: String,
    pub courses: String,
    pub skills: String,
    pub languages: String,
    pub close: String,
    pub previous: String,
    pub next: String,
    pub fullscreen: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            contact: "Contact".to_string(),
            download_cv: "Download CV".to_string(),
            education: "Education".to_string(),
            projects: "Projects".to_string(),
            view_more: "View more".to_string(),
            visit_project: "Visit project".to_string(),
            work: "Work experience".to_string(),
            courses: "Courses".to_string(),
            skills: "Skills".to_string(),
            languages: "Languages".to_string(),
            close: "Close".to_string(),
            previous: "Previous image".to_string(),
            next: "Next image".to_string(),
            fullscreen: "View fullscreen".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Course {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Contact {
    pub title: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
}

/// Content resolved for a requested locale.
#[derive(Debug, Clone)]
pub struct LoadedContent {
    /// Locale whose file was actually read (differs on fallback).
    pub locale: Locale,
    pub content: SiteContent,
}

pub fn content_path(dir: &Path, locale: Locale) -> PathBuf {
    dir.join(format!("{}.toml", locale.code()))
}

/// Load content for `locale`, falling back to `fallback`'s file.
pub fn load_content(
    dir: &Path,
    locale: Locale,
    fallback: Locale,
) -> Result<LoadedContent, ContentError> {
    let (used, path) = [locale, fallback]
        .into_iter()
        .map(|l| (l, content_path(dir, l)))
        .find(|(_, path)| path.is_file())
        .ok_or_else(|| ContentError::MissingLocale {
            requested: locale,
            fallback,
            dir: dir.to_path_buf(),
        })?;
    let text = fs::read_to_string(&path)?;
    let content = parse_content(&text, used).map_err(|e| match e {
        ContentError::Toml { source, .. } => ContentError::Toml { path, source },
        other => other,
    })?;
    Ok(LoadedContent {
        locale: used,
        content,
    })
}

/// Outcome of checking one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleReport {
    pub locale: Locale,
    /// Locale whose file serves `locale`.
    pub source: Locale,
    pub projects: usize,
    pub images: usize,
}

/// Load and validate the content every locale would be served.
///
/// Stops at the first file that fails to load.
pub fn check_content(dir: &Path, fallback: Locale) -> Result<Vec<LocaleReport>, ContentError> {
    Locale::ALL
        .into_iter()
        .map(|locale| {
            let loaded = load_content(dir, locale, fallback)?;
            Ok(LocaleReport {
                locale,
                source: loaded.locale,
                projects: loaded.content.projects.len(),
                images: loaded.content.projects.iter().map(|p| p.images.len()).sum(),
            })
        })
        .collect()
}

/// Parse, normalize, and validate one content file.
pub fn parse_content(text: &str, locale: Locale) -> Result<SiteContent, ContentError> {
    let mut content: SiteContent = toml::from_str(text).map_err(|source| ContentError::Toml {
        path: PathBuf::from(format!("{}.toml", locale.code())),
        source,
    })?;
    normalize(&mut content);
    validate(&content, locale)?;
    Ok(content)
}

/// Blank links mean "no link"; blank link labels take the locale default.
fn normalize(content: &mut SiteContent) {
    let visit = content.labels.visit_project.clone();
    for project in &mut content.projects {
        let needs_fix = project.link.as_deref().is_some_and(|l| l.trim().is_empty())
            || project.link_text.trim().is_empty();
        if !needs_fix {
            continue;
        }
        let p = Rc::make_mut(project);
        if p.link.as_deref().is_some_and(|l| l.trim().is_empty()) {
            p.link = None;
        }
        if p.link_text.trim().is_empty() {
            p.link_text = visit.clone();
        }
    }
}

fn validate(content: &SiteContent, locale: Locale) -> Result<(), ContentError> {
    let fail = |message: String| ContentError::Validation { locale, message };
    if content.profile.name.trim().is_empty() {
        return Err(fail("profile.name must not be empty".into()));
    }
    let mut seen = HashSet::new();
    for (i, project) in content.projects.iter().enumerate() {
        if project.title.trim().is_empty() {
            return Err(fail(format!("projects[{i}].title must not be empty")));
        }
        if !seen.insert(project.title.as_str()) {
            return Err(fail(format!("duplicate project title '{}'", project.title)));
        }
    }
    Ok(())
}
