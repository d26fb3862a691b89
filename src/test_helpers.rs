//! Shared test utilities for the folio test suite.
//!
//! Builds in-memory records and pages so widget tests do not touch the
//! filesystem, plus a fixture copy for loader and renderer tests.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (doc, mut page) = page_with_projects(&[3, 0]);
//! page.click(Target::ProjectCard(0));
//! assert!(doc.is_scroll_locked());
//! ```

use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

use crate::content::{Contact, Labels, Profile, SiteContent};
use crate::host::Document;
use crate::locale::Locale;
use crate::page::Page;
use crate::types::ProjectRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// In-memory records
// =========================================================================

/// A project with `images` generated image references and no link.
pub fn project(title: &str, images: usize) -> Rc<ProjectRecord> {
    Rc::new(ProjectRecord {
        title: title.to_string(),
        description: format!("{title} summary"),
        full_description: format!("{title} in detail"),
        technologies: vec!["Rust".to_string(), "HTML".to_string()],
        link: None,
        link_text: "Visit project".to_string(),
        gradient: "gradient-blue".to_string(),
        thumbnail: None,
        images: (0..images)
            .map(|i| format!("/{}-{i}.png", title.to_lowercase().replace(' ', "-")))
            .collect(),
    })
}

/// Minimal content whose projects have the given image counts.
pub fn content_with_projects(image_counts: &[usize]) -> SiteContent {
    SiteContent {
        profile: Profile {
            name: "Julia Kfouri".to_string(),
            initials: None,
            role: "Developer".to_string(),
            subtitle: None,
            description: "Builds *things*.".to_string(),
            github: Some("https://github.com/example".to_string()),
            linkedin: None,
            cv: Some("/cv.docx".to_string()),
        },
        labels: Labels::default(),
        education: vec![],
        projects: image_counts
            .iter()
            .enumerate()
            .map(|(i, &n)| project(&format!("Project {i}"), n))
            .collect(),
        work: vec![],
        courses: vec![],
        skills: vec![],
        languages: None,
        contact: Contact::default(),
        footer: None,
    }
}

/// A fresh document and a page over [`content_with_projects`].
pub fn page_with_projects(image_counts: &[usize]) -> (Document, Page) {
    let doc = Document::new();
    let page = Page::new(&doc, content_with_projects(image_counts), Locale::Pt);
    (doc, page)
}
