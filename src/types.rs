//! Shared content types handed from the content loader to the widgets and
//! the renderer.
//!
//! Records are immutable once loaded. The page shares them with the modal
//! through `Rc`, so opening a project never copies its description.

use serde::{Deserialize, Serialize};

/// Ordered image references shown by one carousel. Order is display order.
pub type ImageSet = Vec<String>;

/// One portfolio project as the content files describe it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectRecord {
    pub title: String,
    /// One-line summary shown on the project card.
    pub description: String,
    /// Long text shown in the modal.
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Outbound link. Absent (or empty in the file) means no link button.
    #[serde(default)]
    pub link: Option<String>,
    /// Label of the link button; the loader fills it from the locale's
    /// default label when a project leaves it empty.
    #[serde(default)]
    pub link_text: String,
    /// Style token rendered in place of the carousel when there are no images.
    #[serde(default = "default_gradient")]
    pub gradient: String,
    /// Card cover image. Falls back to the first carousel image.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: ImageSet,
}

fn default_gradient() -> String {
    "gradient-default".to_string()
}

impl ProjectRecord {
    /// Image shown on the project card, if any.
    pub fn cover(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}
