//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to the locale files; every key is optional and
//! overrides the stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! default_locale = "pt"       # Locale used when none is requested or a file is missing
//!
//! [carousel]
//! transition_ms = 220         # Slide animation length
//! slide_offset_px = 60        # Horizontal distance of the slide animation
//!
//! [modal]
//! transition_ms = 300         # Panel entry/exit animation length
//!
//! [colors.light]
//! background = "#f8fafc"
//! text = "#0f172a"
//! text_muted = "#475569"
//! border = "#e2e8f0"
//! accent = "#7c3aed"
//!
//! [colors.dark]
//! background = "#020617"
//! text = "#f8fafc"
//! text_muted = "#94a3b8"
//! border = "#1e293b"
//! accent = "#a78bfa"
//! ```
//!
//! Animation timings are cosmetic. They end up as CSS custom properties and
//! never gate state changes.
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Upper bound for any configured animation.
const MAX_TRANSITION_MS: u32 = 5_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Locale used when none is requested, and fallback for missing files.
    pub default_locale: Locale,
    pub carousel: CarouselConfig,
    pub modal: ModalConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.transition_ms > MAX_TRANSITION_MS {
            return Err(ConfigError::Validation(format!(
                "carousel.transition_ms must be at most {MAX_TRANSITION_MS}"
            )));
        }
        if self.modal.transition_ms > MAX_TRANSITION_MS {
            return Err(ConfigError::Validation(format!(
                "modal.transition_ms must be at most {MAX_TRANSITION_MS}"
            )));
        }
        if self.carousel.slide_offset_px == 0 {
            return Err(ConfigError::Validation(
                "carousel.slide_offset_px must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub transition_ms: u32,
    pub slide_offset_px: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_ms: 220,
            slide_offset_px: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalConfig {
    pub transition_ms: u32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self { transition_ms: 300 }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: periods, institutions, card descriptions.
    pub text_muted: String,
    pub border: String,
    /// Active dot, selected thumbnail, current locale.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#475569".to_string(),
            border: "#e2e8f0".to_string(),
            accent: "#7c3aed".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#020617".to_string(),
            text: "#f8fafc".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#1e293b".to_string(),
            accent: "#a78bfa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if there is no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at content/config.toml, next to the locale files.
# Unknown keys will cause an error.

# Locale used when none is requested, and fallback when a locale has no
# content file of its own. One of: pt, en, es.
default_locale = "pt"

# ---------------------------------------------------------------------------
# Image carousel
# ---------------------------------------------------------------------------
[carousel]
# Slide animation length in milliseconds (0-5000). Cosmetic only.
transition_ms = 220

# Horizontal distance the entering image slides in from, in pixels.
slide_offset_px = 60

# ---------------------------------------------------------------------------
# Project modal
# ---------------------------------------------------------------------------
[modal]
# Panel entry/exit animation length in milliseconds (0-5000).
transition_ms = 300

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
text = "#0f172a"
text_muted = "#475569"    # Periods, institutions, card descriptions
border = "#e2e8f0"
accent = "#7c3aed"        # Active dot, selected thumbnail, current locale

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#020617"
text = "#f8fafc"
text_muted = "#94a3b8"
border = "#1e293b"
accent = "#a78bfa"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}

/// Generate CSS custom properties for the carousel and modal animations.
pub fn generate_motion_css(config: &SiteConfig) -> String {
    format!(
        r#":root {{
    --slide-duration: {slide}ms;
    --slide-offset: {offset}px;
    --modal-duration: {modal}ms;
}}"#,
        slide = config.carousel.transition_ms,
        offset = config.carousel.slide_offset_px,
        modal = config.modal.transition_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.default_locale, Locale::Pt);
        assert_eq!(config.carousel.transition_ms, 220);
        assert_eq!(config.carousel.slide_offset_px, 60);
        assert_eq!(config.modal.transition_ms, 300);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
default_locale = "en"

[carousel]
transition_ms = 150
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.carousel.transition_ms, 150);
        assert_eq!(config.carousel.slide_offset_px, 60);
        assert_eq!(config.colors.light.accent, "#7c3aed");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.colors.dark.background, "#020617");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[colors.light]
accent = "#ff0000"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.colors.light.accent, "#ff0000");
        // Unspecified values should be defaults
        assert_eq!(config.colors.light.background, "#f8fafc");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_locale_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), r#"default_locale = "fr""#).unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("autoplay = true");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[carousel]\nloop = false\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_transition_too_long() {
        let mut config = SiteConfig::default();
        config.carousel.transition_ms = MAX_TRANSITION_MS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = SiteConfig::default();
        config.modal.transition_ms = MAX_TRANSITION_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_zero_offset() {
        let mut config = SiteConfig::default();
        config.carousel.slide_offset_px = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value =
            toml::from_str("[carousel]\ntransition_ms = 1\nslide_offset_px = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[carousel]\nslide_offset_px = 9\n").unwrap();
        let merged = merge_toml(base, overlay);
        let carousel = merged.get("carousel").unwrap();
        assert_eq!(carousel.get("transition_ms").unwrap().as_integer(), Some(1));
        assert_eq!(carousel.get("slide_offset_px").unwrap().as_integer(), Some(9));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base = toml::Value::String("pt".into());
        let overlay = toml::Value::String("es".into());
        assert_eq!(merge_toml(base, overlay).as_str(), Some("es"));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.default_locale, defaults.default_locale);
        assert_eq!(config.carousel.transition_ms, defaults.carousel.transition_ms);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
    }

    #[test]
    fn color_css_includes_dark_mode_media_query() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("--color-accent: #7c3aed"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn motion_css_uses_config() {
        let css = generate_motion_css(&SiteConfig::default());
        assert!(css.contains("--slide-duration: 220ms"));
        assert!(css.contains("--slide-offset: 60px"));
        assert!(css.contains("--modal-duration: 300ms"));
    }
}
