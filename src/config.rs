//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged over it, so a
//! config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! `config.toml` lives in the site directory (`--site`, default `.`):
//!
//! ```text
//! my-blog/
//! ├── config.toml      # Optional, everything has a default
//! └── posts.json       # Optional local export of the sheet
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "Essays"
//! tagline = "Notes on slow living, books, and elsewhere"
//! # subscribe_url = "https://example.com/subscribe"
//!
//! [source]
//! # sheet_id = "1qlf…"        # Google Sheet to read; omit for the sample posts
//! sheet_name = "Posts"
//! # file = "posts.json"       # Local gviz export, relative to the site dir
//! timeout_secs = 10
//!
//! [colors.light]
//! background = "#faf8f5"
//! text = "#1a1a1a"
//! text_muted = "#6b6b6b"
//! border = "#e6e1da"
//! accent = "#8b4513"
//! card = "#ffffff"
//!
//! [colors.dark]
//! background = "#141311"
//! text = "#ecebe8"
//! text_muted = "#9a978f"
//! border = "#2e2b27"
//! accent = "#d4a373"
//! card = "#1d1b18"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Sheet id shipped in templates; treated the same as no sheet at all.
pub const PLACEHOLDER_SHEET_ID: &str = "YOUR_SHEET_ID_HERE";

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
    /// Blog title, tagline, and subscribe link.
    pub site: SiteMeta,
    /// Where posts come from.
    pub source: SourceConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.source.sheet_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source.sheet_name must not be empty".into(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "source.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub tagline: String,
    /// Target of the subscribe form. Without it the prompt shows no form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe_url: Option<String>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Essays".to_string(),
            tagline: "Notes on slow living, books, and elsewhere".to_string(),
            subscribe_url: None,
        }
    }
}

/// Content source settings.
///
/// Resolution order: `file` if set, else `sheet_id` if set (and not the
/// template placeholder), else the built-in sample posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Google Sheet id (the long token in the sheet URL).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
    /// Tab inside the sheet that holds the posts.
    pub sheet_name: String,
    /// Local gviz export, resolved against the site directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Network timeout for the sheet request.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            sheet_name: "Posts".to_string(),
            file: None,
            timeout_secs: 10,
        }
    }
}

impl SourceConfig {
    /// The configured sheet id, unless absent, blank, or the placeholder.
    pub fn effective_sheet_id(&self) -> Option<&str> {
        self.sheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != PLACEHOLDER_SHEET_ID)
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
    /// Post meta, series counts, captions.
    pub text_muted: String,
    pub border: String,
    /// Links, active tag, series badge.
    pub accent: String,
    /// Card backgrounds.
    pub card: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#faf8f5".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#6b6b6b".to_string(),
            border: "#e6e1da".to_string(),
            accent: "#8b4513".to_string(),
            card: "#ffffff".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#141311".to_string(),
            text: "#ecebe8".to_string(),
            text_muted: "#9a978f".to_string(),
            border: "#2e2b27".to_string(),
            accent: "#d4a373".to_string(),
            card: "#1d1b18".to_string(),
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

/// `SiteConfig::default()` as a TOML table, the base every user file is
/// merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Lay `overlay` over `base`. Tables merge per key, recursively; any other
/// overlay value replaces the base value. Base-only keys survive.
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
/// Returns `Ok(None)` if the file does not exist.
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

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sheet-essays configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
title = "Essays"
tagline = "Notes on slow living, books, and elsewhere"
# Where the subscribe form posts to. Without it the prompt has no form.
# subscribe_url = "https://example.com/subscribe"

# ---------------------------------------------------------------------------
# Content source
# ---------------------------------------------------------------------------
# Posts come from `file` if set, otherwise from the Google Sheet `sheet_id`.
# With neither, the built-in sample posts are shown with a notice banner.
# Columns: title, date, read time, excerpt, content, tags (comma-separated),
# series, series description, image URL.
[source]
# sheet_id = "YOUR_SHEET_ID_HERE"
sheet_name = "Posts"
# file = "posts.json"
timeout_secs = 10

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#faf8f5"
text = "#1a1a1a"
text_muted = "#6b6b6b"    # Post meta, series counts
border = "#e6e1da"
accent = "#8b4513"        # Links, active tag, series badge
card = "#ffffff"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#141311"
text = "#ecebe8"
text_muted = "#9a978f"
border = "#2e2b27"
accent = "#d4a373"
card = "#1d1b18"
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
    --color-card: {light_card};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
        --color-card: {dark_card};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_card = colors.light.card,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_card = colors.dark.card,
    )
}
