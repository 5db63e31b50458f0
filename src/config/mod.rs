// SPDX-License-Identifier: MPL-2.0
//! Application configuration, loaded from and saved to a `settings.toml` file.
//!
//! All fields are optional in the file so partial configs (and configs written
//! by older versions) keep loading. A malformed file never prevents startup:
//! `load` falls back to defaults and reports a warning key the UI can surface.

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedGallery";

/// Default content-store coordinates. These match the organization's hosted
/// project; a different deployment overrides them in `settings.toml`.
pub const DEFAULT_PROJECT_ID: &str = "mb06vmiz";
pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-01-01";
pub const DEFAULT_IMAGE_CDN: &str = "https://cdn.sanity.io";

/// Width requested for grid thumbnails, in pixels.
pub const DEFAULT_THUMB_WIDTH: u32 = 600;
/// Width requested for the full-screen overlay variant, in pixels.
pub const DEFAULT_FULL_WIDTH: u32 = 1200;
/// Compression quality requested from the image transform service.
pub const DEFAULT_QUALITY: u8 = 60;

/// How many events the archive listing fetches.
pub const DEFAULT_ARCHIVE_LIMIT: u32 = 12;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub gallery: GallerySection,
    #[serde(default)]
    pub prefetch: PrefetchSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeneralSection {
    /// Locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub language: Option<String>,
    #[serde(default)]
    pub theme_mode: Option<ThemeMode>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContentSection {
    pub project_id: Option<String>,
    pub dataset: Option<String>,
    pub api_version: Option<String>,
    /// Whether queries go through the CDN-backed endpoint.
    pub use_cdn: Option<bool>,
    pub image_cdn: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GallerySection {
    pub thumb_width: Option<u32>,
    pub full_width: Option<u32>,
    pub quality: Option<u8>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PrefetchSection {
    pub enabled: Option<bool>,
    pub max_bytes: Option<usize>,
    pub max_images: Option<usize>,
}

impl Config {
    pub fn project_id(&self) -> &str {
        self.content.project_id.as_deref().unwrap_or(DEFAULT_PROJECT_ID)
    }

    pub fn dataset(&self) -> &str {
        self.content.dataset.as_deref().unwrap_or(DEFAULT_DATASET)
    }

    pub fn api_version(&self) -> &str {
        self.content
            .api_version
            .as_deref()
            .unwrap_or(DEFAULT_API_VERSION)
    }

    pub fn image_cdn(&self) -> &str {
        self.content.image_cdn.as_deref().unwrap_or(DEFAULT_IMAGE_CDN)
    }

    pub fn use_cdn(&self) -> bool {
        self.content.use_cdn.unwrap_or(true)
    }

    /// Thumbnail width, kept strictly below the full-view width so grid
    /// requests are always the smaller variant.
    pub fn thumb_width(&self) -> u32 {
        let full = self.full_width();
        self.gallery
            .thumb_width
            .unwrap_or(DEFAULT_THUMB_WIDTH)
            .min(full.saturating_sub(1).max(1))
    }

    pub fn full_width(&self) -> u32 {
        self.gallery.full_width.unwrap_or(DEFAULT_FULL_WIDTH).max(2)
    }

    pub fn quality(&self) -> u8 {
        self.gallery.quality.unwrap_or(DEFAULT_QUALITY).clamp(1, 100)
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.general.theme_mode.unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration, honoring an optional directory override from the
/// CLI. Returns the config plus an optional warning i18n key when the file
/// existed but could not be used as-is.
pub fn load(config_dir: Option<&Path>) -> (Config, Option<&'static str>) {
    let path = match config_dir {
        Some(dir) => Some(dir.join(CONFIG_FILE)),
        None => get_default_config_path(),
    };

    if let Some(path) = path {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(_) => (Config::default(), Some("config-load-warning")),
            };
        }
    }
    (Config::default(), None)
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
