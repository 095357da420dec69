//! Persisted user settings for plexus.
//!
//! Settings live in `config.toml` inside the platform config directory
//! (overridable through `PLEXUS_CONFIG`). A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use log::{debug, info};
use plexus_core::tuning::{DEFAULT_FRAME_RATE, MAX_FRAME_RATE};
use plexus_core::{ColorTheme, Layer, Variant};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PLEXUS_CONFIG";

const CONFIG_FILE: &str = "config.toml";

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which variant of the field to run.
    pub variant: Variant,
    /// Base color of particles and lines.
    pub color_theme: ColorTheme,
    /// Paint order; `None` uses the variant's default.
    pub layer: Option<Layer>,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Whether the help line is shown.
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            color_theme: ColorTheme::default(),
            layer: None,
            frame_rate: DEFAULT_FRAME_RATE,
            show_help: true,
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn path() -> color_eyre::Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "plexus")
            .ok_or_else(|| eyre!("could not determine a config directory"))?;
        Ok(dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).wrap_err("failed to serialize config")?;
        fs::write(path, text)
            .wrap_err_with(|| format!("failed to write config {}", path.display()))?;
        debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Time budget of one frame.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.frame_rate.clamp(1, MAX_FRAME_RATE);
        Duration::from_secs(1) / fps
    }

    /// Paint order, honoring the variant default when none is set.
    pub fn effective_layer(&self) -> Layer {
        self.layer.unwrap_or_else(|| self.variant.default_layer())
    }
}
