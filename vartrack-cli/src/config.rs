//! Configuration handling for the vartrack CLI
//!
//! Supports loading configuration from vartrack.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vartrack_render::TrackStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub style: TrackStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Default width in pixels
    #[serde(default = "default_width")]
    pub width: f64,

    /// Height of the variant marker track
    #[serde(default = "default_variant_track_height")]
    pub variant_track_height: f64,

    /// Height of the allele-frequency track
    #[serde(default = "default_alt_track_height")]
    pub alt_track_height: f64,

    /// Height of the reference sequence track
    #[serde(default = "default_reference_track_height")]
    pub reference_track_height: f64,
}

// Default value functions
fn default_width() -> f64 { 1000.0 }
fn default_variant_track_height() -> f64 { 120.0 }
fn default_alt_track_height() -> f64 { 200.0 }
fn default_reference_track_height() -> f64 { 20.0 }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            variant_track_height: default_variant_track_height(),
            alt_track_height: default_alt_track_height(),
            reference_track_height: default_reference_track_height(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("vartrack.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: vartrack.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.width, 1000.0);
        assert_eq!(config.style.max_label_level, 10);
        assert_eq!(config.style.column_height, 190.0);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.render.width = 640.0;
        config.style.indel_color = "#444444".to_string();
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded.render.width, 640.0);
        assert_eq!(loaded.style, config.style);

        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(
            temp_file.path(),
            "[render]\nwidth = 800.0\n\n[style]\nmax_label_level = 6\n\n[style.base_colors]\na = \"#00ff00\"\n",
        )?;

        let config = Config::load(Some(temp_file.path()))?;
        assert_eq!(config.render.width, 800.0);
        assert_eq!(config.render.alt_track_height, 200.0);
        assert_eq!(config.style.max_label_level, 6);
        assert_eq!(config.style.label_gap, 2.0);
        assert_eq!(config.style.base_colors.a, "#00ff00");
        assert_eq!(config.style.base_colors.c, "#0600f9");

        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[render\nwidth = ")?;
        let err = Config::load_from_file(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration file"));
        Ok(())
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[render]"));
        assert!(example.contains("[style]"));
        assert!(example.contains("[style.base_colors]"));
        Ok(())
    }
}
