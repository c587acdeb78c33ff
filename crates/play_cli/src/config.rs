//! play.toml handling
//!
//! Every field is optional. Command-line flags override whatever the file
//! sets, and built-in defaults fill the rest.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::sketches::SketchSelector;

/// Name of the file picked up from the working directory
pub const CONFIG_FILE: &str = "play.toml";

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PlayConfig {
    #[serde(default)]
    pub sketch: SketchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub animate: AnimateConfig,
}

/// Which sketch to run and how to seed it
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SketchConfig {
    /// Catalog name or index
    #[serde(default)]
    pub name: Option<SketchSelector>,
    /// Fixed seed; a fresh one is picked per run when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Output image size
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Width over height
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
}

fn default_width() -> u32 {
    800
}

fn default_aspect_ratio() -> f64 {
    1.0
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

/// Frame sequence settings for `play animate`
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct AnimateConfig {
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_frames() -> u32 {
    60
}

fn default_fps() -> u32 {
    30
}

impl Default for AnimateConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            fps: default_fps(),
        }
    }
}

impl PlayConfig {
    /// Load an explicit config file, or `play.toml` from the working
    /// directory when it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = PlayConfig::from_toml("").unwrap();
        assert_eq!(config, PlayConfig::default());
        assert_eq!(config.output.width, 800);
        assert_eq!(config.output.aspect_ratio, 1.0);
        assert_eq!(config.animate.frames, 60);
        assert_eq!(config.animate.fps, 30);
        assert_eq!(config.sketch.name, None);
    }

    #[test]
    fn test_full_file() {
        let config = PlayConfig::from_toml(
            r#"
            [sketch]
            name = "Star"
            seed = 42

            [output]
            width = 400
            aspect_ratio = 1.5

            [animate]
            frames = 12
            fps = 24
            "#,
        )
        .unwrap();

        assert_eq!(config.sketch.name, Some(SketchSelector::Name("Star".into())));
        assert_eq!(config.sketch.seed, Some(42));
        assert_eq!(config.output.width, 400);
        assert_eq!(config.output.aspect_ratio, 1.5);
        assert_eq!(config.animate.frames, 12);
        assert_eq!(config.animate.fps, 24);
    }

    #[test]
    fn test_partial_sections_and_index() {
        let config = PlayConfig::from_toml(
            r#"
            [sketch]
            name = 3

            [output]
            width = 640
            "#,
        )
        .unwrap();

        assert_eq!(config.sketch.name, Some(SketchSelector::Index(3)));
        assert_eq!(config.output.width, 640);
        assert_eq!(config.output.aspect_ratio, 1.0);
        assert_eq!(config.animate, AnimateConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        assert!(PlayConfig::from_toml("[output]\nwidth = \"wide\"").is_err());
        assert!(PlayConfig::load(Some(Path::new("/nonexistent/play.toml"))).is_err());
    }
}
