//! Configuration model: window geometry, visual parameters, and probe targets.
//!
//! The configuration lives in a single JSON document with top-level keys
//! `window_config`, `visual_config`, and `servers`. A missing document is
//! synthesized with defaults and persisted before the first load; a malformed
//! or invalid one is a fatal startup error, reported before any rendering
//! starts.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Window geometry and framing.
///
/// `width` and `height` are virtual pixels: the graph's coordinate space.
/// The overlay pane is sized from them and all sample/guide positions are
/// computed inside this space. The `transparent`, `borderless`, and
/// `always_on_top` flags describe the intended window styling; in the
/// terminal they are advisory (the pane is always borderless, and
/// `transparent` suppresses the background fill).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_true")]
    pub transparent: bool,
    #[serde(default = "default_true")]
    pub borderless: bool,
    #[serde(default = "default_true")]
    pub always_on_top: bool,
    pub background_color: [u8; 3],
    pub padding_left: u32,
    pub padding_right: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 200,
            transparent: true,
            borderless: true,
            always_on_top: true,
            background_color: [0, 0, 0],
            padding_left: 10,
            padding_right: 10,
        }
    }
}

/// Graph timing, scaling, and decoration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualConfig {
    /// Number of samples kept and drawn per target.
    pub max_points: usize,
    /// Frame rate of the render loop.
    pub fps: u32,
    pub font_size: u32,
    /// Offset of the latest-value label from the newest point, in pixels
    /// (screen coordinates: positive y moves the label down).
    pub ping_text_offset: (i32, i32),
    /// Per-frame multiplier applied while the scale glides back down.
    pub scale_decay_rate: f64,
    pub text_color: [u8; 3],
    /// Seconds between probe rounds.
    pub ping_interval: f64,
    #[serde(default = "default_true")]
    pub show_guides: bool,
    #[serde(default = "default_guide_color")]
    pub guide_lines_color: [u8; 3],
    #[serde(default = "default_guide_thickness")]
    pub guide_lines_thickness: u32,
    #[serde(default = "default_guide_length")]
    pub guide_lines_length: u32,
    /// Reference latency levels drawn as horizontal tick marks.
    #[serde(default = "default_guide_levels")]
    pub guide_levels: Vec<u32>,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            max_points: 60,
            fps: 60,
            font_size: 14,
            ping_text_offset: (10, -10),
            scale_decay_rate: 0.95,
            text_color: [255, 255, 255],
            ping_interval: 1.0,
            show_guides: true,
            guide_lines_color: default_guide_color(),
            guide_lines_thickness: default_guide_thickness(),
            guide_lines_length: default_guide_length(),
            guide_levels: default_guide_levels(),
        }
    }
}

/// One probed target with its display styling.
///
/// Immutable after load; `enabled` only gates participation in probing and
/// rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub color: [u8; 3],
    #[serde(default = "default_line_thickness")]
    pub line_thickness: u16,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Complete configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub window_config: WindowConfig,
    pub visual_config: VisualConfig,
    pub servers: Vec<ServerConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_config: WindowConfig::default(),
            visual_config: VisualConfig::default(),
            servers: vec![
                ServerConfig {
                    address: "1.1.1.1".to_string(),
                    color: [255, 255, 0],
                    line_thickness: 2,
                    enabled: true,
                },
                ServerConfig {
                    address: "8.8.4.4".to_string(),
                    color: [0, 255, 255],
                    line_thickness: 2,
                    enabled: true,
                },
            ],
        }
    }
}

impl Config {
    /// Load the configuration from a JSON document.
    ///
    /// If the file does not exist, the default document is written first, so
    /// a second load of the same path is a no-op create. Read, parse, and
    /// validation failures are all fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::write_default_if_missing(path)?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("malformed config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration back to the same document shape.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Write the default document if the path does not exist yet.
    ///
    /// Returns `true` when a file was created.
    pub fn write_default_if_missing<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        Config::default().save(path)?;
        Ok(true)
    }

    /// Check field-level validity beyond what the schema enforces.
    pub fn validate(&self) -> Result<()> {
        let window = &self.window_config;
        if window.width == 0 || window.height == 0 {
            bail!("window dimensions must be positive");
        }
        if window.padding_left + window.padding_right >= window.width {
            bail!("left and right padding leave no horizontal plot span");
        }

        let visual = &self.visual_config;
        if visual.max_points < 2 {
            bail!("max_points must be at least 2");
        }
        if visual.fps == 0 {
            bail!("fps must be positive");
        }
        if !(visual.scale_decay_rate > 0.0 && visual.scale_decay_rate < 1.0) {
            bail!("scale_decay_rate must be strictly between 0 and 1");
        }
        if !(visual.ping_interval >= 0.0) {
            bail!("ping_interval must be non-negative");
        }
        if visual.guide_levels.is_empty() {
            bail!("guide_levels must not be empty");
        }

        if self.servers.is_empty() {
            bail!("at least one server entry is required");
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_line_thickness() -> u16 {
    2
}

fn default_guide_color() -> [u8; 3] {
    [128, 128, 128]
}

fn default_guide_thickness() -> u32 {
    1
}

fn default_guide_length() -> u32 {
    10
}

fn default_guide_levels() -> Vec<u32> {
    vec![50, 100, 150]
}
