//! Render settings from an optional JSON file plus command line overrides.
//!
//! ```json
//! {
//!   "camera": { "image_width": 800, "vfov": 20.0, "look_from": [13, 2, 3] },
//!   "render": { "samples_per_pixel": 200, "max_depth": 50, "seed": 7 }
//! }
//! ```
//!
//! Both sections are optional. Without a `camera` section the scene's own
//! camera is used.

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use umbra_renderer::{CameraSettings, RenderConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub camera: Option<CameraSettings>,
    pub render: RenderConfig,
}

impl FileConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Render settings with `--samples`, `--depth` and `--seed` applied.
    pub fn render_config(&self, args: &Args) -> RenderConfig {
        let mut config = self.render.clone();
        if let Some(samples) = args.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(depth) = args.depth {
            config.max_depth = depth;
        }
        if let Some(seed) = args.seed {
            config.seed = seed;
        }
        config
    }

    /// Camera from the file (or the scene's default) with `--width` applied.
    pub fn camera_settings(&self, scene_camera: CameraSettings, args: &Args) -> CameraSettings {
        let mut camera = self.camera.clone().unwrap_or(scene_camera);
        if let Some(width) = args.width {
            camera.image_width = width;
        }
        camera
    }
}
