use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Viewer configuration: asset paths plus tuning constants.
///
/// Loadable from a JSON file; unspecified fields fall back to the
/// defaults, and CLI flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub body_model: PathBuf,
    pub hour_hand_model: PathBuf,
    pub minute_hand_model: PathBuf,
    pub cover_model: Option<PathBuf>,
    pub window_width: u32,
    pub window_height: u32,
    pub clear_color: [f32; 4],
    pub camera_position: [f32; 3],
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub target_fps: Option<f32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            body_model: PathBuf::from("assets/clock_body.glb"),
            hour_hand_model: PathBuf::from("assets/hour_hand.glb"),
            minute_hand_model: PathBuf::from("assets/minute_hand.glb"),
            cover_model: None,
            window_width: 640,
            window_height: 480,
            clear_color: [0.06301, 0.024157, 0.283149, 1.0],
            camera_position: [0.0, 0.0, 0.25],
            movement_speed: crate::camera::DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: crate::camera::DEFAULT_MOUSE_SENSITIVITY,
            target_fps: None,
        }
    }
}

impl ViewerConfig {
    /// Read a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Resolve the effective configuration: optional file, then CLI
    /// overrides on top.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(path) = &cli.body {
            config.body_model = path.clone();
        }
        if let Some(path) = &cli.hour_hand {
            config.hour_hand_model = path.clone();
        }
        if let Some(path) = &cli.minute_hand {
            config.minute_hand_model = path.clone();
        }
        if let Some(path) = &cli.cover {
            config.cover_model = Some(path.clone());
        }
        if let Some(fps) = cli.target_fps {
            config.target_fps = Some(fps);
        }
        if let Some(speed) = cli.speed {
            config.movement_speed = speed;
        }
        if let Some(sensitivity) = cli.sensitivity {
            config.mouse_sensitivity = sensitivity;
        }

        Ok(config)
    }
}
