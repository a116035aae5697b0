// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "clock-viewer")]
#[command(about = "Real-time 3D clock viewer", long_about = None)]
pub struct Cli {
    /// Path to a JSON viewer configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Clock body model (overrides the config file)
    #[arg(long)]
    pub body: Option<PathBuf>,

    /// Hour hand model
    #[arg(long)]
    pub hour_hand: Option<PathBuf>,

    /// Minute hand model
    #[arg(long)]
    pub minute_hand: Option<PathBuf>,

    /// Optional glass cover model, drawn with alpha blending
    #[arg(long)]
    pub cover: Option<PathBuf>,

    /// Cap the frame rate at this many frames per second
    #[arg(long)]
    pub target_fps: Option<f32>,

    /// Camera movement speed in units per second
    #[arg(long)]
    pub speed: Option<f32>,

    /// Mouse look sensitivity in degrees per pixel
    #[arg(long)]
    pub sensitivity: Option<f32>,
}
