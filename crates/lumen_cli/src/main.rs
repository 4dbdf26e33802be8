//! Lumen - render a built-in scene with the CPU path tracer.
//!
//! Run with: cargo run --release -- --scene showcase --output showcase.png

mod output;
mod scenes;
mod settings;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render, Camera, RenderOptions, DEFAULT_TILE_SIZE};

use scenes::SceneKind;

/// Layout seed for scenes with random placement when `--seed` is not given.
const DEFAULT_SCENE_SEED: u64 = 0;

#[derive(Parser, Debug)]
#[command(name = "lumen", version, about = "Render a scene with the Lumen path tracer")]
struct Args {
    /// Built-in scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Simple)]
    scene: SceneKind,

    /// JSON file overriding the scene's camera settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    max_depth: Option<u32>,

    /// Tile edge length in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,

    /// Seed for reproducible renders
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Output file (.ppm or .png). Writes PPM to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let scene = args.scene.build(args.seed.unwrap_or(DEFAULT_SCENE_SEED));
    log::info!("Built {:?} scene with {} objects", args.scene, scene.world.len());

    let mut camera_settings = match &args.config {
        Some(path) => settings::load_camera_settings(path, &scene.camera)?,
        None => scene.camera,
    };
    if let Some(width) = args.width {
        camera_settings.image_width = width;
    }
    if let Some(samples) = args.samples {
        camera_settings.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        camera_settings.max_depth = max_depth;
    }

    let camera = Camera::new(camera_settings).context("Invalid camera settings")?;
    log::debug!("Camera settings: {:?}", camera.settings());

    let mut options = RenderOptions::default().with_tile_size(args.tile_size);
    options.seed = args.seed;
    options.threads = args.threads;

    let image = render(&camera, &scene.world, &options).context("Render failed")?;

    match &args.output {
        Some(path) => {
            output::save_image(&image, path)?;
            log::info!("Saved to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            output::write_ppm(&image, &mut writer).context("Failed to write image to stdout")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.scene, SceneKind::Simple);
        assert_eq!(args.tile_size, DEFAULT_TILE_SIZE);
        assert!(args.output.is_none());
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "lumen", "--scene", "showcase", "--width", "320", "--samples", "8", "--seed", "7",
            "--threads", "2", "-o", "out.png",
        ])
        .unwrap();

        assert_eq!(args.scene, SceneKind::Showcase);
        assert_eq!(args.width, Some(320));
        assert_eq!(args.samples, Some(8));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn test_rejects_unknown_scene() {
        assert!(Args::try_parse_from(["lumen", "--scene", "cornell"]).is_err());
    }
}
