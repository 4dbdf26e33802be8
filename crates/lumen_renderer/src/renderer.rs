//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by the camera's max depth
//! - Anti-aliasing via multi-sampling
//! - Parallel tile rendering with per-tile random streams

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use crate::error::{RenderError, RenderResult};
use crate::tile::{generate_tiles, render_tile, Tile, TileResult, DEFAULT_TILE_SIZE};
use crate::{Camera, Color, Hittable};
use lumen_math::{unit_vector, Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;

/// Smallest accepted hit distance. Avoids re-hitting the surface a ray
/// just left due to floating-point error.
pub const T_MIN: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// `depth` counts bounces taken so far; once it reaches `max_depth` the
/// path contributes no more light.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    if depth >= max_depth {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth + 1, max_depth, rng)
        }
        None => Color::ZERO,
    }
}

/// Compute sky gradient background: white at the horizon blending to blue
/// straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// Returns the averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, 0, camera.max_depth(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// Options for how an image is scheduled across workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Edge length of the square tiles the image is split into
    pub tile_size: u32,
    /// Base seed for the per-tile random streams. `None` picks one at random.
    pub seed: Option<u64>,
    /// Worker thread count. `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            seed: None,
            threads: None,
        }
    }
}

impl RenderOptions {
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// Rendered image as gamma-corrected 8-bit RGB, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.offset(x, y)]
    }

    /// Flatten to packed RGB bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a finished tile's rows into place.
    fn place_tile(&mut self, result: &TileResult) -> RenderResult<()> {
        let tile = &result.tile;
        if result.pixels.len() != tile.pixel_count() {
            return Err(RenderError::TileSizeMismatch {
                tile: tile.index,
                expected: tile.pixel_count(),
                actual: result.pixels.len(),
            });
        }
        if tile.width == 0 {
            return Ok(());
        }

        for (row, chunk) in result.pixels.chunks(tile.width as usize).enumerate() {
            let start = self.offset(tile.x, tile.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
        Ok(())
    }
}

/// Render the entire scene.
///
/// Tiles are rendered in parallel and assembled in row-major tile order.
/// Any worker failure fails the whole render; no partial image is returned.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    options: &RenderOptions,
) -> RenderResult<ImageBuffer> {
    render_cancellable(camera, world, options, &AtomicBool::new(false))
}

/// Like [`render`], but stops early with [`RenderError::Cancelled`] once
/// `cancel` is set.
pub fn render_cancellable(
    camera: &Camera,
    world: &dyn Hittable,
    options: &RenderOptions,
    cancel: &AtomicBool,
) -> RenderResult<ImageBuffer> {
    let width = camera.image_width();
    let height = camera.image_height();
    let tiles = generate_tiles(width, height, options.tile_size)?;
    let seed = options.seed.unwrap_or_else(rand::random);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} tiles, seed {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth(),
        tiles.len(),
        seed
    );
    let start = Instant::now();

    let run = || -> RenderResult<Vec<TileResult>> {
        tiles
            .par_iter()
            .map(|tile| run_worker(tile, camera, world, seed, cancel))
            .collect()
    };

    let results = match options.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(run),
        None => run(),
    };

    let results = match results {
        Ok(results) => results,
        Err(err) => {
            log::warn!("Render aborted: {}", err);
            return Err(err);
        }
    };

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.place_tile(result)?;
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Render one tile, turning a panic into an error for the whole render.
fn run_worker(
    tile: &Tile,
    camera: &Camera,
    world: &dyn Hittable,
    seed: u64,
    cancel: &AtomicBool,
) -> RenderResult<TileResult> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        render_tile(tile, camera, world, seed, cancel)
    }))
    .unwrap_or_else(|payload| {
        Err(RenderError::WorkerPanicked {
            tile: tile.index,
            message: panic_message(&*payload),
        })
    })?;

    log::debug!(
        "Tile {} done ({}x{} at {},{})",
        tile.index,
        tile.width,
        tile.height,
        tile.x,
        tile.y
    );
    Ok(result)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
