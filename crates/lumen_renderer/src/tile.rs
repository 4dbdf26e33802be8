//! Tile-based image partitioning.
//!
//! Divides the image into disjoint tiles that are rendered independently
//! and in parallel, each with its own seeded random stream.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ConfigError, ConfigResult, RenderError, RenderResult};
use crate::renderer::render_pixel;
use crate::{color_to_rgb, Camera, Hittable};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of tile's top-left corner
    pub x: u32,
    /// Y coordinate of tile's top-left corner
    pub y: u32,
    /// Width of the tile in pixels
    pub width: u32,
    /// Height of the tile in pixels
    pub height: u32,
    /// Row-major position of this tile in the grid
    pub index: usize,
}

impl Tile {
    /// Create a new tile.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Global pixel coordinates covered by this tile, in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |py| (self.x..self.x + self.width).map(move |px| (px, py)))
    }

    /// Seed of this tile's random stream for a given render seed.
    pub fn seed(&self, render_seed: u64) -> u64 {
        render_seed.wrapping_add(self.index as u64)
    }
}

/// Default tile size in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 64;

/// Generate a row-major grid of tiles covering the image exactly once.
///
/// Tiles on the right and bottom edges are clipped to the image.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> ConfigResult<Vec<Tile>> {
    if tile_size == 0 {
        return Err(ConfigError::ZeroTileSize);
    }

    let mut tiles = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let tw = tile_size.min(width - x);
            let th = tile_size.min(height - y);
            tiles.push(Tile::new(x, y, tw, th, index));
            index += 1;
            x += tile_size;
        }
        y += tile_size;
    }

    Ok(tiles)
}

/// Result of rendering a tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    /// The tile that was rendered
    pub tile: Tile,
    /// Encoded pixels in row-major order within the tile
    pub pixels: Vec<[u8; 3]>,
}

/// Render a single tile into its own pixel buffer.
///
/// The tile owns a private random stream seeded from `render_seed` and its
/// index, so the output does not depend on which thread runs it. `cancel` is
/// polled between pixels.
pub fn render_tile(
    tile: &Tile,
    camera: &Camera,
    world: &dyn Hittable,
    render_seed: u64,
    cancel: &AtomicBool,
) -> RenderResult<TileResult> {
    let mut rng = StdRng::seed_from_u64(tile.seed(render_seed));
    let mut pixels = Vec::with_capacity(tile.pixel_count());

    for (px, py) in tile.pixels() {
        if cancel.load(Ordering::Relaxed) {
            return Err(RenderError::Cancelled);
        }
        let color = render_pixel(camera, world, px, py, &mut rng);
        pixels.push(color_to_rgb(color));
    }

    Ok(TileResult {
        tile: *tile,
        pixels,
    })
}
