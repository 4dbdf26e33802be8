//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for implicit surfaces.
//!
//! Rays are generated by a thin-lens [`Camera`], intersected against a
//! [`HittableList`] of primitives, and scattered by [`Material`]s until they
//! escape to the sky or hit the bounce limit. Images are rendered in
//! independent tiles on a rayon pool, each with its own seeded random
//! stream, so a fixed seed reproduces the same bytes on any thread count.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lumen_renderer::*;
//!
//! let mut world = HittableList::new();
//! let grey: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
//! world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey)));
//!
//! let camera = Camera::new(CameraSettings::default())?;
//! let image = render(&camera, &world, &RenderOptions::default().with_seed(7))?;
//! ```

mod camera;
mod color;
mod error;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod sphere;
mod tile;

pub use camera::{Camera, CameraSettings};
pub use color::{color_to_rgb, linear_to_gamma, Color};
pub use error::{ConfigError, ConfigResult, RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{reflectance, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    ray_color, render, render_cancellable, render_pixel, sky_gradient, ImageBuffer,
    RenderOptions, T_MIN,
};
pub use sampling::{
    gen_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector, sample_square,
};
pub use sphere::Sphere;
pub use tile::{generate_tiles, render_tile, Tile, TileResult, DEFAULT_TILE_SIZE};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
