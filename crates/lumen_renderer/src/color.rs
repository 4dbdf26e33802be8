//! Linear color and 8-bit pixel encoding.

use lumen_math::{Interval, Vec3};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Channel values are clamped to this range before scaling to bytes.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0).
///
/// Non-positive and NaN inputs map to 0.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

#[inline]
fn encode_channel(linear: f32) -> u8 {
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        encode_channel(color.x),
        encode_channel(color.y),
        encode_channel(color.z),
    ]
}
