//! Free vector helpers used by the geometry and material code.

use crate::Vec3;

/// Components smaller than this are treated as zero by [`near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Normalize a vector.
///
/// A zero-length vector yields `Vec3::ZERO` instead of NaN components.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Returns true if every component is within [`NEAR_ZERO_EPSILON`] of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface using Snell's law.
///
/// `etai_over_etat` is the ratio of the refractive index on the incoming
/// side over the index on the transmitted side.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_unit_vector() {
        let v = unit_vector(Vec3::new(3.0, 0.0, 4.0));
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!(approx_eq(v, Vec3::new(0.6, 0.0, 0.8)));
    }

    #[test]
    fn test_unit_vector_of_zero_is_zero() {
        let v = unit_vector(Vec3::ZERO);
        assert_eq!(v, Vec3::ZERO);
        assert!(!v.is_nan());
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(near_zero(Vec3::new(-1e-9, 1e-9, 0.0)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-3, 0.0)));
        assert!(!near_zero(Vec3::X));
    }

    #[test]
    fn test_reflect() {
        // Ray going down-right bounces up-right off a floor
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));

        // Head-on reflection reverses the direction
        assert_eq!(reflect(Vec3::NEG_Z, Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_refract_matched_index_passes_straight() {
        let uv = unit_vector(Vec3::new(1.0, -1.0, 0.0));
        let refracted = refract(uv, Vec3::Y, 1.0);
        assert!(approx_eq(refracted, uv));
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        // Entering glass from air bends the ray toward the normal
        let uv = unit_vector(Vec3::new(1.0, -1.0, 0.0));
        let refracted = refract(uv, Vec3::Y, 1.0 / 1.5);

        assert!((refracted.length() - 1.0).abs() < 1e-5);
        assert!(refracted.x < uv.x);
        assert!(refracted.y < 0.0);

        // Snell: sin(theta_t) = ratio * sin(theta_i)
        let sin_i = uv.x;
        assert!((refracted.x - sin_i / 1.5).abs() < 1e-5);
    }
}
