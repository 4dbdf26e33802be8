//! Built-in scenes.

use std::sync::Arc;

use clap::ValueEnum;
use lumen_renderer::{
    CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which built-in scene to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// One diffuse sphere resting on a large ground sphere
    Simple,
    /// Diffuse, hollow glass and fuzzed metal spheres side by side
    Materials,
    /// A field of small random spheres around three large ones, with depth of field
    Showcase,
}

/// A world to render plus the camera that frames it.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraSettings,
}

impl SceneKind {
    /// Build the scene. `seed` only affects scenes with random placement.
    pub fn build(self, seed: u64) -> Scene {
        match self {
            SceneKind::Simple => simple(),
            SceneKind::Materials => materials(),
            SceneKind::Showcase => showcase(seed),
        }
    }
}

fn sphere(center: Vec3, radius: f32, material: &Arc<dyn Material>) -> Box<Sphere> {
    Box::new(Sphere::new(center, radius, Arc::clone(material)))
}

fn simple() -> Scene {
    let grey: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));

    let mut world = HittableList::new();
    world.add(sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, &grey));
    world.add(sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, &grey));

    Scene {
        world,
        camera: CameraSettings::default(),
    }
}

fn materials() -> Scene {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    // Air inside glass: the inner surface turns the left sphere into a hollow shell
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    let mut world = HittableList::new();
    world.add(sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, &ground));
    world.add(sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, &center));
    world.add(sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, &glass));
    world.add(sphere(Vec3::new(-1.0, 0.0, -1.0), 0.4, &bubble));
    world.add(sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, &gold));

    let camera = CameraSettings::default()
        .with_quality(100, 50)
        .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(20.0, 10.0, 3.4);

    Scene { world, camera }
}

fn showcase(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    // Ground
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.add(sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, &ground));

    // Small random spheres
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                Arc::new(Metal::new(albedo, rng.gen_range(0.0..0.5)))
            } else {
                Arc::clone(&glass)
            };
            world.add(sphere(center, 0.2, &material));
        }
    }

    // Three main spheres
    let brown: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    world.add(sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, &glass));
    world.add(sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, &brown));
    world.add(sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, &mirror));

    let camera = CameraSettings::default()
        .with_quality(50, 10)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene { world, camera }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::{Camera, Hittable, Interval, Ray};

    #[test]
    fn test_simple_scene() {
        let scene = SceneKind::Simple.build(0);
        assert_eq!(scene.world.len(), 2);

        // Straight ahead hits the small sphere first
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.world.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_materials_scene() {
        let scene = SceneKind::Materials.build(0);
        assert_eq!(scene.world.len(), 5);
        assert!(Camera::new(scene.camera).is_ok());
    }

    #[test]
    fn test_showcase_layout_follows_seed() {
        let a = SceneKind::Showcase.build(3);
        let b = SceneKind::Showcase.build(3);

        assert_eq!(a.world.len(), b.world.len());
        assert!(a.world.len() > 4);
        assert!(Camera::new(a.camera).is_ok());
    }

    #[test]
    fn test_all_scene_cameras_are_valid() {
        for kind in SceneKind::value_variants() {
            let scene = kind.build(1);
            assert!(Camera::new(scene.camera).is_ok(), "{kind:?}");
        }
    }
}
