//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative ray bouncing with a configurable depth limit
//! - Anti-aliasing via multi-sampling
//! - Gamma correction
//! - Bucketed parallel rendering with per-pixel random streams

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{pixel_rng, Camera, Color, HitRecord, Hittable};
use log::{debug, info};
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use umbra_math::{Interval, Ray};

/// Minimum hit distance; skips self-intersection at a ray's origin.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed shared by all per-pixel random streams
    pub seed: u64,
    /// Edge length of the square buckets handed to workers
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Follows the ray through at most `depth` bounces, multiplying the
/// attenuation of each scattering event into a running product. A miss
/// returns the product times the sky; absorption or an exhausted bounce
/// budget returns black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let mut rec = HitRecord::default();
        if !world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY), &mut rec) {
            return throughput * sky_gradient(&ray);
        }

        let Some(material) = rec.material else {
            return Color::ZERO;
        };

        match material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Vertical white-to-blue sky gradient.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Trace one jittered camera ray through pixel (x, y).
pub fn sample_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let ray = camera.get_ray(x, y, rng);
    ray_color(&ray, world, max_depth, rng)
}

/// Render a single pixel with multi-sampling.
///
/// Returns the linear average of `samples_per_pixel` samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        pixel_color += sample_pixel(camera, world, x, y, config.max_depth, rng);
    }

    pixel_color / samples as f32
}

/// Render pixel (x, y) with its own random stream.
pub(crate) fn render_pixel_seeded(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let index = y as u64 * camera.image_width() as u64 + x as u64;
    let mut rng = pixel_rng(config.seed, index);
    render_pixel(camera, world, x, y, config, &mut rng)
}

/// Rendered image in linear color, row-major from the top-left pixel.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Gamma-corrected 8-bit RGB triplets, row-major.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|c| color_to_rgb(*c)).collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are rendered in parallel on the rayon pool and written into the
/// buffer by pixel position once all workers have joined, so the output is
/// row-major and independent of completion order.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));
    let total = buckets.len();

    info!(
        "Rendering {}x{} @ {} spp, depth {}, {} buckets on {} threads",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        total,
        rayon::current_num_threads()
    );
    let start = Instant::now();
    let finished = AtomicUsize::new(0);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, world, config);
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("Bucket {}/{} done ({}, {})", done, total, bucket.x, bucket.y);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    info!("Rendered in {:.2?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BvhNode, CameraSettings, HittableList, Material, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use umbra_math::Vec3;

    fn single_sphere_world() -> BvhNode {
        let mut rng = StdRng::seed_from_u64(0);
        let mut list = HittableList::new();
        list.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5))),
        ));
        list.into_bvh(&mut rng)
    }

    fn small_camera(width: u32) -> Camera {
        CameraSettings::default()
            .with_resolution(width, 1.0)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .build()
    }

    #[test]
    fn test_sky_gradient() {
        let up_color = sky_gradient(&Ray::new_simple(Vec3::ZERO, Vec3::Y));
        let down_color = sky_gradient(&Ray::new_simple(Vec3::ZERO, -Vec3::Y));

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down_color - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(1.0), 1.0);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
        assert_eq!(linear_to_gamma(-0.3), 0.0);
    }

    #[test]
    fn test_linear_to_gamma_monotonic() {
        let mut previous = linear_to_gamma(0.0);
        for i in 1..=1000 {
            let current = linear_to_gamma(i as f32 / 1000.0);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.25, -1.0, 0.0)), [128, 0, 0]);
    }

    #[test]
    fn test_ray_color_depth_zero_is_black() {
        let world = single_sphere_world();
        let mut rng = StdRng::seed_from_u64(1);

        for direction in [Vec3::Y, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.3, -0.2, -1.0)] {
            let ray = Ray::new_simple(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_ray_color_miss_is_sky() {
        let world = single_sphere_world();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));

        assert_eq!(ray_color(&ray, &world, 1, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_ray_color_single_bounce_hit_is_black() {
        // With one bounce the scattered ray never gets to see the sky
        let world = single_sphere_world();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_ray_color_attenuates() {
        let world = single_sphere_world();
        let mut rng = StdRng::seed_from_u64(2);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        for _ in 0..100 {
            let color = ray_color(&ray, &world, 50, &mut rng);
            for c in color.to_array() {
                assert!((0.0..=0.5 + 1e-6).contains(&c), "{color:?}");
            }
        }
    }

    #[test]
    fn test_single_sphere_scenario() {
        let world = single_sphere_world();
        let camera = small_camera(11);
        let config = RenderConfig {
            samples_per_pixel: 1,
            max_depth: 1,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);

        // Center pixel ray reports a hit
        let center_ray = camera.get_ray(5, 5, &mut rng);
        let mut rec = HitRecord::default();
        let interval = Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY);
        assert!(world.hit(&center_ray, interval, &mut rec));

        // Off-axis corner pixel sees the sky gradient
        let corner = render_pixel(&camera, &world, 0, 0, &config, &mut rng);
        let corner_direction = camera.pixel_center(0, 0) - camera.center();
        let expected = sky_gradient(&Ray::new_simple(Vec3::ZERO, corner_direction));
        assert!((corner - expected).length() < 0.05, "{corner:?} vs {expected:?}");
        assert_ne!(corner, Color::ZERO);
    }

    #[test]
    fn test_render_pixel_is_mean_of_samples() {
        let world = single_sphere_world();
        let camera = small_camera(16);
        let config = RenderConfig {
            samples_per_pixel: 8,
            max_depth: 10,
            ..RenderConfig::default()
        };

        for (x, y) in [(8, 8), (2, 3), (15, 0)] {
            let mut rng = pixel_rng(7, 42);
            let averaged = render_pixel(&camera, &world, x, y, &config, &mut rng);

            let mut rng = pixel_rng(7, 42);
            let mut sum = Color::ZERO;
            for _ in 0..config.samples_per_pixel {
                sum += sample_pixel(&camera, &world, x, y, config.max_depth, &mut rng);
            }
            let mean = sum / config.samples_per_pixel as f32;

            assert!((averaged - mean).length() < 1e-5);
        }
    }

    #[test]
    fn test_render_is_deterministic_across_bucket_sizes() {
        let world = single_sphere_world();
        let camera = small_camera(24);
        let base = RenderConfig {
            samples_per_pixel: 2,
            max_depth: 4,
            seed: 11,
            bucket_size: 64,
        };

        let a = render(&camera, &world, &base);
        let b = render(&camera, &world, &RenderConfig { bucket_size: 5, ..base.clone() });

        assert_eq!(a.width, 24);
        assert_eq!(a.height, 24);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_render_is_row_major() {
        let world = single_sphere_world();
        let camera = small_camera(12);
        let config = RenderConfig {
            samples_per_pixel: 1,
            max_depth: 3,
            seed: 5,
            bucket_size: 4,
        };

        let image = render(&camera, &world, &config);
        for (x, y) in [(0, 0), (11, 0), (0, 11), (6, 6), (3, 9)] {
            let expected = render_pixel_seeded(&camera, &world, x, y, &config);
            assert_eq!(image.get(x, y), expected);
            assert_eq!(image.pixels[(y * 12 + x) as usize], expected);
        }
    }

    #[test]
    fn test_zero_samples_clamped() {
        let world = single_sphere_world();
        let camera = small_camera(4);
        let config = RenderConfig {
            samples_per_pixel: 0,
            max_depth: 2,
            seed: 0,
            bucket_size: 0,
        };

        let image = render(&camera, &world, &config);
        assert_eq!(image.pixels.len(), 16);
        assert!(image.pixels.iter().all(|c| c.is_finite()));
    }
}
