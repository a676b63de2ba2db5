//! Umbra - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres and planes with diffuse, metallic
//! and glass materials. Scenes are assembled in a [`HittableList`], turned
//! into a [`BvhNode`] and rendered bucket by bucket on the rayon pool.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod output;
mod plane;
mod renderer;
mod sampling;
mod sphere;
mod texture;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::{Camera, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList, Primitive};
pub use material::{reflect, reflectance, refract, Color, Material, ScatterResult};
pub use output::{save_image, save_png, save_ppm, write_ppm, OutputError, OutputResult};
pub use plane::Plane;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, sample_pixel, sky_gradient,
    ImageBuffer, RenderConfig,
};
pub use sampling::{
    gen_f32, gen_f32_range, pixel_rng, random_color, random_in_unit_disk, random_unit_vector,
    sample_square,
};
pub use sphere::Sphere;
pub use texture::Texture;

/// Re-export Vec3 and common math types from umbra_math
pub use umbra_math::{Aabb, Interval, Ray, Vec3};
