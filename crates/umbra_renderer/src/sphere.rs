//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use std::f32::consts::PI;
use std::sync::Arc;
use umbra_math::{Aabb, Interval, Ray, Vec3};

/// A sphere, optionally moving linearly over ray time.
///
/// A negative radius keeps the same surface but flips the outward normal,
/// which models the inner wall of a hollow glass shell.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    /// Displacement from `center` reached at time 1.
    motion: Vec3,
    radius: f32,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a stationary sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        let rvec = Vec3::splat(radius.abs());
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            motion: Vec3::ZERO,
            radius,
            material,
            bbox,
        }
    }

    /// Create a sphere that moves from `center` at time 0 to `target` at time 1.
    pub fn moving(center: Vec3, target: Vec3, radius: f32, material: Arc<Material>) -> Self {
        let rvec = Vec3::splat(radius.abs());
        let box0 = Aabb::from_points(center - rvec, center + rvec);
        let box1 = Aabb::from_points(target - rvec, target + rvec);

        Self {
            center,
            motion: target - center,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    /// Center of the sphere at the given ray time.
    #[inline]
    pub fn center_at(&self, time: f32) -> Vec3 {
        self.center + time * self.motion
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let center = self.center_at(ray.time);
        let oc = center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv((rec.p - center) / self.radius.abs());
        rec.material = Some(self.material.as_ref());

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
