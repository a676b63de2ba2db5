//! Infinite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use std::sync::Arc;
use umbra_math::{Aabb, Interval, Ray, Vec3};

/// Rays with `|normal · direction|` below this are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-8;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    /// In-plane basis used for surface coordinates.
    u_axis: Vec3,
    v_axis: Vec3,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Plane {
    /// Create a plane. `normal` is normalized here; it also defines the
    /// front face.
    pub fn new(point: Vec3, normal: Vec3, material: Arc<Material>) -> Self {
        let normal = normal.normalize();
        let helper = if normal.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let u_axis = normal.cross(helper).normalize();
        let v_axis = normal.cross(u_axis);

        Self {
            point,
            normal,
            u_axis,
            v_axis,
            material,
            bbox: Self::compute_bbox(point, normal),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Flat on the normal's axis when the plane is axis aligned, unbounded
    /// otherwise.
    fn compute_bbox(point: Vec3, normal: Vec3) -> Aabb {
        for axis in 0..3 {
            if (normal[axis].abs() - 1.0).abs() < 1e-6 {
                let mut intervals = [Interval::UNIVERSE; 3];
                intervals[axis] = Interval::new(point[axis], point[axis]);
                return Aabb::new(intervals[0], intervals[1], intervals[2]);
            }
        }
        Aabb::UNIVERSE
    }
}

impl Hittable for Plane {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let root = (self.point - ray.origin).dot(self.normal) / denom;
        if !ray_t.surrounds(root) {
            return false;
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        rec.set_face_normal(ray, self.normal);
        let local = rec.p - self.point;
        rec.u = local.dot(self.u_axis);
        rec.v = local.dot(self.v_axis);
        rec.material = Some(self.material.as_ref());

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Plane {
        Plane::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Arc::new(Material::lambertian(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_plane_hit_from_above() {
        let plane = ground();
        let ray = Ray::new_simple(Vec3::new(1.0, 3.0, 2.0), Vec3::new(0.0, -2.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(plane.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(1.0, -1.0, 2.0)).length() < 1e-5);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Y);
        assert!((rec.normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let plane = ground();
        let ray = Ray::new_simple(Vec3::new(0.0, -4.0, 0.0), Vec3::new(0.3, 1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(plane.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Y);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = ground();
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0));
        let mut rec = HitRecord::default();

        assert!(!plane.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let plane = ground();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(!plane.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_plane_bbox() {
        let aligned = ground().bounding_box();
        assert!(aligned.y.contains(-1.0));
        assert!(aligned.y.size() < 0.001);
        assert_eq!(aligned.x, Interval::UNIVERSE);

        let tilted = Plane::new(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 0.0),
            Arc::new(Material::dielectric(1.5)),
        );
        assert_eq!(tilted.bounding_box(), Aabb::UNIVERSE);
        assert!((tilted.normal().length() - 1.0).abs() < 1e-6);
    }
}
