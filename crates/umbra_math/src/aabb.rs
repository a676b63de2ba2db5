use crate::{Interval, Ray, Vec3};

/// Minimum thickness of a box axis built from geometry.
const MIN_AXIS_SIZE: f32 = 0.0001;

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    ///
    /// Axes thinner than `MIN_AXIS_SIZE` are padded so a ray crossing a flat
    /// box still sees a non-empty slab.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// Create the smallest AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns true if the point lies inside the box (boundaries included).
    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method. A zero direction component yields signed infinities for
    /// the slab parameters, which the min/max narrowing handles without a
    /// special case.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];
            let origin = r.origin[axis];

            let t0 = (slab.min - origin) * adinv;
            let t1 = (slab.max - origin) * adinv;

            ray_t.min = ray_t.min.max(t0.min(t1));
            ray_t.max = ray_t.max.min(t0.max(t1));
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    fn pad_to_minimums(&mut self) {
        if self.x.size() < MIN_AXIS_SIZE {
            self.x = self.x.expand(MIN_AXIS_SIZE);
        }
        if self.y.size() < MIN_AXIS_SIZE {
            self.y = self.y.expand(MIN_AXIS_SIZE);
        }
        if self.z.size() < MIN_AXIS_SIZE {
            self.z = self.z.expand(MIN_AXIS_SIZE);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.x, Interval::new(0.0, 10.0));
        assert_eq!(aabb.y, Interval::new(0.0, 10.0));
        assert_eq!(aabb.z, Interval::new(0.0, 10.0));
    }

    #[test]
    fn test_aabb_flat_axis_is_padded() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 2.0, 1.0));

        assert!(aabb.y.size() > 0.0);
        assert!(aabb.y.contains(2.0));

        // A ray crossing the flat box still registers
        let ray = Ray::new_simple(Vec3::new(0.5, 5.0, 0.5), Vec3::new(0.0, -1.0, 0.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_surrounding_contains_both_and_is_tight() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 1.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, -2.0, 3.0), Vec3::new(10.0, 0.5, 4.0));
        let union = Aabb::surrounding(&box1, &box2);

        for corner in [
            Vec3::ZERO,
            Vec3::new(5.0, 1.0, 5.0),
            Vec3::new(3.0, -2.0, 3.0),
            Vec3::new(10.0, 0.5, 4.0),
        ] {
            assert!(union.contains(corner));
        }

        // Every face of the union is touched by one of the inputs
        for axis in 0..3 {
            let u = union.axis_interval(axis);
            let a = box1.axis_interval(axis);
            let b = box2.axis_interval(axis);
            assert_eq!(u.min, a.min.min(b.min));
            assert_eq!(u.max, a.max.max(b.max));
        }
    }

    #[test]
    fn test_aabb_surrounding_empty_is_identity() {
        let b = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &b), b);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_hit_negative_direction() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        let ray = Ray::new_simple(Vec3::new(5.0, 4.0, 3.0), Vec3::new(-5.0, -4.0, -3.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Box lies beyond the interval's upper bound
        assert!(!aabb.hit(&ray, Interval::new(0.0, 0.5)));
    }

    #[test]
    fn test_aabb_universe_hit_by_axis_parallel_ray() {
        let ray = Ray::new_simple(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
        assert!(Aabb::UNIVERSE.hit(&ray, Interval::new(0.001, f32::INFINITY)));
    }
}
