//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built by sorting primitives on a random axis and splitting
//! at the median. Traversal skips any subtree whose box the ray misses within
//! the current closest-hit interval.

use crate::{HitRecord, Hittable, Primitive};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use umbra_math::{Aabb, Interval, Ray};

/// BVH node.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Tree over zero primitives; never hit.
    Empty,
    /// A single primitive (both children of the node alias it).
    Leaf { primitive: Primitive, bbox: Aabb },
    /// Two primitives, ordered by box minimum on the split axis.
    Pair {
        left: Primitive,
        right: Primitive,
        bbox: Aabb,
    },
    /// Internal node with two subtrees.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
}

impl BvhNode {
    /// Create a BVH from a list of primitives.
    ///
    /// `rng` picks the split axis at each level.
    pub fn new(objects: Vec<Primitive>, rng: &mut dyn RngCore) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(objects, rng)
    }

    fn build(mut objects: Vec<Primitive>, rng: &mut dyn RngCore) -> Self {
        let axis = rng.gen_range(0..3);

        match objects.len() {
            1 => {
                let primitive = objects.remove(0);
                let bbox = primitive.bounding_box();
                BvhNode::Leaf { primitive, bbox }
            }
            2 => {
                let second = objects.remove(1);
                let first = objects.remove(0);
                let (left, right) = if box_compare(&first, &second, axis) == Ordering::Greater {
                    (second, first)
                } else {
                    (first, second)
                };
                let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
                BvhNode::Pair { left, right, bbox }
            }
            n => {
                objects.sort_by(|a, b| box_compare(a, b, axis));

                let mid = n / 2;
                let right_objects = objects.split_off(mid);
                let left = Self::build(objects, rng);
                let right = Self::build(right_objects, rng);
                let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());

                BvhNode::Branch {
                    left: Box::new(left),
                    right: Box::new(right),
                    bbox,
                }
            }
        }
    }

    /// Depth of the tree (a leaf or pair counts as 1).
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } | BvhNode::Pair { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Order two primitives by the minimum of their boxes on `axis`.
fn box_compare(a: &Primitive, b: &Primitive, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { primitive, bbox } => {
                bbox.hit(ray, ray_t) && primitive.hit(ray, ray_t, rec)
            }

            BvhNode::Pair { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. }
            | BvhNode::Pair { bbox, .. }
            | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
