//! Bounding volumes.

use crate::math::Vec3;
use crate::profiling::profile_scope;

use super::data::Geometry;

/// Axis-aligned bounding box. `min <= max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Box around `points`, or the all-zero box when there are none.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let mut min = *first;
        let mut max = *first;
        for p in points {
            min = min.inf(p);
            max = max.sup(p);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: &Vec3) -> bool {
        p.x >= self.min.x
            && p.y >= self.min.y
            && p.z >= self.min.z
            && p.x <= self.max.x
            && p.y <= self.max.y
            && p.z <= self.max.z
    }
}

/// Origin-centered bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub radius: f32,
}

impl Geometry {
    /// Recompute the bounding box from the vertex buffer.
    pub fn compute_bounding_box(&mut self) -> &BoundingBox {
        profile_scope!("compute_bounding_box");
        self.bounding_box.insert(BoundingBox::from_points(&self.vertices))
    }

    /// Recompute the bounding sphere radius.
    ///
    /// The radius is the largest vertex distance from the origin, but never
    /// smaller than the previously stored radius: repeated calls only grow the
    /// sphere. Call [`reset_bounding_sphere`](Self::reset_bounding_sphere)
    /// first to measure the current vertices alone.
    pub fn compute_bounding_sphere(&mut self) -> &BoundingSphere {
        profile_scope!("compute_bounding_sphere");
        let floor = self.bounding_sphere.map_or(0.0, |s| s.radius);
        let radius = self.vertices.iter().map(|v| v.norm()).fold(floor, f32::max);
        self.bounding_sphere.insert(BoundingSphere { radius })
    }

    /// Discard the stored bounding sphere.
    pub fn reset_bounding_sphere(&mut self) {
        self.bounding_sphere = None;
    }
}
