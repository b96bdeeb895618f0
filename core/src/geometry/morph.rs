//! Normals for morph targets.
//!
//! Morph normals are computed from the face list and a morph target's vertex
//! buffer alone; the live face and vertex normals of the geometry are never
//! written.

use crate::error::GeometryResult;
use crate::math::Vec3;
use crate::profiling::profile_scope;

use super::data::{Geometry, MorphNormals, NeedsUpdate};
use super::face::Face;
use super::normals::{accumulate_vertex_normals, face_normal};

/// Compute geometric face normals and smoothed vertex normals of `faces` as
/// if the vertex buffer were `vertices`, writing them into `out`.
///
/// `accumulator` must be zeroed; face indices must be in range. Existing
/// allocations in `out` are reused.
///
/// # Panics
///
/// Panics if `accumulator` is not as long as `vertices`.
pub fn compute_morph_normals_into(
    vertices: &[Vec3],
    faces: &[Face],
    accumulator: &mut [Vec3],
    out: &mut MorphNormals,
) {
    assert_eq!(
        accumulator.len(),
        vertices.len(),
        "normal accumulator sized for another vertex buffer"
    );
    out.face_normals.clear();
    out.face_normals
        .extend(faces.iter().map(|face| face_normal(vertices, face)));

    let face_normals = &out.face_normals;
    accumulate_vertex_normals(faces, |i| face_normals[i], accumulator);

    out.vertex_normals.resize_with(faces.len(), Vec::new);
    for (corners, face) in out.vertex_normals.iter_mut().zip(faces) {
        corners.clear();
        corners.extend(face.indices().iter().map(|&index| accumulator[index]));
    }
}

impl Geometry {
    /// Fill the morph normal cache with one entry per morph target.
    ///
    /// Entries for targets seen before are overwritten in place; a new target
    /// appends a new entry. The cache is never truncated, and the geometry's
    /// own normals stay untouched.
    pub fn compute_morph_normals(&mut self) -> GeometryResult<()> {
        profile_scope!("compute_morph_normals");
        self.validate_faces()?;
        self.validate_morph_targets()?;

        let vertex_count = self.vertices.len();
        for (j, target) in self.morph_targets.iter().enumerate() {
            if self.morph_normals.len() == j {
                self.morph_normals.push(MorphNormals::default());
            }
            let accumulator = self.workspace.normal_accumulator(vertex_count);
            compute_morph_normals_into(
                &target.vertices,
                &self.faces,
                accumulator,
                &mut self.morph_normals[j],
            );
        }

        self.needs_update |= NeedsUpdate::MORPH_TARGETS;
        log::debug!(
            "computed morph normals for {} targets over {} faces",
            self.morph_targets.len(),
            self.faces.len()
        );
        Ok(())
    }
}
