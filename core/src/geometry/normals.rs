//! Face normals, smoothed vertex normals and centroids.
//!
//! The free functions work on plain slices so the morph pass can run them
//! against an alternate vertex buffer; the [`Geometry`] methods validate the
//! store and then delegate to them.

use crate::error::GeometryResult;
use crate::math::{Vec3, normalize_or_zero};
use crate::profiling::profile_scope;

use super::data::{Geometry, NeedsUpdate};
use super::face::Face;

/// Geometric normal of `face`: `normalize((c - b) x (a - b))` over its first
/// three corners. A quad's fourth corner does not take part. Degenerate faces
/// give the zero vector.
///
/// Indices must be in range for `vertices`.
pub fn face_normal(vertices: &[Vec3], face: &Face) -> Vec3 {
    let idx = face.indices();
    let (a, b, c) = (vertices[idx[0]], vertices[idx[1]], vertices[idx[2]]);
    let cb = c - b;
    let ab = a - b;
    normalize_or_zero(cb.cross(&ab))
}

/// Average of the first three corner normals, normalized unless zero.
pub fn averaged_vertex_normal(face: &Face) -> Vec3 {
    let sum: Vec3 = face.vertex_normals().iter().take(3).sum();
    normalize_or_zero(sum / 3.0)
}

/// Recompute every face normal in place.
///
/// With `use_vertex_normals`, faces whose corner normals have been assigned
/// ([`Face::has_vertex_normals`]) get the average of their first three corner
/// normals, which stays zero when they cancel out. All other faces use
/// [`face_normal`].
pub fn compute_face_normals(vertices: &[Vec3], faces: &mut [Face], use_vertex_normals: bool) {
    for face in faces.iter_mut() {
        face.normal = if use_vertex_normals && face.has_vertex_normals() {
            averaged_vertex_normal(face)
        } else {
            face_normal(vertices, face)
        };
    }
}

/// Sum `face_normal(i)` into the accumulator entry of every corner of face
/// `i`, then normalize every entry (zero stays zero).
///
/// `accumulator` must be zeroed and as long as the vertex buffer.
pub fn accumulate_vertex_normals(
    faces: &[Face],
    face_normal: impl Fn(usize) -> Vec3,
    accumulator: &mut [Vec3],
) {
    for (i, face) in faces.iter().enumerate() {
        let normal = face_normal(i);
        for &index in face.indices() {
            accumulator[index] += normal;
        }
    }
    for n in accumulator.iter_mut() {
        *n = normalize_or_zero(*n);
    }
}

/// Copy accumulated per-vertex normals into each face's corner slots.
pub fn assign_vertex_normals(faces: &mut [Face], accumulator: &[Vec3]) {
    for face in faces.iter_mut() {
        let corners = face.corner_count();
        for corner in 0..corners {
            let index = face.indices()[corner];
            face.vertex_normals_mut()[corner] = accumulator[index];
        }
    }
}

/// Set each face centroid to the mean of its corner positions.
pub fn compute_centroids(vertices: &[Vec3], faces: &mut [Face]) {
    for face in faces.iter_mut() {
        let sum: Vec3 = face.indices().iter().map(|&i| vertices[i]).sum();
        face.centroid = sum / face.corner_count() as f32;
    }
}

impl Geometry {
    /// Recompute per-face normals.
    ///
    /// See [`compute_face_normals`] for the `use_vertex_normals` policy.
    pub fn compute_face_normals(&mut self, use_vertex_normals: bool) -> GeometryResult<()> {
        profile_scope!("compute_face_normals");
        self.validate_faces()?;
        compute_face_normals(&self.vertices, &mut self.faces, use_vertex_normals);
        self.needs_update |= NeedsUpdate::NORMALS;
        log::debug!(
            "computed {} face normals (vertex-averaged: {})",
            self.faces.len(),
            use_vertex_normals
        );
        Ok(())
    }

    /// Smooth vertex normals: each corner gets the normalized sum of the face
    /// normals of every face that uses its vertex.
    ///
    /// Reads the current face normals, so call
    /// [`compute_face_normals`](Self::compute_face_normals) first. The
    /// accumulator buffer is kept in the geometry's [`Workspace`] and reused
    /// across calls.
    ///
    /// [`Workspace`]: super::Workspace
    pub fn compute_vertex_normals(&mut self) -> GeometryResult<()> {
        profile_scope!("compute_vertex_normals");
        self.validate_faces()?;
        let accumulator = self.workspace.normal_accumulator(self.vertices.len());
        let faces = &self.faces;
        accumulate_vertex_normals(faces, |i| faces[i].normal, accumulator);
        assign_vertex_normals(&mut self.faces, accumulator);
        self.needs_update |= NeedsUpdate::NORMALS;
        log::debug!(
            "smoothed vertex normals for {} vertices over {} faces",
            self.vertices.len(),
            self.faces.len()
        );
        Ok(())
    }

    /// Set every face centroid to the average of its corner positions.
    pub fn compute_centroids(&mut self) -> GeometryResult<()> {
        profile_scope!("compute_centroids");
        self.validate_faces()?;
        compute_centroids(&self.vertices, &mut self.faces);
        Ok(())
    }
}
