//! Per-corner tangent frames for normal mapping.
//!
//! Tangents are accumulated per vertex from the UV gradients of every
//! triangle touching it, then orthogonalized against each corner's vertex
//! normal. A quad contributes two overlapping triangles, `(a, b, c)` and
//! `(a, b, d)`.

use crate::error::GeometryResult;
use crate::math::{Uv, Vec3, Vec4, normalize_or_zero};
use crate::profiling::profile_scope;

use super::data::{Geometry, NeedsUpdate};
use super::face::{Face, FaceCorners};

/// UV layer used for tangent generation.
pub const TANGENT_UV_LAYER: usize = 0;

/// Add the UV-space gradients of one triangle to `tan1` (s direction) and
/// `tan2` (t direction) at all three of its vertices.
///
/// A zero UV-space determinant is not special-cased: it yields non-finite
/// gradients that propagate into the affected tangents.
fn accumulate_triangle(
    vertices: &[Vec3],
    indices: [usize; 3],
    uvs: [Uv; 3],
    tan1: &mut [Vec3],
    tan2: &mut [Vec3],
) {
    let [a, b, c] = indices;
    let (v_a, v_b, v_c) = (vertices[a], vertices[b], vertices[c]);
    let [uv_a, uv_b, uv_c] = uvs;

    let x1 = v_b.x - v_a.x;
    let x2 = v_c.x - v_a.x;
    let y1 = v_b.y - v_a.y;
    let y2 = v_c.y - v_a.y;
    let z1 = v_b.z - v_a.z;
    let z2 = v_c.z - v_a.z;

    let s1 = uv_b.x - uv_a.x;
    let s2 = uv_c.x - uv_a.x;
    let t1 = uv_b.y - uv_a.y;
    let t2 = uv_c.y - uv_a.y;

    let r = 1.0 / (s1 * t2 - s2 * t1);

    let sdir = Vec3::new(
        (t2 * x1 - t1 * x2) * r,
        (t2 * y1 - t1 * y2) * r,
        (t2 * z1 - t1 * z2) * r,
    );
    let tdir = Vec3::new(
        (s1 * x2 - s2 * x1) * r,
        (s1 * y2 - s2 * y1) * r,
        (s1 * z2 - s2 * z1) * r,
    );

    for index in indices {
        tan1[index] += sdir;
        tan2[index] += tdir;
    }
}

/// Gram-Schmidt orthogonalize `t` against the unit normal `n` and attach the
/// handedness of the `(n, t, bitangent)` frame in `w`.
pub fn orthogonalize_tangent(n: &Vec3, t: &Vec3, bitangent: &Vec3) -> Vec4 {
    let tangent = normalize_or_zero(t - n * n.dot(t));
    let w = if n.cross(t).dot(bitangent) < 0.0 {
        -1.0
    } else {
        1.0
    };
    Vec4::new(tangent.x, tangent.y, tangent.z, w)
}

/// Compute tangents for every face corner.
///
/// `uvs` holds one entry per face with one coordinate per corner, and
/// `tan1`/`tan2` must be zeroed. Face indices must be in range. Returns the
/// number of corners that ended up with a non-finite tangent.
///
/// # Panics
///
/// Panics if `tan1` or `tan2` is not as long as `vertices`.
pub fn compute_tangents(
    vertices: &[Vec3],
    faces: &mut [Face],
    uvs: &[Vec<Uv>],
    tan1: &mut [Vec3],
    tan2: &mut [Vec3],
) -> usize {
    assert_eq!(tan1.len(), vertices.len(), "tan1 accumulator sized for another vertex buffer");
    assert_eq!(tan2.len(), vertices.len(), "tan2 accumulator sized for another vertex buffer");
    for (face, uv) in faces.iter().zip(uvs) {
        match &face.corners {
            FaceCorners::Triangle(tri) => {
                accumulate_triangle(vertices, tri.indices, [uv[0], uv[1], uv[2]], tan1, tan2);
            }
            FaceCorners::Quad(quad) => {
                let [a, b, c, d] = quad.indices;
                accumulate_triangle(vertices, [a, b, c], [uv[0], uv[1], uv[2]], tan1, tan2);
                accumulate_triangle(vertices, [a, b, d], [uv[0], uv[1], uv[3]], tan1, tan2);
            }
        }
    }

    let mut non_finite = 0;
    for face in faces.iter_mut() {
        for corner in 0..face.corner_count() {
            let index = face.indices()[corner];
            let n = face.vertex_normals()[corner];
            let tangent = orthogonalize_tangent(&n, &tan1[index], &tan2[index]);
            if !tangent.iter().all(|c| c.is_finite()) {
                non_finite += 1;
            }
            face.vertex_tangents_mut()[corner] = tangent;
        }
    }
    non_finite
}

impl Geometry {
    /// Compute per-corner tangents from UV layer 0 and the current vertex
    /// normals, then set [`has_tangents`](Self::has_tangents).
    ///
    /// Requires vertex normals, so run
    /// [`compute_vertex_normals`](Self::compute_vertex_normals) first.
    pub fn compute_tangents(&mut self) -> GeometryResult<()> {
        profile_scope!("compute_tangents");
        self.validate_faces()?;
        self.validate_uv_layer(TANGENT_UV_LAYER)?;

        let (tan1, tan2) = self.workspace.tangent_accumulators(self.vertices.len());
        let non_finite = compute_tangents(
            &self.vertices,
            &mut self.faces,
            &self.face_vertex_uvs[TANGENT_UV_LAYER],
            tan1,
            tan2,
        );
        if non_finite > 0 {
            log::warn!(
                "{} face corners have non-finite tangents (degenerate UV mapping)",
                non_finite
            );
        }

        self.has_tangents = true;
        self.needs_update |= NeedsUpdate::TANGENTS;
        log::debug!("computed tangents for {} faces", self.faces.len());
        Ok(())
    }
}
