//! Affine transforms of the whole store.

use crate::math::{Mat4, extract_rotation, transform_direction, transform_point};
use crate::profiling::profile_scope;

use super::data::{Geometry, NeedsUpdate};

impl Geometry {
    /// Transform the geometry by `matrix`.
    ///
    /// Vertex positions get the full matrix. Face normals, corner normals and
    /// centroids get only the rotation extracted from its upper-left 3x3
    /// block, so centroids do not follow a translation or scale. Call
    /// [`compute_centroids`](Self::compute_centroids) afterwards if centroids
    /// must match the transformed positions. Tangents and stored bounds are
    /// not updated either; recompute them when they are needed.
    pub fn apply_matrix(&mut self, matrix: &Mat4) {
        profile_scope!("apply_matrix");
        let rotation = extract_rotation(matrix);

        for v in &mut self.vertices {
            *v = transform_point(matrix, v);
        }

        for face in &mut self.faces {
            face.normal = transform_direction(&rotation, &face.normal);
            if face.has_vertex_normals() {
                for n in face.vertex_normals_mut() {
                    *n = transform_direction(&rotation, n);
                }
            }
            face.centroid = transform_direction(&rotation, &face.centroid);
        }

        self.needs_update |= NeedsUpdate::VERTICES | NeedsUpdate::NORMALS;
        log::debug!(
            "applied matrix to {} vertices and {} faces",
            self.vertices.len(),
            self.faces.len()
        );
    }
}
