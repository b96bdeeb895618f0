//! Vertex welding.

use std::collections::HashMap;

use crate::error::GeometryResult;
use crate::math::Vec3;
use crate::profiling::{profile_plot, profile_scope};

use super::data::{Geometry, NeedsUpdate};

/// Options for [`Geometry::merge_vertices_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Decimal digits kept per coordinate when comparing positions.
    pub precision_digits: u32,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            precision_digits: 4,
        }
    }
}

impl MergeOptions {
    pub fn with_precision_digits(mut self, digits: u32) -> Self {
        self.precision_digits = digits;
        self
    }

    fn scale(&self) -> f32 {
        10f32.powi(self.precision_digits as i32)
    }
}

type PositionKey = (i64, i64, i64);

fn position_key(v: &Vec3, scale: f32) -> PositionKey {
    (
        (v.x * scale).round() as i64,
        (v.y * scale).round() as i64,
        (v.z * scale).round() as i64,
    )
}

/// Build the old-to-new index table. Returns the table and the indices of the
/// vertices that survive, in their original order.
fn weld_table(vertices: &[Vec3], scale: f32) -> (Vec<usize>, Vec<usize>) {
    let mut seen: HashMap<PositionKey, usize> = HashMap::with_capacity(vertices.len());
    let mut kept = Vec::with_capacity(vertices.len());
    let changes = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| {
            *seen.entry(position_key(v, scale)).or_insert_with(|| {
                kept.push(i);
                kept.len() - 1
            })
        })
        .collect();
    (changes, kept)
}

/// Keep the entries listed in `kept` when `buffer` is aligned with a vertex
/// buffer of `vertex_count`. Other buffers are left alone.
fn compact<T: Copy>(buffer: &mut Vec<T>, kept: &[usize], vertex_count: usize) {
    if buffer.len() == vertex_count {
        *buffer = kept.iter().map(|&i| buffer[i]).collect();
    }
}

/// The corner to drop from a quad whose indices repeat: the highest corner
/// `k` in `3..=1` whose index already appears at an earlier corner.
fn duplicated_corner(indices: &[usize]) -> Option<usize> {
    (1..indices.len())
        .rev()
        .find(|&k| indices[..k].contains(&indices[k]))
}

impl Geometry {
    /// Weld vertices that share a position at the default precision.
    ///
    /// See [`merge_vertices_with`](Self::merge_vertices_with).
    pub fn merge_vertices(&mut self) -> GeometryResult<usize> {
        self.merge_vertices_with(MergeOptions::default())
    }

    /// Weld vertices whose coordinates agree after rounding to
    /// `options.precision_digits` decimals, and return how many were removed.
    ///
    /// The first vertex of each group survives. Faces are remapped; a quad
    /// left with a repeated index becomes a triangle, and its UV entry for the
    /// dropped corner is removed from every layer. Colors, skin buffers and
    /// morph targets that are aligned with the vertex buffer are compacted in
    /// the same way.
    pub fn merge_vertices_with(&mut self, options: MergeOptions) -> GeometryResult<usize> {
        profile_scope!("merge_vertices");
        self.validate_faces()?;

        let old_count = self.vertices.len();
        let (changes, kept) = weld_table(&self.vertices, options.scale());

        compact(&mut self.colors, &kept, old_count);
        compact(&mut self.skin_weights, &kept, old_count);
        compact(&mut self.skin_indices, &kept, old_count);
        for target in &mut self.morph_targets {
            compact(&mut target.vertices, &kept, old_count);
        }
        compact(&mut self.vertices, &kept, old_count);

        let mut demoted = 0;
        for (face_index, face) in self.faces.iter_mut().enumerate() {
            for index in face.indices_mut() {
                *index = changes[*index];
            }
            if !face.is_quad() {
                continue;
            }
            let Some(k) = duplicated_corner(face.indices()) else {
                continue;
            };
            face.demote_to_triangle(k);
            demoted += 1;
            for layer in &mut self.face_vertex_uvs {
                if let Some(uvs) = layer.get_mut(face_index) {
                    if k < uvs.len() {
                        uvs.remove(k);
                    }
                }
            }
        }

        let removed = old_count - self.vertices.len();
        if demoted > 0 {
            log::warn!("merge_vertices demoted {} degenerate quads to triangles", demoted);
            self.needs_update |= NeedsUpdate::UVS;
        }
        self.needs_update |= NeedsUpdate::VERTICES | NeedsUpdate::ELEMENTS;
        profile_plot!("merged_vertex_count", self.vertices.len() as f64);
        log::debug!(
            "merged {} vertices ({} -> {})",
            removed,
            old_count,
            self.vertices.len()
        );
        Ok(removed)
    }
}
