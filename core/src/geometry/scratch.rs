//! Reusable accumulator buffers for the normal and tangent passes.
//!
//! Smoothing runs every frame for deforming meshes, so the per-vertex
//! accumulators are kept alive between calls instead of being rebuilt. Each
//! accumulator is sized to the vertex count it was last used with; a request
//! for a different count invalidates it and sizes it afresh, so stale entries
//! from an older vertex buffer are never read.

use crate::math::Vec3;

/// Scratch buffers owned by a [`Geometry`](super::Geometry) (or by a caller
/// driving the free functions in [`normals`](super::normals) directly).
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    normals: Vec<Vec3>,
    tan1: Vec<Vec3>,
    tan2: Vec<Vec3>,
    invalidations: usize,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroed normal accumulator with exactly `vertex_count` entries.
    pub fn normal_accumulator(&mut self, vertex_count: usize) -> &mut [Vec3] {
        if prepare(&mut self.normals, vertex_count) {
            self.invalidations += 1;
        }
        debug_assert_eq!(self.normals.len(), vertex_count);
        self.normals.as_mut_slice()
    }

    /// Zeroed `(tan1, tan2)` accumulators with exactly `vertex_count` entries.
    pub fn tangent_accumulators(&mut self, vertex_count: usize) -> (&mut [Vec3], &mut [Vec3]) {
        let resized = prepare(&mut self.tan1, vertex_count);
        prepare(&mut self.tan2, vertex_count);
        if resized {
            self.invalidations += 1;
        }
        (self.tan1.as_mut_slice(), self.tan2.as_mut_slice())
    }

    /// Number of times an accumulator had to be resized to a new vertex count.
    pub fn invalidations(&self) -> usize {
        self.invalidations
    }

    /// Drop all scratch memory.
    pub fn release(&mut self) {
        self.normals = Vec::new();
        self.tan1 = Vec::new();
        self.tan2 = Vec::new();
    }
}

/// Zero `buffer` in place, resizing it first if its length differs from `len`.
/// Returns `true` when the length changed.
fn prepare(buffer: &mut Vec<Vec3>, len: usize) -> bool {
    if buffer.len() == len {
        buffer.fill(Vec3::zeros());
        return false;
    }
    log::trace!(
        "resizing geometry scratch buffer from {} to {} entries",
        buffer.len(),
        len
    );
    buffer.clear();
    buffer.resize(len, Vec3::zeros());
    true
}
