//! Geometry error types.
//!
//! Degenerate input (zero-area faces, collapsed UVs, empty buffers) is not an
//! error: the kernel produces degenerate output for it. Errors are reserved for
//! broken buffer invariants, which are reported before any buffer is touched.

use thiserror::Error;

/// An index-aligned per-vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexBuffer {
    Colors,
    SkinWeights,
    SkinIndices,
}

impl std::fmt::Display for VertexBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Colors => write!(f, "colors"),
            Self::SkinWeights => write!(f, "skin weights"),
            Self::SkinIndices => write!(f, "skin indices"),
        }
    }
}

/// Invalid geometry detected by a kernel pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("face {face} corner {corner} references vertex {index}, but only {vertex_count} vertices exist")]
    VertexIndexOutOfRange {
        face: usize,
        corner: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("UV layer {0} does not exist")]
    MissingUvLayer(usize),
    #[error("UV layer {layer} has no entry for face {face}")]
    MissingFaceUvs { layer: usize, face: usize },
    #[error("UV layer {layer} face {face} has {found} coordinates, expected {expected}")]
    FaceUvCount {
        layer: usize,
        face: usize,
        expected: usize,
        found: usize,
    },
    #[error("morph target {target} ({name}) has {found} vertices, expected {expected}")]
    MorphTargetLength {
        target: usize,
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("{buffer} buffer has {found} entries, expected {expected}")]
    BufferLength {
        buffer: VertexBuffer,
        expected: usize,
        found: usize,
    },
}

pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::VertexIndexOutOfRange {
            face: 2,
            corner: 1,
            index: 9,
            vertex_count: 4,
        };
        assert_eq!(
            err.to_string(),
            "face 2 corner 1 references vertex 9, but only 4 vertices exist"
        );

        let err = GeometryError::BufferLength {
            buffer: VertexBuffer::SkinWeights,
            expected: 8,
            found: 7,
        };
        assert_eq!(err.to_string(), "skin weights buffer has 7 entries, expected 8");
    }
}
