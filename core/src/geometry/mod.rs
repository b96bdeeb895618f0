//! Indexed mesh geometry and the passes that derive shading data from it.
//!
//! This module provides:
//!
//! - [`Geometry`] - the vertex/face store with UV layers, colors, skin and
//!   morph buffers
//! - [`Face`] - triangle or quad records holding vertex indices and
//!   per-corner attributes
//! - Derivation passes on [`Geometry`]: face and vertex normals, tangents,
//!   morph normals, centroids, bounding volumes
//! - Maintenance: vertex welding ([`MergeOptions`]) and affine transforms
//! - [`Workspace`] - scratch accumulators reused between passes
//! - Generators for common shapes (torus, sphere, quad)
//!
//! Derivation order is face normals, then vertex normals, then tangents.
//! Weld vertices before recomputing normals.

mod bounds;
mod data;
mod face;
pub mod generators;
mod merge;
pub mod morph;
pub mod normals;
mod scratch;
pub mod tangents;
mod transform;

pub use bounds::{BoundingBox, BoundingSphere};
pub use data::{Geometry, MorphColor, MorphNormals, MorphTarget, NeedsUpdate, check_face_indices};
pub use face::{Corners, Face, FaceCorners};
pub use merge::MergeOptions;
pub use scratch::Workspace;
