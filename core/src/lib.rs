//! # Facet Core
//!
//! Mesh geometry kernel: an indexed triangle/quad store plus the passes that
//! derive face normals, smoothed vertex normals, tangents, morph-target
//! normals and bounding volumes from it, and the welding and transform
//! utilities that maintain it.

pub mod error;
pub mod geometry;
pub mod math;
pub mod profiling;

pub use error::{GeometryError, GeometryResult};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once at startup.
pub fn init() {
    log::info!("Facet Core v{} initialized", VERSION);
}
