//! Shared fixtures for geometry integration tests.

#![allow(dead_code)]

use std::f32::consts::TAU;

use facet_core::geometry::Geometry;
use facet_core::geometry::generators::{generate_quad, generate_sphere, generate_torus};
use facet_core::math::Vec3;

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const TORUS_RADIUS: f32 = 2.0;
pub const TORUS_TUBE: f32 = 0.5;

// ============================================================================
// Shapes
// ============================================================================

/// Generated shapes used as test input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Closed torus after welding, quads only.
    Torus { radial: u32, tubular: u32 },
    /// UV sphere, triangles only, seams left open.
    Sphere { segments: u32, rings: u32 },
    /// Single quad facing +Z.
    Quad,
}

impl Shape {
    pub fn build(self) -> Geometry {
        match self {
            Shape::Torus { radial, tubular } => closed_torus(radial, tubular),
            Shape::Sphere { segments, rings } => generate_sphere(1.5, segments, rings),
            Shape::Quad => generate_quad(1.0, 0.5),
        }
    }
}

/// Torus with its seams welded, so every vertex is shared by four quads.
pub fn closed_torus(radial: u32, tubular: u32) -> Geometry {
    let mut torus = generate_torus(TORUS_RADIUS, TORUS_TUBE, radial, tubular, TAU);
    torus.merge_vertices().unwrap();
    torus
}

/// Run face normals, vertex normals and tangents in order.
pub fn derive_shading(geometry: &mut Geometry) {
    geometry.compute_face_normals(false).unwrap();
    geometry.compute_vertex_normals().unwrap();
    geometry.compute_tangents().unwrap();
}

// ============================================================================
// Assertions
// ============================================================================

/// Angle between two non-zero vectors, in degrees.
pub fn angle_degrees(a: &Vec3, b: &Vec3) -> f32 {
    let cos = a.dot(b) / (a.norm() * b.norm());
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

pub fn assert_unit(v: &Vec3, context: &str) {
    assert!(
        (v.norm() - 1.0).abs() < 1e-4,
        "{context}: expected unit vector, got {v:?} (length {})",
        v.norm()
    );
}
