//! End-to-end tests for the geometry kernel.
//!
//! Each test drives generated shapes through the derivation passes in the
//! order a loader or deformer would (weld, face normals, vertex normals,
//! tangents) and checks the geometric properties of the results.
//!
//! # Test Categories
//!
//! - **Welding**: seam welding on closed shapes
//! - **Normals**: agreement between geometric and smoothed normals
//! - **Tangents**: orthonormal tangent frames
//! - **Transforms**: rotations carried through positions and normals
//! - **Morph normals**: cache contents and base normals left intact
//! - **Bounds**: boxes and spheres over generated shapes

mod common;

use std::f32::consts::{FRAC_PI_2, TAU};

use rstest::rstest;

use common::{
    Shape, TORUS_RADIUS, TORUS_TUBE, angle_degrees, assert_unit, closed_torus, derive_shading,
    init_logging,
};
use facet_core::geometry::generators::generate_torus;
use facet_core::geometry::normals::face_normal;
use facet_core::geometry::{MorphTarget, NeedsUpdate};
use facet_core::math::{Mat4, Vec3, mat4_from_scale_rotation_translation, quat_from_rotation_y};

// ============================================================================
// Welding
// ============================================================================

/// Welding a closed torus removes exactly one seam row and one seam column.
#[rstest]
#[case::coarse(4, 6)]
#[case::medium(8, 12)]
#[case::fine(16, 32)]
fn test_torus_seams_weld(#[case] radial: u32, #[case] tubular: u32) {
    init_logging();
    let mut torus = generate_torus(TORUS_RADIUS, TORUS_TUBE, radial, tubular, TAU);
    let before = torus.vertex_count();

    let removed = torus.merge_vertices().unwrap();

    assert_eq!(removed, (radial + tubular + 1) as usize);
    assert_eq!(torus.vertex_count(), before - removed);
    assert_eq!(torus.vertex_count(), (radial * tubular) as usize);
    assert!(torus.faces().iter().all(|f| f.is_quad()));
    assert!(torus.validate().is_ok());
    assert!(torus.needs_update().contains(NeedsUpdate::VERTICES | NeedsUpdate::ELEMENTS));

    // A second pass finds nothing left to weld.
    assert_eq!(torus.merge_vertices().unwrap(), 0);
}

/// An open arc keeps its end caps apart.
#[test]
fn test_open_torus_keeps_arc_ends() {
    init_logging();
    let mut torus = generate_torus(TORUS_RADIUS, TORUS_TUBE, 8, 12, FRAC_PI_2);
    // Only the tube seam (j = 0 and j = radial) coincides.
    assert_eq!(torus.merge_vertices().unwrap(), 13);
}

// ============================================================================
// Normals
// ============================================================================

/// Geometric face normals are unit length and perpendicular to face edges.
#[rstest]
#[case::torus(Shape::Torus { radial: 8, tubular: 12 })]
#[case::sphere(Shape::Sphere { segments: 12, rings: 6 })]
#[case::quad(Shape::Quad)]
fn test_face_normals_unit_and_perpendicular(#[case] shape: Shape) {
    init_logging();
    let mut geometry = shape.build();
    geometry.compute_face_normals(false).unwrap();

    let vertices = geometry.vertices();
    for (i, face) in geometry.faces().iter().enumerate() {
        assert_unit(&face.normal, &format!("face {i}"));
        let idx = face.indices();
        let e1 = vertices[idx[1]] - vertices[idx[0]];
        let e2 = vertices[idx[2]] - vertices[idx[0]];
        assert!(face.normal.dot(&e1).abs() < 1e-4);
        assert!(face.normal.dot(&e2).abs() < 1e-4);
    }
}

/// On a closed torus, face normals rebuilt from smoothed vertex normals stay
/// close to the geometric ones.
#[rstest]
#[case::medium(16, 32)]
#[case::fine(24, 48)]
fn test_vertex_averaged_normals_track_geometric(#[case] radial: u32, #[case] tubular: u32) {
    init_logging();
    let mut torus = closed_torus(radial, tubular);
    torus.compute_face_normals(false).unwrap();
    let geometric: Vec<Vec3> = torus.faces().iter().map(|f| f.normal).collect();

    torus.compute_vertex_normals().unwrap();
    torus.compute_face_normals(true).unwrap();

    for (face, expected) in torus.faces().iter().zip(&geometric) {
        assert_unit(&face.normal, "vertex-averaged normal");
        let angle = angle_degrees(&face.normal, expected);
        assert!(angle < 12.0, "normals diverge by {angle} degrees");
    }
}

/// Smoothed vertex normals on a welded torus point away from the tube axis.
#[test]
fn test_torus_vertex_normals_point_off_tube_axis() {
    init_logging();
    let mut torus = closed_torus(16, 32);
    torus.compute_face_normals(false).unwrap();
    torus.compute_vertex_normals().unwrap();

    let vertices = torus.vertices();
    for face in torus.faces() {
        for (&index, n) in face.indices().iter().zip(face.vertex_normals()) {
            let v = vertices[index];
            let axis_point = Vec3::new(v.x, v.y, 0.0).normalize() * TORUS_RADIUS;
            let outward = v - axis_point;
            assert_unit(n, "vertex normal");
            assert!(angle_degrees(n, &outward) < 10.0);
        }
    }
}

// ============================================================================
// Tangents
// ============================================================================

/// Tangent frames are unit length, orthogonal to the corner normal and carry
/// a ±1 handedness.
#[rstest]
#[case::torus(Shape::Torus { radial: 8, tubular: 16 })]
#[case::sphere(Shape::Sphere { segments: 16, rings: 8 })]
#[case::quad(Shape::Quad)]
fn test_tangents_orthogonal_to_normals(#[case] shape: Shape) {
    init_logging();
    let mut geometry = shape.build();
    derive_shading(&mut geometry);

    assert!(geometry.has_tangents());
    assert!(geometry.needs_update().contains(NeedsUpdate::TANGENTS));
    for face in geometry.faces() {
        for (t, n) in face.vertex_tangents().iter().zip(face.vertex_normals()) {
            assert!(t.iter().all(|c| c.is_finite()), "{t:?}");
            assert!(t.w == 1.0 || t.w == -1.0);
            assert!(t.xyz().dot(n).abs() < 1e-4);
            assert_unit(&t.xyz(), "tangent");
        }
    }
}

// ============================================================================
// Transforms
// ============================================================================

/// A rotation moves positions and normals together and keeps normals unit.
#[rstest]
#[case::torus(Shape::Torus { radial: 8, tubular: 12 })]
#[case::sphere(Shape::Sphere { segments: 12, rings: 6 })]
fn test_rotation_carries_normals(#[case] shape: Shape) {
    init_logging();
    let mut geometry = shape.build();
    geometry.compute_face_normals(false).unwrap();
    geometry.compute_vertex_normals().unwrap();
    geometry.compute_centroids().unwrap();

    let m = mat4_from_scale_rotation_translation(
        Vec3::new(1.0, 1.0, 1.0),
        quat_from_rotation_y(0.7),
        Vec3::zeros(),
    );
    let rotation = m.fixed_view::<3, 3>(0, 0).into_owned();
    let before = geometry.faces().to_vec();

    geometry.apply_matrix(&m);

    for (face, old) in geometry.faces().iter().zip(&before) {
        assert_unit(&face.normal, "rotated face normal");
        assert!((face.normal - rotation * old.normal).norm() < 1e-5);
        assert!((face.centroid - rotation * old.centroid).norm() < 1e-4);
        for n in face.vertex_normals() {
            assert_unit(n, "rotated vertex normal");
        }
        let recomputed = face_normal(geometry.vertices(), face);
        assert!((recomputed - face.normal).norm() < 1e-4);
    }
}

/// The identity matrix leaves the store unchanged.
#[test]
fn test_identity_matrix_is_noop() {
    init_logging();
    let mut geometry = Shape::Sphere { segments: 8, rings: 4 }.build();
    derive_shading(&mut geometry);
    let vertices = geometry.vertices().to_vec();
    let faces = geometry.faces().to_vec();

    geometry.apply_matrix(&Mat4::identity());

    assert_eq!(geometry.vertices(), vertices.as_slice());
    assert_eq!(geometry.faces(), faces.as_slice());
}

// ============================================================================
// Morph normals
// ============================================================================

/// Computing morph normals leaves the live normals bit-for-bit unchanged.
#[test]
fn test_morph_normals_leave_base_normals() {
    init_logging();
    let mut torus = closed_torus(8, 12);
    derive_shading(&mut torus);
    let before = torus.faces().to_vec();

    let twisted: Vec<Vec3> = torus
        .vertices()
        .iter()
        .map(|v| Vec3::new(v.x, v.y, v.z + 0.3 * v.x))
        .collect();
    torus.push_morph_target(MorphTarget::new("twist", twisted.clone()));
    torus.compute_morph_normals().unwrap();

    assert_eq!(torus.faces(), before.as_slice());
    let cache = &torus.morph_normals()[0];
    assert_eq!(cache.face_normals.len(), torus.face_count());
    for (face, n) in torus.faces().iter().zip(&cache.face_normals) {
        assert!((face_normal(&twisted, face) - n).norm() < 1e-6);
    }
}

/// Uniformly scaling the mesh does not change any normal direction, so the
/// morph cache matches the base normals.
#[rstest]
#[case::grow(1.5)]
#[case::shrink(0.25)]
fn test_scaled_morph_matches_base_normals(#[case] scale: f32) {
    init_logging();
    let mut torus = closed_torus(8, 12);
    torus.compute_face_normals(false).unwrap();
    torus.compute_vertex_normals().unwrap();

    let scaled: Vec<Vec3> = torus.vertices().iter().map(|v| v * scale).collect();
    torus.push_morph_target(MorphTarget::new("scaled", scaled));
    torus.compute_morph_normals().unwrap();

    let cache = &torus.morph_normals()[0];
    for (f, face) in torus.faces().iter().enumerate() {
        assert!((cache.face_normals[f] - face.normal).norm() < 1e-4);
        for (morph, base) in cache.vertex_normals[f].iter().zip(face.vertex_normals()) {
            assert!((morph - base).norm() < 1e-4);
        }
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// The torus box spans the outer ring in XY and the tube in Z.
#[test]
fn test_torus_bounding_volumes() {
    init_logging();
    let mut torus = closed_torus(8, 16);
    let outer = TORUS_RADIUS + TORUS_TUBE;

    let bb = *torus.compute_bounding_box();
    assert!((bb.max - Vec3::new(outer, outer, TORUS_TUBE)).norm() < 1e-4);
    assert!((bb.min + Vec3::new(outer, outer, TORUS_TUBE)).norm() < 1e-4);
    assert!(torus.vertices().iter().all(|v| bb.contains(v)));

    let radius = torus.compute_bounding_sphere().radius;
    assert!((radius - outer).abs() < 1e-4);

    // Shrinking the mesh keeps the sphere until it is reset.
    torus.apply_matrix(&mat4_from_scale_rotation_translation(
        Vec3::new(0.5, 0.5, 0.5),
        quat_from_rotation_y(0.0),
        Vec3::zeros(),
    ));
    assert_eq!(torus.compute_bounding_sphere().radius, radius);
    torus.reset_bounding_sphere();
    assert!((torus.compute_bounding_sphere().radius - outer * 0.5).abs() < 1e-4);
}
