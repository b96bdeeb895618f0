//! Geometry generators for common shapes.
//!
//! Generated geometries come with vertex normals, centroids and a UV layer 0,
//! so they are ready for [`Geometry::compute_tangents`]. Seam vertices are
//! duplicated; run [`Geometry::merge_vertices`] to weld them.

use std::f32::consts::{PI, TAU};

use crate::math::{Uv, Vec3, normalize_or_zero};

use super::data::Geometry;
use super::face::Face;
use super::normals::compute_centroids;

/// Generate a torus made of quads around the Z axis.
///
/// The ring lies in the XY plane. `arc` is the swept angle in radians (`TAU`
/// for a closed ring). Face corner normals point away from the tube's center
/// line and each face normal is their normalized sum.
///
/// # Arguments
///
/// * `radius` - Distance from the origin to the center of the tube
/// * `tube` - Tube radius
/// * `radial_segments` - Segments around the tube cross-section
/// * `tubular_segments` - Segments along the ring
/// * `arc` - Swept angle of the ring
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
    arc: f32,
) -> Geometry {
    let columns = tubular_segments as usize + 1;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut grid_uvs = Vec::new();

    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * arc;
            let v = j as f32 / radial_segments as f32 * TAU;

            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let ring = radius + tube * v.cos();
            let vertex = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());

            vertices.push(vertex);
            normals.push(normalize_or_zero(vertex - center));
            grid_uvs.push(Uv::new(
                i as f32 / tubular_segments as f32,
                j as f32 / radial_segments as f32,
            ));
        }
    }

    let mut faces = Vec::new();
    let mut uvs = Vec::new();
    for j in 1..=radial_segments as usize {
        for i in 1..=tubular_segments as usize {
            let a = columns * j + i - 1;
            let b = columns * (j - 1) + i - 1;
            let c = columns * (j - 1) + i;
            let d = columns * j + i;

            let corner_normals = [normals[a], normals[b], normals[c], normals[d]];
            let normal = normalize_or_zero(corner_normals.iter().sum());
            faces.push(
                Face::quad(a, b, c, d)
                    .with_normal(normal)
                    .with_vertex_normals(&corner_normals),
            );
            uvs.push(vec![grid_uvs[a], grid_uvs[b], grid_uvs[c], grid_uvs[d]]);
        }
    }

    compute_centroids(&vertices, &mut faces);
    Geometry::new()
        .with_vertices(vertices)
        .with_faces(faces)
        .with_uv_layer(0, uvs)
        .with_label("torus")
}

/// Generate a UV sphere made of triangles.
///
/// Creates a sphere with the given radius, number of longitudinal segments,
/// and number of latitudinal rings. The zero-area triangles that would touch
/// the poles are left out, so a sphere with `rings >= 2` has
/// `2 * segments * (rings - 1)` faces.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> Geometry {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut grid_uvs = Vec::new();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for segment in 0..=segments {
            let phi = segment as f32 * TAU / segments as f32;
            let unit = Vec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin());

            vertices.push(unit * radius);
            normals.push(unit);
            grid_uvs.push(Uv::new(
                segment as f32 / segments as f32,
                ring as f32 / rings as f32,
            ));
        }
    }

    let mut faces = Vec::new();
    let mut uvs = Vec::new();
    let mut push = |a: usize, b: usize, c: usize| {
        let corner_normals = [normals[a], normals[b], normals[c]];
        faces.push(Face::triangle(a, b, c).with_vertex_normals(&corner_normals));
        uvs.push(vec![grid_uvs[a], grid_uvs[b], grid_uvs[c]]);
    };

    let stride = segments as usize + 1;
    for ring in 0..rings as usize {
        for segment in 0..segments as usize {
            let current = ring * stride + segment;
            let next = current + stride;

            if ring != 0 {
                push(current, current + 1, next);
            }
            if ring + 1 != rings as usize {
                push(current + 1, next + 1, next);
            }
        }
    }

    compute_centroids(&vertices, &mut faces);
    let mut geometry = Geometry::new()
        .with_vertices(vertices)
        .with_faces(faces)
        .with_uv_layer(0, uvs)
        .with_label("sphere");
    super::normals::compute_face_normals(&geometry.vertices, &mut geometry.faces, false);
    geometry
}

/// Generate a single quad face on the XY plane, facing +Z.
///
/// UV coordinates go from (0,0) at top-left to (1,1) at bottom-right.
///
/// # Arguments
///
/// * `half_width` - Half the width of the quad along the X axis
/// * `half_height` - Half the height of the quad along the Y axis
pub fn generate_quad(half_width: f32, half_height: f32) -> Geometry {
    let vertices = vec![
        Vec3::new(-half_width, -half_height, 0.0),
        Vec3::new(half_width, -half_height, 0.0),
        Vec3::new(half_width, half_height, 0.0),
        Vec3::new(-half_width, half_height, 0.0),
    ];
    let uvs = vec![
        Uv::new(0.0, 1.0),
        Uv::new(1.0, 1.0),
        Uv::new(1.0, 0.0),
        Uv::new(0.0, 0.0),
    ];
    let up = Vec3::new(0.0, 0.0, 1.0);

    Geometry::new()
        .with_vertices(vertices)
        .with_faces(vec![
            Face::quad(0, 1, 2, 3)
                .with_normal(up)
                .with_vertex_normals(&[up; 4]),
        ])
        .with_uv_layer(0, vec![uvs])
        .with_label("quad")
}
