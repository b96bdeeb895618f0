//! Indexed triangle/quad faces.
//!
//! A face stores vertex indices (positions in the owning geometry's vertex
//! buffer, never references into it) plus its derived shading attributes.
//! Per-corner attributes live in fixed-size arrays next to the indices, so a
//! triangle always has three corner normals and a quad always has four.

use crate::math::{Color, Vec3, Vec4};

/// Per-corner data for a face with `N` corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners<const N: usize> {
    /// Vertex indices, in winding order.
    pub indices: [usize; N],
    /// Smoothed vertex normal at each corner.
    pub normals: [Vec3; N],
    /// Tangent at each corner; `w` is the bitangent handedness (±1).
    pub tangents: [Vec4; N],
    /// Vertex color at each corner.
    pub colors: [Color; N],
}

impl<const N: usize> Corners<N> {
    fn new(indices: [usize; N]) -> Self {
        Self {
            indices,
            normals: [Vec3::zeros(); N],
            tangents: [Vec4::zeros(); N],
            colors: [Color::WHITE; N],
        }
    }
}

/// The two face shapes the kernel understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceCorners {
    /// Corners `(a, b, c)`.
    Triangle(Corners<3>),
    /// Corners `(a, b, c, d)`. The order is fixed and matches the face's UVs.
    Quad(Corners<4>),
}

macro_rules! each_shape {
    ($corners:expr, $c:ident => $body:expr) => {
        match $corners {
            FaceCorners::Triangle($c) => $body,
            FaceCorners::Quad($c) => $body,
        }
    };
}

/// A triangle or quad in a [`Geometry`](super::Geometry).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Shape, indices and per-corner attributes.
    pub corners: FaceCorners,
    /// Unit face normal, or zero for a degenerate face.
    pub normal: Vec3,
    /// Average of the corner positions.
    pub centroid: Vec3,
    /// Flat face color.
    pub color: Color,
    /// Index into the material list of the mesh that renders this geometry.
    pub material_index: usize,
    has_vertex_normals: bool,
}

impl Face {
    /// Create a triangle `(a, b, c)` with zeroed derived attributes.
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self::from_corners(FaceCorners::Triangle(Corners::new([a, b, c])))
    }

    /// Create a quad `(a, b, c, d)` with zeroed derived attributes.
    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self::from_corners(FaceCorners::Quad(Corners::new([a, b, c, d])))
    }

    fn from_corners(corners: FaceCorners) -> Self {
        Self {
            corners,
            normal: Vec3::zeros(),
            centroid: Vec3::zeros(),
            color: Color::WHITE,
            material_index: 0,
            has_vertex_normals: false,
        }
    }

    /// Set the face normal.
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    /// Set the per-corner vertex normals.
    ///
    /// # Panics
    ///
    /// Panics if `normals.len()` differs from [`corner_count`](Self::corner_count).
    pub fn with_vertex_normals(mut self, normals: &[Vec3]) -> Self {
        self.vertex_normals_mut().copy_from_slice(normals);
        self
    }

    /// Set the flat face color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the material index.
    pub fn with_material_index(mut self, index: usize) -> Self {
        self.material_index = index;
        self
    }

    pub fn is_quad(&self) -> bool {
        matches!(self.corners, FaceCorners::Quad(_))
    }

    /// 3 for a triangle, 4 for a quad.
    pub fn corner_count(&self) -> usize {
        self.indices().len()
    }

    pub fn indices(&self) -> &[usize] {
        each_shape!(&self.corners, c => &c.indices[..])
    }

    pub fn indices_mut(&mut self) -> &mut [usize] {
        each_shape!(&mut self.corners, c => &mut c.indices[..])
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        each_shape!(&self.corners, c => &c.normals[..])
    }

    /// Mutable corner normals. Marks the face as carrying vertex normals.
    pub fn vertex_normals_mut(&mut self) -> &mut [Vec3] {
        self.has_vertex_normals = true;
        each_shape!(&mut self.corners, c => &mut c.normals[..])
    }

    /// Whether corner normals have been assigned, even if they are zero.
    pub fn has_vertex_normals(&self) -> bool {
        self.has_vertex_normals
    }

    /// Zero the corner normals and mark them as unassigned.
    pub fn clear_vertex_normals(&mut self) {
        each_shape!(&mut self.corners, c => c.normals.fill(Vec3::zeros()));
        self.has_vertex_normals = false;
    }

    pub fn vertex_tangents(&self) -> &[Vec4] {
        each_shape!(&self.corners, c => &c.tangents[..])
    }

    pub fn vertex_tangents_mut(&mut self) -> &mut [Vec4] {
        each_shape!(&mut self.corners, c => &mut c.tangents[..])
    }

    pub fn vertex_colors(&self) -> &[Color] {
        each_shape!(&self.corners, c => &c.colors[..])
    }

    pub fn vertex_colors_mut(&mut self) -> &mut [Color] {
        each_shape!(&mut self.corners, c => &mut c.colors[..])
    }

    /// Turn a quad into a triangle by removing corner `drop` (1..=3).
    ///
    /// The remaining corners keep their relative order and attributes. Face
    /// level attributes are untouched. Returns `false` (and does nothing) for
    /// a triangle or an out-of-range corner.
    pub fn demote_to_triangle(&mut self, drop: usize) -> bool {
        let FaceCorners::Quad(quad) = self.corners else {
            return false;
        };
        if drop >= 4 {
            return false;
        }
        let keep = |i: usize| if i < drop { i } else { i + 1 };
        let pick = [keep(0), keep(1), keep(2)];
        self.corners = FaceCorners::Triangle(Corners {
            indices: pick.map(|i| quad.indices[i]),
            normals: pick.map(|i| quad.normals[i]),
            tangents: pick.map(|i| quad.tangents[i]),
            colors: pick.map(|i| quad.colors[i]),
        });
        true
    }
}
