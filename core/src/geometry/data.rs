//! Geometry store.
//!
//! This module provides:
//! - [`Geometry`] - owner of the vertex arena, faces, UV layers, morph and
//!   skin buffers, and derived bounds
//! - [`MorphTarget`], [`MorphColor`], [`MorphNormals`] - blend shape data
//! - [`NeedsUpdate`] - flags telling a renderer which buffers went stale

use bitflags::bitflags;

use crate::error::{GeometryError, GeometryResult, VertexBuffer};
use crate::math::{Color, Uv, Vec3, Vec4};

use super::bounds::{BoundingBox, BoundingSphere};
use super::face::Face;
use super::scratch::Workspace;

bitflags! {
    /// Buffers modified since a consumer last cleared the flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NeedsUpdate: u32 {
        /// Vertex positions changed.
        const VERTICES = 1 << 0;
        /// Face indices or face shapes changed.
        const ELEMENTS = 1 << 1;
        /// UV layers changed.
        const UVS = 1 << 2;
        /// Face or vertex normals changed.
        const NORMALS = 1 << 3;
        /// Vertex tangents changed.
        const TANGENTS = 1 << 4;
        /// Vertex or face colors changed.
        const COLORS = 1 << 5;
        /// Morph targets or the morph normal cache changed.
        const MORPH_TARGETS = 1 << 6;
    }
}

/// Alternate vertex positions for blend-shape deformation.
///
/// `vertices` matches the base vertex buffer in length and order.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphTarget {
    pub name: String,
    pub vertices: Vec<Vec3>,
}

impl MorphTarget {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }
}

/// Alternate colors for blend-shape deformation.
///
/// `colors` matches either the face list or the vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphColor {
    pub name: String,
    pub colors: Vec<Color>,
}

/// Normals of the mesh when deformed to one morph target.
///
/// Both lists are index-aligned with the face list; `vertex_normals[f]` holds
/// one normal per corner of face `f`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MorphNormals {
    pub face_normals: Vec<Vec3>,
    pub vertex_normals: Vec<Vec<Vec3>>,
}

/// CPU-side mesh geometry.
///
/// Vertices live in a single arena; faces, skin buffers, colors and morph
/// targets refer to them by index and must stay aligned with it. The kernel
/// passes ([`compute_face_normals`](Self::compute_face_normals),
/// [`compute_vertex_normals`](Self::compute_vertex_normals),
/// [`compute_tangents`](Self::compute_tangents), ...) mutate the store in
/// place and report [`GeometryError`] before touching anything when an
/// index or buffer length is broken.
///
/// # Example
///
/// ```
/// use facet_core::geometry::{Face, Geometry};
/// use facet_core::math::Vec3;
///
/// let mut geometry = Geometry::new()
///     .with_vertices(vec![
///         Vec3::new(0.0, 0.0, 0.0),
///         Vec3::new(1.0, 0.0, 0.0),
///         Vec3::new(0.0, 1.0, 0.0),
///     ])
///     .with_faces(vec![Face::triangle(0, 1, 2)]);
///
/// geometry.compute_face_normals(false).unwrap();
/// geometry.compute_vertex_normals().unwrap();
/// assert!((geometry.faces()[0].normal.norm() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Geometry {
    pub(crate) vertices: Vec<Vec3>,
    pub(crate) colors: Vec<Color>,
    pub(crate) faces: Vec<Face>,
    pub(crate) face_vertex_uvs: Vec<Vec<Vec<Uv>>>,
    pub(crate) morph_targets: Vec<MorphTarget>,
    pub(crate) morph_colors: Vec<MorphColor>,
    pub(crate) morph_normals: Vec<MorphNormals>,
    pub(crate) skin_weights: Vec<Vec4>,
    pub(crate) skin_indices: Vec<Vec4>,
    pub(crate) bounding_box: Option<BoundingBox>,
    pub(crate) bounding_sphere: Option<BoundingSphere>,
    pub(crate) has_tangents: bool,
    pub(crate) dynamic: bool,
    pub(crate) needs_update: NeedsUpdate,
    pub(crate) workspace: Workspace,
    label: Option<String>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    /// Create an empty geometry with a single (empty) UV layer.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            colors: Vec::new(),
            faces: Vec::new(),
            face_vertex_uvs: vec![Vec::new()],
            morph_targets: Vec::new(),
            morph_colors: Vec::new(),
            morph_normals: Vec::new(),
            skin_weights: Vec::new(),
            skin_indices: Vec::new(),
            bounding_box: None,
            bounding_sphere: None,
            has_tangents: false,
            dynamic: false,
            needs_update: NeedsUpdate::empty(),
            workspace: Workspace::new(),
            label: None,
        }
    }

    /// Set the vertex buffer.
    pub fn with_vertices(mut self, vertices: Vec<Vec3>) -> Self {
        self.set_vertices(vertices);
        self
    }

    /// Set the face list.
    pub fn with_faces(mut self, faces: Vec<Face>) -> Self {
        self.faces = faces;
        self.needs_update |= NeedsUpdate::ELEMENTS;
        self
    }

    /// Replace UV layer `layer`, creating empty layers before it as needed.
    pub fn with_uv_layer(mut self, layer: usize, uvs: Vec<Vec<Uv>>) -> Self {
        if self.face_vertex_uvs.len() <= layer {
            self.face_vertex_uvs.resize_with(layer + 1, Vec::new);
        }
        self.face_vertex_uvs[layer] = uvs;
        self.needs_update |= NeedsUpdate::UVS;
        self
    }

    /// Set the per-vertex color buffer.
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self.needs_update |= NeedsUpdate::COLORS;
        self
    }

    /// Set the skin weight and skin index buffers.
    pub fn with_skin(mut self, weights: Vec<Vec4>, indices: Vec<Vec4>) -> Self {
        self.skin_weights = weights;
        self.skin_indices = indices;
        self
    }

    /// Append a morph target.
    pub fn with_morph_target(mut self, target: MorphTarget) -> Self {
        self.push_morph_target(target);
        self
    }

    /// Mark the geometry as deforming at runtime.
    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Mutable vertex positions, e.g. for CPU deformation.
    ///
    /// The buffer length cannot change through this slice.
    pub fn vertices_mut(&mut self) -> &mut [Vec3] {
        self.needs_update |= NeedsUpdate::VERTICES;
        &mut self.vertices
    }

    /// Replace the vertex buffer. Index-aligned buffers are left as they are;
    /// keeping them aligned is the caller's job.
    pub fn set_vertices(&mut self, vertices: Vec<Vec3>) {
        self.vertices = vertices;
        self.needs_update |= NeedsUpdate::VERTICES;
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Vec3) -> usize {
        self.vertices.push(position);
        self.needs_update |= NeedsUpdate::VERTICES;
        self.vertices.len() - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut [Face] {
        self.needs_update |= NeedsUpdate::ELEMENTS;
        &mut self.faces
    }

    /// Append a face and return its index.
    pub fn push_face(&mut self, face: Face) -> usize {
        self.faces.push(face);
        self.needs_update |= NeedsUpdate::ELEMENTS;
        self.faces.len() - 1
    }

    /// Append a face together with its layer-0 UVs.
    ///
    /// Every other non-empty UV layer gets zeroed UVs for the new face so it
    /// stays aligned with the face list.
    pub fn push_face_with_uvs(&mut self, face: Face, uvs: Vec<Uv>) -> usize {
        self.face_vertex_uvs[0].push(uvs);
        for layer in self.face_vertex_uvs.iter_mut().skip(1) {
            if !layer.is_empty() {
                layer.push(vec![Uv::zeros(); face.corner_count()]);
            }
        }
        self.needs_update |= NeedsUpdate::UVS;
        self.push_face(face)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// All UV layers; `uv_layers()[layer][face][corner]`.
    pub fn uv_layers(&self) -> &[Vec<Vec<Uv>>] {
        &self.face_vertex_uvs
    }

    /// UV layer `layer`, if present.
    pub fn uv_layer(&self, layer: usize) -> Option<&[Vec<Uv>]> {
        self.face_vertex_uvs.get(layer).map(|l| l.as_slice())
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut Vec<Color> {
        self.needs_update |= NeedsUpdate::COLORS;
        &mut self.colors
    }

    pub fn skin_weights(&self) -> &[Vec4] {
        &self.skin_weights
    }

    pub fn skin_indices(&self) -> &[Vec4] {
        &self.skin_indices
    }

    pub fn morph_targets(&self) -> &[MorphTarget] {
        &self.morph_targets
    }

    pub fn push_morph_target(&mut self, target: MorphTarget) {
        self.morph_targets.push(target);
        self.needs_update |= NeedsUpdate::MORPH_TARGETS;
    }

    pub fn morph_colors(&self) -> &[MorphColor] {
        &self.morph_colors
    }

    pub fn push_morph_color(&mut self, color: MorphColor) {
        self.morph_colors.push(color);
        self.needs_update |= NeedsUpdate::COLORS;
    }

    /// Morph normal cache, one entry per morph target processed so far.
    pub fn morph_normals(&self) -> &[MorphNormals] {
        &self.morph_normals
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    pub fn bounding_sphere(&self) -> Option<&BoundingSphere> {
        self.bounding_sphere.as_ref()
    }

    /// Whether [`compute_tangents`](Self::compute_tangents) has run.
    pub fn has_tangents(&self) -> bool {
        self.has_tangents
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Buffers changed since the last [`clear_needs_update`](Self::clear_needs_update).
    pub fn needs_update(&self) -> NeedsUpdate {
        self.needs_update
    }

    /// Clear the given flags after their buffers have been consumed.
    pub fn clear_needs_update(&mut self, flags: NeedsUpdate) {
        self.needs_update.remove(flags);
    }

    /// Scratch buffers reused by the normal and tangent passes.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Check that every face corner references an existing vertex.
    pub fn validate_faces(&self) -> GeometryResult<()> {
        check_face_indices(&self.faces, self.vertices.len())
    }

    /// Check that UV layer `layer` has one entry per face, each with one
    /// coordinate per corner.
    pub fn validate_uv_layer(&self, layer: usize) -> GeometryResult<()> {
        let uvs = self
            .face_vertex_uvs
            .get(layer)
            .ok_or(GeometryError::MissingUvLayer(layer))?;
        for (face_index, face) in self.faces.iter().enumerate() {
            let entry = uvs.get(face_index).ok_or(GeometryError::MissingFaceUvs {
                layer,
                face: face_index,
            })?;
            if entry.len() != face.corner_count() {
                return Err(GeometryError::FaceUvCount {
                    layer,
                    face: face_index,
                    expected: face.corner_count(),
                    found: entry.len(),
                });
            }
        }
        Ok(())
    }

    /// Check that every morph target matches the vertex buffer length.
    pub fn validate_morph_targets(&self) -> GeometryResult<()> {
        let expected = self.vertices.len();
        for (target, morph) in self.morph_targets.iter().enumerate() {
            if morph.vertices.len() != expected {
                return Err(GeometryError::MorphTargetLength {
                    target,
                    name: morph.name.clone(),
                    expected,
                    found: morph.vertices.len(),
                });
            }
        }
        Ok(())
    }

    /// Check every buffer invariant: face indices, non-empty UV layers,
    /// morph targets, and the optional per-vertex buffers (empty or aligned).
    pub fn validate(&self) -> GeometryResult<()> {
        self.validate_faces()?;
        for (layer, uvs) in self.face_vertex_uvs.iter().enumerate() {
            if !uvs.is_empty() {
                self.validate_uv_layer(layer)?;
            }
        }
        self.validate_morph_targets()?;
        let expected = self.vertices.len();
        for (buffer, found) in [
            (VertexBuffer::Colors, self.colors.len()),
            (VertexBuffer::SkinWeights, self.skin_weights.len()),
            (VertexBuffer::SkinIndices, self.skin_indices.len()),
        ] {
            if found != 0 && found != expected {
                return Err(GeometryError::BufferLength {
                    buffer,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Check that every corner of `faces` indexes into a buffer of `vertex_count`.
pub fn check_face_indices(faces: &[Face], vertex_count: usize) -> GeometryResult<()> {
    for (face_index, face) in faces.iter().enumerate() {
        for (corner, &index) in face.indices().iter().enumerate() {
            if index >= vertex_count {
                return Err(GeometryError::VertexIndexOutOfRange {
                    face: face_index,
                    corner,
                    index,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}
