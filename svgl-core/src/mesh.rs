//! Meshes: raw geometry, transform, material and lazily derived world-space geometry.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use log::{debug, warn};
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Rgb;
use crate::error::{Result, SvglError};
use crate::math::{normalize_or_zero, point_at, transform_point, Transform};

/// Opaque unique identifier of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(Uuid);

impl MeshId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MeshId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for MeshId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// How a mesh is turned into primitives. Numeric codes are stable; code 1
/// is reserved and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    #[default]
    PointCloud = 0,
    Wireframe = 2,
    WireframeRandomSub = 3,
    FaceOpaquePlain = 4,
    DebugGeometry = 5,
    FaceLight = 6,
}

impl RenderMode {
    pub const ALL: [RenderMode; 6] = [
        RenderMode::PointCloud,
        RenderMode::Wireframe,
        RenderMode::WireframeRandomSub,
        RenderMode::FaceOpaquePlain,
        RenderMode::DebugGeometry,
        RenderMode::FaceLight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::PointCloud => "point-cloud",
            RenderMode::Wireframe => "wireframe",
            RenderMode::WireframeRandomSub => "wireframe-random-sub",
            RenderMode::FaceOpaquePlain => "face-opaque-plain",
            RenderMode::DebugGeometry => "debug-geometry",
            RenderMode::FaceLight => "face-light",
        }
    }

    /// Whether the mode reads `faces` rather than just vertices or edges.
    pub fn uses_faces(self) -> bool {
        matches!(
            self,
            RenderMode::FaceOpaquePlain | RenderMode::DebugGeometry | RenderMode::FaceLight
        )
    }
}

impl TryFrom<u8> for RenderMode {
    type Error = SvglError;

    fn try_from(code: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| *mode as u8 == code)
            .ok_or_else(|| SvglError::InvalidRenderMode(code.to_string()))
    }
}

/// Accepts `face-light`, `face_light` or `FACE_LIGHT`.
impl FromStr for RenderMode {
    type Err = SvglError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| SvglError::InvalidRenderMode(s.to_string()))
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
    pub center: Point3<f32>,
}

impl BoundingBox {
    fn empty() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
            center: Point3::origin(),
        }
    }

    /// The eight corners, A to H:
    ///
    /// ```text
    ///       H +----------+ G (max)
    ///        /|         /|
    ///     E +----------+ F|
    ///       | D + - - -|-+ C
    ///       |/         |/
    /// (min) A +--------+ B
    /// ```
    pub fn corners(&self) -> [Point3<f32>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
        ]
    }

    /// Corner index pairs forming the 12 box edges.
    pub const EDGES: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (0, 4), (1, 5), (2, 6), (3, 7),
        (4, 5), (5, 6), (6, 7), (7, 4),
    ];
}

/// Appearance of a mesh. Colors keep a display-ready CSS string next to the
/// RGB value; both are only changed together through the mesh setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    render_mode: RenderMode,
    edge_color: Rgb,
    edge_color_css: String,
    face_color: Rgb,
    face_color_css: String,
    opacity: f32,
    line_thickness: f32,
    radius: f32,
    specularity: f32,
    show_bounding_box: bool,
}

impl Default for Material {
    fn default() -> Self {
        let edge_color = Rgb::BLACK;
        let face_color = Rgb::new(200.0, 200.0, 200.0);
        Self {
            render_mode: RenderMode::PointCloud,
            edge_color,
            edge_color_css: edge_color.to_css(),
            face_color,
            face_color_css: face_color.to_css(),
            opacity: 1.0,
            line_thickness: 1.0,
            radius: 1.0,
            specularity: 0.0,
            show_bounding_box: false,
        }
    }
}

impl Material {
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn edge_color(&self) -> Rgb {
        self.edge_color
    }

    pub fn edge_color_css(&self) -> &str {
        &self.edge_color_css
    }

    pub fn face_color(&self) -> Rgb {
        self.face_color
    }

    pub fn face_color_css(&self) -> &str {
        &self.face_color_css
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn line_thickness(&self) -> f32 {
        self.line_thickness
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn specularity(&self) -> f32 {
        self.specularity
    }

    pub fn show_bounding_box(&self) -> bool {
        self.show_bounding_box
    }
}

bitflags! {
    /// One bit per derived quantity that must be rebuilt before its next read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Dirty: u8 {
        const WORLD_VERTICES = 1 << 0;
        const BOUNDING_BOX = 1 << 1;
        const FACE_NORMALS = 1 << 2;
        const FACE_CENTERS = 1 << 3;
    }
}

/// Geometry in plain arrays, as produced by the OBJ and STL importers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub faces: Vec<u32>,
    pub vertices_per_face: usize,
    pub normals: Option<Vec<f32>>,
}

/// Borrowed view of face geometry, all fresh.
#[derive(Debug, Clone, Copy)]
pub struct FaceGeometry<'a> {
    pub world_vertices: &'a [f32],
    pub faces: &'a [u32],
    pub vertices_per_face: usize,
    pub normals: &'a [f32],
    pub centers: &'a [f32],
}

impl FaceGeometry<'_> {
    pub fn nb_faces(&self) -> usize {
        self.faces.len() / self.vertices_per_face
    }
}

/// Borrowed view of the edge list and the world vertices it indexes.
#[derive(Debug, Clone, Copy)]
pub struct EdgeGeometry<'a> {
    pub world_vertices: &'a [f32],
    /// Flat pairs of vertex indices.
    pub unique_edges: &'a [u32],
}

/// A triangle (or polygon) mesh with a transform and a material.
///
/// World vertices, bounding box, face normals and face centers are derived
/// from the local geometry and the model matrix. Each has a dirty bit; the
/// accessors rebuild what is stale, world vertices first.
#[derive(Debug)]
pub struct Mesh {
    id: MeshId,
    visible: bool,

    vertices: Option<Vec<f32>>,
    faces: Option<Vec<u32>>,
    vertices_per_face: usize,

    position: Vector3<f32>,
    quaternion: UnitQuaternion<f32>,
    scale: Vector3<f32>,
    model_matrix: Matrix4<f32>,

    material: Material,

    world_vertices: Vec<f32>,
    bounding_box: BoundingBox,
    face_normals_world: Vec<f32>,
    face_centers_world: Vec<f32>,
    // Memoized on first read, not invalidated by `set_faces`.
    unique_edges: Option<Vec<u32>>,
    dirty: Dirty,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            id: MeshId::new(),
            visible: true,
            vertices: None,
            faces: None,
            vertices_per_face: 3,
            position: Vector3::zeros(),
            quaternion: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            model_matrix: Matrix4::identity(),
            material: Material::default(),
            world_vertices: Vec::new(),
            bounding_box: BoundingBox::empty(),
            face_normals_world: Vec::new(),
            face_centers_world: Vec::new(),
            unique_edges: None,
            dirty: Dirty::all(),
        }
    }

    /// Build a mesh from importer output.
    pub fn from_data(data: MeshData) -> Result<Self> {
        let mut mesh = Self::new();
        mesh.set_vertices(data.vertices)?;
        if !data.faces.is_empty() {
            mesh.set_vertices_per_face(data.vertices_per_face)?;
            mesh.set_faces(data.faces)?;
        }
        Ok(mesh)
    }

    /// An axis-aligned cube centered on the origin: 8 vertices and 12
    /// counter-clockwise triangles (normals point outward).
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        #[rustfmt::skip]
        let vertices = vec![
            -h, -h, -h,
             h, -h, -h,
             h,  h, -h,
            -h,  h, -h,
            -h, -h,  h,
             h, -h,  h,
             h,  h,  h,
            -h,  h,  h,
        ];
        #[rustfmt::skip]
        let faces = vec![
            4, 5, 6,  4, 6, 7, // front (+z)
            0, 3, 2,  0, 2, 1, // back (-z)
            3, 7, 6,  3, 6, 2, // top (+y)
            0, 1, 5,  0, 5, 4, // bottom (-y)
            1, 2, 6,  1, 6, 5, // right (+x)
            0, 4, 7,  0, 7, 3, // left (-x)
        ];

        let mut mesh = Self::new();
        mesh.vertices = Some(vertices);
        mesh.faces = Some(faces);
        mesh.world_vertices = vec![0.0; 24];
        mesh
    }

    pub fn id(&self) -> MeshId {
        self.id
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // --- raw geometry ---

    pub fn vertices(&self) -> Option<&[f32]> {
        self.vertices.as_deref()
    }

    /// Replace the local vertex positions (flat xyz triples).
    pub fn set_vertices(&mut self, vertices: Vec<f32>) -> Result<()> {
        if vertices.len() % 3 != 0 {
            return Err(SvglError::InvalidVertexCount(vertices.len()));
        }

        self.world_vertices.clear();
        self.world_vertices.resize(vertices.len(), 0.0);
        self.vertices = Some(vertices);
        self.dirty |= Dirty::all();
        Ok(())
    }

    pub fn nb_vertices(&self) -> usize {
        self.vertices.as_ref().map_or(0, |v| v.len() / 3)
    }

    pub fn faces(&self) -> Option<&[u32]> {
        self.faces.as_deref()
    }

    /// Replace the face index list. Its length must be a multiple of
    /// [`Mesh::vertices_per_face`], so set that first for non-triangle faces.
    pub fn set_faces(&mut self, faces: Vec<u32>) -> Result<()> {
        if faces.len() % self.vertices_per_face != 0 {
            return Err(SvglError::InvalidFaceCount {
                len: faces.len(),
                per_face: self.vertices_per_face,
            });
        }

        self.faces = Some(faces);
        self.dirty |= Dirty::FACE_NORMALS | Dirty::FACE_CENTERS;
        Ok(())
    }

    pub fn nb_faces(&self) -> usize {
        self.faces.as_ref().map_or(0, |f| f.len() / self.vertices_per_face)
    }

    pub fn vertices_per_face(&self) -> usize {
        self.vertices_per_face
    }

    pub fn set_vertices_per_face(&mut self, vertices_per_face: usize) -> Result<()> {
        if vertices_per_face < 3 {
            return Err(SvglError::InvalidVerticesPerFace(vertices_per_face));
        }
        if let Some(faces) = &self.faces {
            if faces.len() % vertices_per_face != 0 {
                return Err(SvglError::InvalidFaceCount {
                    len: faces.len(),
                    per_face: vertices_per_face,
                });
            }
        }

        self.vertices_per_face = vertices_per_face;
        self.dirty |= Dirty::FACE_NORMALS | Dirty::FACE_CENTERS;
        Ok(())
    }

    // --- transform ---

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.update_matrix();
    }

    pub fn quaternion(&self) -> UnitQuaternion<f32> {
        self.quaternion
    }

    pub fn set_quaternion(&mut self, quaternion: UnitQuaternion<f32>) {
        self.quaternion = quaternion;
        self.update_matrix();
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.update_matrix();
    }

    /// Euler angles in degrees, applied X first, then Y, then Z.
    pub fn set_rotation_from_euler_degrees(&mut self, x: f32, y: f32, z: f32) {
        self.quaternion =
            UnitQuaternion::from_euler_angles(x.to_radians(), y.to_radians(), z.to_radians());
        self.update_matrix();
    }

    pub fn model_matrix(&self) -> &Matrix4<f32> {
        &self.model_matrix
    }

    /// Rebuild the model matrix from position, quaternion and scale.
    pub fn update_matrix(&mut self) {
        self.model_matrix = Transform::model_matrix(&self.position, &self.quaternion, &self.scale);
        self.dirty |= Dirty::all();
    }

    // --- material ---

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn render_mode(&self) -> RenderMode {
        self.material.render_mode
    }

    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.material.render_mode = render_mode;
    }

    /// Set the render mode from its numeric code, rejecting unknown codes.
    pub fn set_render_mode_code(&mut self, code: u8) -> Result<()> {
        self.material.render_mode = RenderMode::try_from(code)?;
        Ok(())
    }

    pub fn set_edge_color(&mut self, color: Rgb) {
        self.material.edge_color = color;
        self.material.edge_color_css = color.to_css();
    }

    pub fn set_face_color(&mut self, color: Rgb) {
        self.material.face_color = color;
        self.material.face_color_css = color.to_css();
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.material.opacity = opacity;
    }

    pub fn set_line_thickness(&mut self, thickness: f32) {
        self.material.line_thickness = thickness;
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.material.radius = radius;
    }

    /// 0 disables the specular term.
    pub fn set_specularity(&mut self, specularity: f32) {
        self.material.specularity = specularity;
    }

    pub fn set_show_bounding_box(&mut self, show: bool) {
        self.material.show_bounding_box = show;
    }

    // --- derived geometry ---

    /// Vertices transformed by the model matrix. Empty while no vertices are set.
    pub fn world_vertices(&mut self) -> &[f32] {
        if self.dirty.contains(Dirty::WORLD_VERTICES) {
            self.compute_world_vertices();
        }
        &self.world_vertices
    }

    pub fn bounding_box(&mut self) -> Result<BoundingBox> {
        self.freshen(Dirty::BOUNDING_BOX)?;
        Ok(self.bounding_box)
    }

    /// One unit normal per face, flat xyz.
    pub fn face_normals_world(&mut self) -> Result<&[f32]> {
        self.freshen(Dirty::FACE_NORMALS)?;
        Ok(&self.face_normals_world)
    }

    /// One centroid per face, flat xyz.
    pub fn face_centers_world(&mut self) -> Result<&[f32]> {
        self.freshen(Dirty::FACE_CENTERS)?;
        Ok(&self.face_centers_world)
    }

    /// Deduplicated undirected edges as flat index pairs `(low, high)`.
    pub fn unique_edges(&mut self) -> Result<&[u32]> {
        if self.unique_edges.is_none() {
            self.unique_edges = Some(self.compute_unique_edges()?);
        }
        Ok(self.unique_edges.as_deref().unwrap_or_default())
    }

    /// Everything the face-based rasterizers read, freshened in one step.
    pub fn face_geometry(&mut self) -> Result<FaceGeometry<'_>> {
        self.freshen(Dirty::FACE_NORMALS | Dirty::FACE_CENTERS)?;
        let faces = self.faces.as_deref().ok_or(SvglError::MissingFaces)?;
        Ok(FaceGeometry {
            world_vertices: &self.world_vertices,
            faces,
            vertices_per_face: self.vertices_per_face,
            normals: &self.face_normals_world,
            centers: &self.face_centers_world,
        })
    }

    /// Unique edges together with fresh world vertices.
    pub fn edge_geometry(&mut self) -> Result<EdgeGeometry<'_>> {
        if self.unique_edges.is_none() {
            self.unique_edges = Some(self.compute_unique_edges()?);
        }
        if let Some(&index) = self
            .unique_edges
            .iter()
            .flatten()
            .find(|&&i| i as usize >= self.nb_vertices())
        {
            return Err(SvglError::FaceIndexOutOfRange {
                index,
                nb_vertices: self.nb_vertices(),
            });
        }
        self.freshen(Dirty::WORLD_VERTICES)?;
        Ok(EdgeGeometry {
            world_vertices: &self.world_vertices,
            unique_edges: self.unique_edges.as_deref().unwrap_or_default(),
        })
    }

    /// Rebuild every stale node in `wanted`, world vertices first since all
    /// the others read them. Preconditions are checked before anything changes.
    fn freshen(&mut self, wanted: Dirty) -> Result<()> {
        let stale = self.dirty & wanted;
        if stale.is_empty() {
            return Ok(());
        }

        if stale.contains(Dirty::BOUNDING_BOX) && self.nb_vertices() == 0 {
            return Err(SvglError::MissingVertices);
        }
        if stale.intersects(Dirty::FACE_NORMALS | Dirty::FACE_CENTERS) {
            self.check_face_indices()?;
        }

        if self.dirty.contains(Dirty::WORLD_VERTICES) {
            self.compute_world_vertices();
        }
        if stale.contains(Dirty::BOUNDING_BOX) {
            self.compute_bounding_box();
        }
        if stale.contains(Dirty::FACE_NORMALS) {
            self.compute_face_normals();
        }
        if stale.contains(Dirty::FACE_CENTERS) {
            self.compute_face_centers();
        }
        Ok(())
    }

    fn check_face_indices(&self) -> Result<()> {
        let faces = self.faces.as_ref().ok_or(SvglError::MissingFaces)?;
        let nb_vertices = self.nb_vertices();
        match faces.iter().find(|&&i| i as usize >= nb_vertices) {
            Some(&index) => Err(SvglError::FaceIndexOutOfRange { index, nb_vertices }),
            None => Ok(()),
        }
    }

    fn compute_world_vertices(&mut self) {
        let vertices = self.vertices.as_deref().unwrap_or_default();
        self.world_vertices.resize(vertices.len(), 0.0);

        for (local, world) in vertices
            .chunks_exact(3)
            .zip(self.world_vertices.chunks_exact_mut(3))
        {
            let p = transform_point(&self.model_matrix, &Point3::new(local[0], local[1], local[2]));
            world.copy_from_slice(&[p.x, p.y, p.z]);
        }

        debug!("mesh {}: rebuilt {} world vertices", self.id, vertices.len() / 3);
        self.dirty.remove(Dirty::WORLD_VERTICES);
    }

    fn compute_bounding_box(&mut self) {
        let mut min = Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);

        for v in self.world_vertices.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }

        self.bounding_box = BoundingBox {
            min,
            max,
            center: nalgebra::center(&min, &max),
        };
        self.dirty.remove(Dirty::BOUNDING_BOX);
    }

    fn compute_face_normals(&mut self) {
        let faces = self.faces.as_deref().unwrap_or_default();
        let vpf = self.vertices_per_face;
        let wv = &self.world_vertices;
        let mut degenerate = 0usize;

        self.face_normals_world.clear();
        for face in faces.chunks_exact(vpf) {
            let a = point_at(wv, face[0] as usize);
            let b = point_at(wv, face[1] as usize);
            let c = point_at(wv, face[2] as usize);

            let ab = normalize_or_zero(&(b - a));
            let bc = normalize_or_zero(&(c - b));
            let n = normalize_or_zero(&ab.cross(&bc));
            if n == Vector3::zeros() {
                degenerate += 1;
            }
            self.face_normals_world.extend_from_slice(&[n.x, n.y, n.z]);
        }

        if degenerate > 0 {
            warn!("mesh {}: {} degenerate faces have a zero normal", self.id, degenerate);
        }
        self.dirty.remove(Dirty::FACE_NORMALS);
    }

    fn compute_face_centers(&mut self) {
        let faces = self.faces.as_deref().unwrap_or_default();
        let vpf = self.vertices_per_face;
        let wv = &self.world_vertices;

        self.face_centers_world.clear();
        for face in faces.chunks_exact(vpf) {
            let sum = face
                .iter()
                .fold(Vector3::zeros(), |acc, &i| acc + point_at(wv, i as usize).coords);
            let center = sum / vpf as f32;
            self.face_centers_world.extend_from_slice(&[center.x, center.y, center.z]);
        }

        self.dirty.remove(Dirty::FACE_CENTERS);
    }

    /// Consecutive vertex pairs of each face, without the closing pair from
    /// the last vertex back to the first.
    fn compute_unique_edges(&self) -> Result<Vec<u32>> {
        let faces = self.faces.as_ref().ok_or(SvglError::MissingFaces)?;

        let mut pairs: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        for face in faces.chunks_exact(self.vertices_per_face) {
            for pair in face.windows(2) {
                let (low, high) = if pair[0] < pair[1] {
                    (pair[0], pair[1])
                } else {
                    (pair[1], pair[0])
                };
                pairs.entry(low).or_default().insert(high);
            }
        }

        let edges: Vec<u32> = pairs
            .into_iter()
            .flat_map(|(low, highs)| highs.into_iter().flat_map(move |high| [low, high]))
            .collect();
        debug!("mesh {}: {} unique edges", self.id, edges.len() / 2);
        Ok(edges)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy of geometry, transform and material. The copy gets a fresh id
/// and shares no state with the source mesh.
impl Clone for Mesh {
    fn clone(&self) -> Self {
        let mut copy = Mesh::new();
        copy.visible = self.visible;
        copy.vertices = self.vertices.clone();
        copy.world_vertices = vec![0.0; self.world_vertices.len()];
        copy.faces = self.faces.clone();
        copy.vertices_per_face = self.vertices_per_face;
        copy.position = self.position;
        copy.quaternion = self.quaternion;
        copy.scale = self.scale;
        copy.material = self.material.clone();
        copy.update_matrix();
        copy
    }
}
