//! Per-mode rasterizers: project a mesh's world-space geometry and emit SVG
//! primitives into its view.
use log::trace;
use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};
use rand::Rng;

use crate::color::Rgb;
use crate::error::Result;
use crate::light::{Light, LightInput};
use crate::math::{normalize_or_zero, point_at, transform_point};
use crate::mesh::{BoundingBox, Material, Mesh};
use crate::view::MeshView;

/// Most edges drawn by the random-subset wireframe.
pub const RANDOM_SUB_MAX_EDGES: usize = 750;
/// Fraction of the flat edge stream drawn by the random-subset wireframe.
pub const RANDOM_SUB_RATIO: f32 = 0.1;
/// Stroke of the bounding-box overlay.
pub const BOUNDING_BOX_THICKNESS: f32 = 0.33;
/// Stroke of debug polygons and normal ticks.
pub const DEBUG_THICKNESS: f32 = 0.3;
/// Radius of the face-center dot in debug mode.
pub const DEBUG_CENTER_RADIUS: f32 = 1.0;
/// World length of the debug normal tick.
pub const DEBUG_NORMAL_LENGTH: f32 = 0.2;
/// Screen-space push applied to lit face vertices so seams between faces close.
pub const FACE_SEAM_OFFSET: f32 = 0.25;

/// A point is outside the clip cube when any coordinate reaches ±1; the
/// boundary itself counts as outside.
#[inline]
pub fn is_outside_frustum(clip: &Point3<f32>) -> bool {
    clip.iter().any(|&c| c >= 1.0 || c <= -1.0)
}

/// Everything a rasterizer needs to know about the frame and the camera.
#[derive(Debug, Clone)]
pub struct Frame {
    /// World space to clip space (projection × view).
    pub clip_from_world: Matrix4<f32>,
    pub eye: Point3<f32>,
    pub field_of_view: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    /// World point to clip space, already divided by w.
    #[inline]
    pub fn project(&self, world: &Point3<f32>) -> Point3<f32> {
        transform_point(&self.clip_from_world, world)
    }

    /// Clip-space x/y in [-1, 1] to canvas pixels, origin top-left.
    #[inline]
    pub fn to_canvas(&self, clip: &Point3<f32>) -> Point2<f32> {
        Point2::new(
            (clip.x * self.width + self.width) * 0.5,
            self.height - (clip.y * self.height + self.height) * 0.5,
        )
    }

    /// On-screen size of a world length seen from `distance`.
    #[inline]
    pub fn perspective_size(&self, size: f32, distance: f32) -> f32 {
        size / ((self.field_of_view / 2.0).tan() * distance) * (self.height / 2.0)
    }
}

pub fn render_point_cloud(frame: &Frame, mesh: &mut Mesh, view: &mut MeshView) -> Result<()> {
    let material = mesh.material().clone();
    let vertices = mesh.world_vertices();

    for v in vertices.chunks_exact(3) {
        let world = Point3::new(v[0], v[1], v[2]);
        let clip = frame.project(&world);
        if is_outside_frustum(&clip) {
            continue;
        }

        let canvas = frame.to_canvas(&clip);
        let radius = frame.perspective_size(material.radius(), (world - frame.eye).norm());
        view.add_circle(canvas.x, canvas.y, radius, &material);
    }

    if material.show_bounding_box() {
        add_bounding_box(frame, &mesh.bounding_box()?, view, &material);
    }
    Ok(())
}

pub fn render_wireframe(frame: &Frame, mesh: &mut Mesh, view: &mut MeshView) -> Result<()> {
    let material = mesh.material().clone();
    let geometry = mesh.edge_geometry()?;
    let nb_edges = geometry.unique_edges.len() / 2;

    for edge in 0..nb_edges {
        add_edge(frame, geometry.world_vertices, geometry.unique_edges, edge, view, &material);
    }

    if material.show_bounding_box() {
        add_bounding_box(frame, &mesh.bounding_box()?, view, &material);
    }
    Ok(())
}

/// Wireframe over a random subset of distinct edges, at most
/// [`RANDOM_SUB_MAX_EDGES`].
pub fn render_wireframe_random_sub<R: Rng + ?Sized>(
    frame: &Frame,
    mesh: &mut Mesh,
    view: &mut MeshView,
    rng: &mut R,
) -> Result<()> {
    let material = mesh.material().clone();
    let geometry = mesh.edge_geometry()?;
    let nb_edges = geometry.unique_edges.len() / 2;
    let to_render = random_sub_count(geometry.unique_edges.len());

    for edge in rand::seq::index::sample(rng, nb_edges, to_render) {
        add_edge(frame, geometry.world_vertices, geometry.unique_edges, edge, view, &material);
    }
    trace!("random sub wireframe: {to_render} of {nb_edges} edges");

    if material.show_bounding_box() {
        add_bounding_box(frame, &mesh.bounding_box()?, view, &material);
    }
    Ok(())
}

/// Number of edges the random-subset wireframe visits for a flat edge stream
/// of `edge_stream_len` indices.
pub fn random_sub_count(edge_stream_len: usize) -> usize {
    let wanted = (RANDOM_SUB_MAX_EDGES as f32).min(edge_stream_len as f32 * RANDOM_SUB_RATIO);
    (wanted.ceil() as usize).min(edge_stream_len / 2)
}

fn add_edge(
    frame: &Frame,
    world_vertices: &[f32],
    unique_edges: &[u32],
    edge: usize,
    view: &mut MeshView,
    material: &Material,
) {
    let a = point_at(world_vertices, unique_edges[edge * 2] as usize);
    let b = point_at(world_vertices, unique_edges[edge * 2 + 1] as usize);
    let clip_a = frame.project(&a);
    let clip_b = frame.project(&b);

    // A segment with a single endpoint inside is drawn whole, unclipped.
    if is_outside_frustum(&clip_a) && is_outside_frustum(&clip_b) {
        return;
    }

    let middle = nalgebra::center(&a, &b);
    let thickness = frame.perspective_size(material.line_thickness(), (middle - frame.eye).norm());
    view.add_line(frame.to_canvas(&clip_a), frame.to_canvas(&clip_b), thickness, material);
}

/// The 12 box edges, A to H as in [`BoundingBox::corners`].
fn add_bounding_box(frame: &Frame, bb: &BoundingBox, view: &mut MeshView, material: &Material) {
    let corners = bb.corners().map(|c| frame.to_canvas(&frame.project(&c)));
    for (a, b) in BoundingBox::EDGES {
        view.add_line(corners[a], corners[b], BOUNDING_BOX_THICKNESS, material);
    }
}

/// A face that survived culling, waiting for the depth sort.
#[derive(Debug, Clone)]
struct ProjectedFace {
    points: Vec<Point2<f32>>,
    center: Point2<f32>,
    normal_tip: Point2<f32>,
    thickness: f32,
    color: Rgb,
    distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceStyle {
    OpaquePlain,
    Debug,
    Lit,
}

pub fn render_face_opaque_plain(frame: &Frame, mesh: &mut Mesh, view: &mut MeshView) -> Result<()> {
    let material = mesh.material().clone();
    let faces = collect_faces(frame, mesh, &material, FaceStyle::OpaquePlain, &[])?;
    for face in &faces {
        view.add_face_opaque_plain(&face.points, face.thickness, &material);
    }
    Ok(())
}

/// Faces without back-face culling, each with its center and normal drawn.
pub fn render_debug_geometry(frame: &Frame, mesh: &mut Mesh, view: &mut MeshView) -> Result<()> {
    let material = mesh.material().clone();
    let faces = collect_faces(frame, mesh, &material, FaceStyle::Debug, &[])?;
    for face in &faces {
        view.add_face_opaque_plain(&face.points, DEBUG_THICKNESS, &material);
        view.add_circle(face.center.x, face.center.y, DEBUG_CENTER_RADIUS, &material);
        view.add_line(face.center, face.normal_tip, DEBUG_THICKNESS, &material);
    }
    Ok(())
}

/// Faces filled with the sum of every light's contribution, no outline.
pub fn render_face_light(
    frame: &Frame,
    mesh: &mut Mesh,
    view: &mut MeshView,
    lights: &[Light],
) -> Result<()> {
    let material = mesh.material().clone();
    let faces = collect_faces(frame, mesh, &material, FaceStyle::Lit, lights)?;
    for face in &faces {
        view.add_face_color_no_stroke(&face.points, face.color, &material);
    }
    Ok(())
}

/// Move every point `offset` pixels away from the polygon's 2D centroid.
fn push_outward(points: &mut [Point2<f32>], offset: f32) {
    let centroid = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords)
        / points.len().max(1) as f32;
    for point in points.iter_mut() {
        let outward = (point.coords - centroid)
            .try_normalize(0.0)
            .unwrap_or_else(Vector2::zeros);
        *point += outward * offset;
    }
}

/// Shared traversal of the face modes: cull, project, light, then sort
/// farthest first.
fn collect_faces(
    frame: &Frame,
    mesh: &mut Mesh,
    material: &Material,
    style: FaceStyle,
    lights: &[Light],
) -> Result<Vec<ProjectedFace>> {
    let geometry = mesh.face_geometry()?;
    let vpf = geometry.vertices_per_face;
    let mut projected = Vec::with_capacity(geometry.nb_faces());
    let mut culled = 0usize;

    for (f, face) in geometry.faces.chunks_exact(vpf).enumerate() {
        let normal = Vector3::from_column_slice(&geometry.normals[f * 3..f * 3 + 3]);
        let center = point_at(geometry.centers, f);
        let cam_to_center = center - frame.eye;
        let distance = cam_to_center.norm();

        if style != FaceStyle::Debug && normal.dot(&normalize_or_zero(&cam_to_center)) >= 0.0 {
            culled += 1;
            continue;
        }

        let center_2d = frame.to_canvas(&frame.project(&center));
        let mut all_outside = true;
        let mut points = Vec::with_capacity(vpf);
        for &index in face {
            let clip = frame.project(&point_at(geometry.world_vertices, index as usize));
            all_outside &= is_outside_frustum(&clip);
            points.push(frame.to_canvas(&clip));
        }
        if all_outside {
            continue;
        }
        if style == FaceStyle::Lit {
            push_outward(&mut points, FACE_SEAM_OFFSET);
        }

        let normal_tip = if style == FaceStyle::Debug {
            frame.to_canvas(&frame.project(&(center + normal * DEBUG_NORMAL_LENGTH)))
        } else {
            center_2d
        };

        let color = if style == FaceStyle::Lit {
            let input = LightInput::for_face(
                material.face_color(),
                center,
                normal,
                material.specularity(),
                frame.eye,
            );
            let mut color = Rgb::BLACK;
            for light in lights {
                color += light.compute_light(&input)?;
            }
            color.clamped()
        } else {
            material.face_color()
        };

        projected.push(ProjectedFace {
            points,
            center: center_2d,
            normal_tip,
            thickness: frame.perspective_size(material.line_thickness(), distance),
            color,
            distance,
        });
    }

    projected.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    trace!(
        "{} faces kept, {} back-facing culled",
        projected.len(),
        culled
    );
    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::light::{AmbientLight, PointLight};
    use crate::mesh::{MeshId, RenderMode};
    use crate::view::Primitive;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-4;

    fn frame_looking_down_z() -> Frame {
        let mut camera = PerspectiveCamera::looking_at(
            Point3::new(0.0, 0.0, 10.0),
            Point3::origin(),
            Vector3::y(),
        );
        camera.set_aspect_ratio(800.0 / 600.0);
        Frame {
            clip_from_world: camera.proj_matrix() * camera.view_matrix(),
            eye: camera.position(),
            field_of_view: camera.field_of_view(),
            width: 800.0,
            height: 600.0,
        }
    }

    /// Triangle in the z = `z` plane, counter-clockwise seen from +z.
    fn triangle(z: f32, flipped: bool) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.set_vertices(vec![-1.0, -1.0, z, 1.0, -1.0, z, 0.0, 1.0, z]).unwrap();
        mesh.set_faces(if flipped { vec![0, 2, 1] } else { vec![0, 1, 2] }).unwrap();
        mesh
    }

    #[test]
    fn test_frustum_boundary_is_outside() {
        assert!(is_outside_frustum(&Point3::new(1.0, 0.0, 0.0)));
        assert!(is_outside_frustum(&Point3::new(0.0, -1.0, 0.0)));
        assert!(is_outside_frustum(&Point3::new(0.0, 0.0, 1.0)));
        assert!(!is_outside_frustum(&Point3::new(0.999, -0.999, 0.999)));
        assert!(!is_outside_frustum(&Point3::origin()));
    }

    #[test]
    fn test_to_canvas_flips_y() {
        let frame = frame_looking_down_z();
        assert_eq!(frame.to_canvas(&Point3::new(-1.0, -1.0, 0.0)), Point2::new(0.0, 600.0));
        assert_eq!(frame.to_canvas(&Point3::new(1.0, 1.0, 0.0)), Point2::new(800.0, 0.0));
        assert_eq!(frame.to_canvas(&Point3::origin()), Point2::new(400.0, 300.0));
    }

    #[test]
    fn test_point_cloud_radius_shrinks_with_distance() {
        let frame = frame_looking_down_z();
        let mut mesh = Mesh::new();
        mesh.set_vertices(vec![0.0, 0.0, 0.0, 0.0, 0.0, -10.0]).unwrap();
        mesh.set_radius(2.0);
        let mut view = MeshView::new(mesh.id());

        render_point_cloud(&frame, &mut mesh, &mut view).unwrap();
        let radii: Vec<f32> = view.circles().map(|c| c.r).collect();
        assert_eq!(radii.len(), 2);
        let expected = 2.0 / ((std::f32::consts::FRAC_PI_8).tan() * 10.0) * 300.0;
        assert_relative_eq!(radii[0], expected, epsilon = EPSILON);
        assert_relative_eq!(radii[1], expected / 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_point_cloud_skips_points_outside_frustum() {
        let frame = frame_looking_down_z();
        let mut mesh = Mesh::new();
        // Behind the camera, far off to the side, and one visible point.
        mesh.set_vertices(vec![0.0, 0.0, 20.0, 500.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let mut view = MeshView::new(mesh.id());
        render_point_cloud(&frame, &mut mesh, &mut view).unwrap();
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_bounding_box_overlay_has_twelve_lines() {
        let frame = frame_looking_down_z();
        let mut mesh = Mesh::cube(1.0);
        mesh.set_show_bounding_box(true);
        let mut view = MeshView::new(mesh.id());
        render_point_cloud(&frame, &mut mesh, &mut view).unwrap();
        assert_eq!(view.circles().count(), 8);
        let lines: Vec<_> = view.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|l| l.stroke_width == BOUNDING_BOX_THICKNESS));
    }

    #[test]
    fn test_wireframe_keeps_edges_with_one_endpoint_inside() {
        let frame = frame_looking_down_z();
        let mut mesh = Mesh::new();
        mesh.set_vertices(vec![0.0, 0.0, 0.0, 500.0, 0.0, 0.0, 600.0, 0.0, 0.0]).unwrap();
        mesh.set_faces(vec![0, 1, 2]).unwrap();
        let mut view = MeshView::new(mesh.id());

        render_wireframe(&frame, &mut mesh, &mut view).unwrap();
        // (0, 1) has one endpoint inside; (1, 2) is entirely outside.
        assert_eq!(view.lines().count(), 1);
    }

    #[test]
    fn test_wireframe_thickness_uses_world_midpoint() {
        let frame = frame_looking_down_z();
        let mut mesh = triangle(0.0, false);
        mesh.set_line_thickness(3.0);
        let mut view = MeshView::new(mesh.id());
        render_wireframe(&frame, &mut mesh, &mut view).unwrap();

        let first = view.lines().next().unwrap();
        // Edge (0, 1) has its midpoint at (0, -1, 0).
        let distance = (Point3::new(0.0, -1.0, 0.0) - frame.eye).norm();
        assert_relative_eq!(first.stroke_width, frame.perspective_size(3.0, distance), epsilon = EPSILON);
    }

    #[test]
    fn test_random_sub_count() {
        assert_eq!(random_sub_count(0), 0);
        assert_eq!(random_sub_count(2), 1);
        assert_eq!(random_sub_count(100), 10);
        assert_eq!(random_sub_count(1_000_000), RANDOM_SUB_MAX_EDGES);
    }

    #[test]
    fn test_random_sub_draws_distinct_edges() {
        let frame = frame_looking_down_z();
        let mut mesh = Mesh::new();
        let n = 200u32;
        let vertices: Vec<f32> = (0..n).flat_map(|i| [i as f32 * 0.01, 0.0, 0.0]).collect();
        let faces: Vec<u32> = (0..n - 2).flat_map(|i| [i, i + 1, i + 2]).collect();
        mesh.set_vertices(vertices).unwrap();
        mesh.set_faces(faces).unwrap();
        let stream_len = mesh.unique_edges().unwrap().len();
        let mut view = MeshView::new(mesh.id());
        let mut rng = StdRng::seed_from_u64(7);

        render_wireframe_random_sub(&frame, &mut mesh, &mut view, &mut rng).unwrap();
        let lines: Vec<_> = view.lines().map(|l| (l.x1.to_bits(), l.x2.to_bits())).collect();
        assert_eq!(lines.len(), random_sub_count(stream_len));
        let mut distinct = lines.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct.len(), lines.len());
    }

    #[test]
    fn test_back_face_culling() {
        let frame = frame_looking_down_z();
        for (flipped, expected) in [(false, 1), (true, 0)] {
            let mut mesh = triangle(0.0, flipped);
            let mut view = MeshView::new(mesh.id());
            render_face_opaque_plain(&frame, &mut mesh, &mut view).unwrap();
            assert_eq!(view.polygons().count(), expected);

            let mut view = MeshView::new(mesh.id());
            render_face_light(&frame, &mut mesh, &mut view, &[]).unwrap();
            assert_eq!(view.polygons().count(), expected);

            let mut view = MeshView::new(mesh.id());
            render_debug_geometry(&frame, &mut mesh, &mut view).unwrap();
            assert_eq!(view.polygons().count(), 1);
        }
    }

    #[test]
    fn test_faces_outside_frustum_are_rejected() {
        let frame = frame_looking_down_z();
        let mut mesh = triangle(0.0, false);
        mesh.set_position(Vector3::new(1000.0, 0.0, 0.0));
        let mut view = MeshView::new(mesh.id());
        render_face_opaque_plain(&frame, &mut mesh, &mut view).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_faces_sorted_farthest_first() {
        let frame = frame_looking_down_z();
        let mut mesh = Mesh::new();
        let mut vertices = Vec::new();
        // Same triangle at z = -5, 0 and -10, listed out of depth order.
        for z in [-5.0f32, 0.0, -10.0] {
            vertices.extend_from_slice(&[-1.0, -1.0, z, 1.0, -1.0, z, 0.0, 1.0, z]);
        }
        mesh.set_vertices(vertices).unwrap();
        mesh.set_faces(vec![0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        for mode in [RenderMode::FaceOpaquePlain, RenderMode::FaceLight] {
            let mut view = MeshView::new(MeshId::new());
            if mode == RenderMode::FaceLight {
                let lights = [Light::from(AmbientLight::default())];
                render_face_light(&frame, &mut mesh, &mut view, &lights).unwrap();
            } else {
                render_face_opaque_plain(&frame, &mut mesh, &mut view).unwrap();
            }
            // Farther copies project smaller.
            let areas: Vec<f32> = view.polygons().map(|p| p.signed_area().abs()).collect();
            assert_eq!(areas.len(), 3);
            assert!(areas[0] < areas[1] && areas[1] < areas[2], "{mode}: {areas:?}");
        }
    }

    #[test]
    fn test_debug_geometry_draws_center_and_normal() {
        let frame = frame_looking_down_z();
        let mut mesh = triangle(0.0, true);
        let mut view = MeshView::new(mesh.id());
        render_debug_geometry(&frame, &mut mesh, &mut view).unwrap();

        let kinds: Vec<&str> = view
            .primitives()
            .map(|p| match p {
                Primitive::Circle(_) => "circle",
                Primitive::Line(_) => "line",
                Primitive::Polygon(_) => "polygon",
            })
            .collect();
        assert_eq!(kinds, vec!["polygon", "circle", "line"]);

        let polygon = view.polygons().next().unwrap();
        assert_eq!(polygon.stroke_width, DEBUG_THICKNESS);
        let circle = view.circles().next().unwrap();
        assert_eq!(circle.r, DEBUG_CENTER_RADIUS);
        // The flipped normal points along -z, nearly down the line of sight,
        // so the tick collapses to less than a pixel.
        let tick = view.lines().next().unwrap();
        assert_relative_eq!(tick.x1, tick.x2, epsilon = 1e-3);
        assert!((tick.y1 - tick.y2).abs() < 1.0);
    }

    #[test]
    fn test_face_light_colors_and_seam_offset() {
        let frame = frame_looking_down_z();
        let mut mesh = triangle(0.0, false);
        mesh.set_face_color(Rgb::new(200.0, 100.0, 50.0));

        let mut plain = MeshView::new(mesh.id());
        render_face_opaque_plain(&frame, &mut mesh, &mut plain).unwrap();
        let mut lit = MeshView::new(mesh.id());
        let lights = [
            Light::from(PointLight::new(Point3::new(0.0, 0.0, 5.0))),
            Light::from(AmbientLight::new(Rgb::WHITE, 0.5)),
        ];
        render_face_light(&frame, &mut mesh, &mut lit, &lights).unwrap();

        let plain = plain.polygons().next().unwrap().clone();
        let lit = lit.polygons().next().unwrap();
        assert!(lit.stroke.is_none());
        assert_eq!(lit.fill, "rgb(255, 150, 75)");
        assert!(lit.signed_area().abs() > plain.signed_area().abs());
        for (a, b) in plain.points.iter().zip(lit.points.iter()) {
            assert_relative_eq!((b - a).norm(), FACE_SEAM_OFFSET, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_seam_offset_moves_away_from_2d_centroid() {
        // Tilted away from the camera, so the projected 3D center is not the
        // mean of the projected vertices.
        let frame = frame_looking_down_z();
        let mut mesh = Mesh::new();
        mesh.set_vertices(vec![-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, -6.0]).unwrap();
        mesh.set_faces(vec![0, 1, 2]).unwrap();

        let mut plain = MeshView::new(mesh.id());
        render_face_opaque_plain(&frame, &mut mesh, &mut plain).unwrap();
        let mut lit = MeshView::new(mesh.id());
        render_face_light(&frame, &mut mesh, &mut lit, &[]).unwrap();

        let plain = plain.polygons().next().unwrap().clone();
        let centroid = plain.centroid();
        let lit = lit.polygons().next().unwrap();
        for (a, b) in plain.points.iter().zip(lit.points.iter()) {
            let expected = (a - centroid).normalize() * FACE_SEAM_OFFSET;
            assert_relative_eq!(b - a, expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_push_outward_square() {
        let mut points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        push_outward(&mut points, 2.0_f32.sqrt());
        assert_relative_eq!(points[0], Point2::new(-1.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(points[2], Point2::new(3.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_face_light_without_lights_is_black() {
        let frame = frame_looking_down_z();
        let mut mesh = triangle(0.0, false);
        let mut view = MeshView::new(mesh.id());
        render_face_light(&frame, &mut mesh, &mut view, &[]).unwrap();
        assert_eq!(view.polygons().next().unwrap().fill, "rgb(0, 0, 0)");
    }
}
