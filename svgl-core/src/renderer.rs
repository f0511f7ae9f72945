//! Frame orchestration: camera and scene in, SVG out.
use log::debug;
use nalgebra::Matrix4;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::PerspectiveCamera;
use crate::error::{Result, SvglError};
use crate::math::Transform;
use crate::mesh::{MeshId, RenderMode};
use crate::raster::{self, Frame};
use crate::scene::Scene;
use crate::view::{MeshView, SvgCanvas};

/// Renders a [`Scene`] seen through a [`PerspectiveCamera`] into an SVG canvas.
///
/// Every call to [`Renderer::render`] redraws the whole scene. Each mesh gets
/// its own `<g>` group whose primitives are pooled across frames.
#[derive(Debug)]
pub struct Renderer {
    canvas: SvgCanvas,
    scene: Option<Scene>,
    camera: Option<PerspectiveCamera>,
    rng: StdRng,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: SvgCanvas::new(width, height),
            scene: None,
            camera: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Same as [`Renderer::new`] but the random-subset wireframe is reproducible.
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(width, height)
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_size(width, height);
    }

    pub fn background(&self) -> Option<&str> {
        self.canvas.background()
    }

    pub fn set_background(&mut self, background: Option<String>) {
        self.canvas.set_background(background);
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = Some(scene);
    }

    pub fn take_scene(&mut self) -> Option<Scene> {
        self.scene.take()
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut PerspectiveCamera> {
        self.camera.as_mut()
    }

    pub fn set_camera(&mut self, camera: PerspectiveCamera) {
        self.camera = Some(camera);
    }

    /// Draw one frame.
    ///
    /// Fails before touching the canvas when the camera or the scene is
    /// missing. A failure while rasterizing a mesh leaves the groups drawn so
    /// far in place.
    pub fn render(&mut self) -> Result<()> {
        let camera = self.camera.as_ref().ok_or(SvglError::MissingCamera)?;
        let scene = self.scene.as_mut().ok_or(SvglError::MissingScene)?;

        let live: Vec<MeshId> = scene.meshes().iter().map(|m| m.id()).collect();
        self.canvas.reset(&live);

        // World-space caches already carry each mesh's model matrix, so the
        // rasterizers project them with an identity model.
        let frame = Frame {
            clip_from_world: Transform::mvp_matrix(
                &Matrix4::identity(),
                &camera.view_matrix(),
                &camera.proj_matrix(),
            ),
            eye: camera.position(),
            field_of_view: camera.field_of_view(),
            width: self.canvas.width() as f32,
            height: self.canvas.height() as f32,
        };

        let (meshes, lights) = scene.parts_mut();
        for mesh in meshes.iter_mut().filter(|m| m.visible()) {
            debug!("rendering mesh {} as {}", mesh.id(), mesh.render_mode());
            let view = self.canvas.attach(mesh.id());
            match mesh.render_mode() {
                RenderMode::PointCloud => raster::render_point_cloud(&frame, mesh, view)?,
                RenderMode::Wireframe => raster::render_wireframe(&frame, mesh, view)?,
                RenderMode::WireframeRandomSub => {
                    raster::render_wireframe_random_sub(&frame, mesh, view, &mut self.rng)?
                }
                RenderMode::FaceOpaquePlain => raster::render_face_opaque_plain(&frame, mesh, view)?,
                RenderMode::DebugGeometry => raster::render_debug_geometry(&frame, mesh, view)?,
                RenderMode::FaceLight => raster::render_face_light(&frame, mesh, view, lights)?,
            }
            debug!("mesh {}: {} primitives", mesh.id(), view.len());
        }
        Ok(())
    }

    /// The output group of a mesh drawn in the last frame.
    pub fn view(&self, id: MeshId) -> Option<&MeshView> {
        self.canvas.view(id)
    }

    pub fn canvas(&self) -> &SvgCanvas {
        &self.canvas
    }

    /// The accumulated output as an SVG document.
    pub fn svg_text(&self) -> String {
        self.canvas.svg_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use nalgebra::{Point3, Vector3};

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::looking_at(Point3::new(0.0, 0.0, 10.0), Point3::origin(), Vector3::y())
    }

    #[test]
    fn test_render_requires_camera_and_scene() {
        let mut renderer = Renderer::new(800, 600);
        assert!(matches!(renderer.render(), Err(SvglError::MissingCamera)));
        renderer.set_camera(camera());
        assert!(matches!(renderer.render(), Err(SvglError::MissingScene)));
        renderer.set_scene(Scene::new());
        assert!(renderer.render().is_ok());
    }

    #[test]
    fn test_invisible_meshes_are_skipped() {
        let mut scene = Scene::new();
        let shown = scene.add(Mesh::cube(1.0));
        let mut hidden = Mesh::cube(1.0);
        hidden.set_visible(false);
        let hidden = scene.add(hidden);

        let mut renderer = Renderer::new(800, 600);
        renderer.set_camera(camera());
        renderer.set_scene(scene);
        renderer.render().unwrap();

        assert_eq!(renderer.view(shown).unwrap().len(), 8);
        assert!(renderer.view(hidden).is_none());
        assert_eq!(renderer.canvas().views().count(), 1);
    }

    #[test]
    fn test_face_mode_without_faces_fails() {
        let mut mesh = Mesh::new();
        mesh.set_vertices(vec![0.0; 9]).unwrap();
        mesh.set_render_mode(RenderMode::FaceOpaquePlain);
        let mut scene = Scene::new();
        scene.add(mesh);

        let mut renderer = Renderer::new(800, 600);
        renderer.set_camera(camera());
        renderer.set_scene(scene);
        assert!(matches!(renderer.render(), Err(SvglError::MissingFaces)));
    }

    #[test]
    fn test_removed_mesh_disappears_next_frame() {
        let mut renderer = Renderer::new(800, 600);
        renderer.set_camera(camera());
        let mut scene = Scene::new();
        let id = scene.add(Mesh::cube(1.0));
        renderer.set_scene(scene);
        renderer.render().unwrap();
        assert!(renderer.svg_text().contains(&id.to_string()));

        renderer.scene_mut().unwrap().remove(id);
        renderer.render().unwrap();
        assert!(!renderer.svg_text().contains(&id.to_string()));
    }

    #[test]
    fn test_seeded_random_sub_is_reproducible() {
        let build = || {
            let mut mesh = Mesh::new();
            let vertices: Vec<f32> = (0..100).flat_map(|i| [i as f32 * 0.02, 0.0, 0.0]).collect();
            let faces: Vec<u32> = (0..98).flat_map(|i| [i, i + 1, i + 2]).collect();
            mesh.set_vertices(vertices).unwrap();
            mesh.set_faces(faces).unwrap();
            mesh.set_render_mode(RenderMode::WireframeRandomSub);
            let mut scene = Scene::new();
            let id = scene.add(mesh);
            let mut renderer = Renderer::with_seed(800, 600, 42);
            renderer.set_camera(camera());
            renderer.set_scene(scene);
            renderer.render().unwrap();
            let xs: Vec<f32> = renderer.view(id).unwrap().lines().map(|l| l.x1).collect();
            xs
        };
        assert_eq!(build(), build());
    }
}
