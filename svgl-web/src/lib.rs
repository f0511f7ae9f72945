//! SVGL Web - WebAssembly bindings
//!
//! Renders meshes to SVG markup in the browser and mounts it into a page
//! element. Errors surface in JavaScript as string exceptions.

use std::fmt::Display;

use nalgebra::{Point3, Vector3};
use svgl_core::{
    parse_obj, parse_stl, AmbientLight, Mesh, MeshData, MeshId, PerspectiveCamera, PointLight,
    RenderMode, Renderer, Rgb, Scene,
};
use wasm_bindgen::prelude::*;

fn to_js(error: impl Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of SVGL
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// One scene, one camera and the SVG they produce.
#[wasm_bindgen]
pub struct WebRenderer {
    renderer: Renderer,
    mesh: Option<MeshId>,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> WebRenderer {
        let mut scene = Scene::new();
        scene.add_light(AmbientLight::new(Rgb::WHITE, 0.3));
        let mut key = PointLight::new(Point3::new(10.0, 20.0, 15.0));
        key.intensity = 0.8;
        scene.add_light(key);

        let mut renderer = Renderer::new(width, height);
        renderer.set_scene(scene);
        let mut camera = PerspectiveCamera::new();
        camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
        renderer.set_camera(camera);

        WebRenderer {
            renderer,
            mesh: None,
        }
    }

    /// Replace the current mesh with the contents of an OBJ file.
    #[wasm_bindgen(js_name = loadObj)]
    pub fn load_obj(&mut self, text: &str) -> Result<(), JsValue> {
        let data = parse_obj(text).map_err(to_js)?;
        self.replace_mesh(data).map_err(to_js)
    }

    /// Replace the current mesh with the contents of an STL file.
    #[wasm_bindgen(js_name = loadStl)]
    pub fn load_stl(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let data = parse_stl(bytes).map_err(to_js)?;
        self.replace_mesh(data).map_err(to_js)
    }

    /// Set the render mode by name, e.g. `"wireframe"` or `"face-light"`.
    #[wasm_bindgen(js_name = setRenderMode)]
    pub fn set_render_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: RenderMode = mode.parse().map_err(to_js)?;
        if let Some(mesh) = self.mesh_mut() {
            mesh.set_render_mode(mode);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setEdgeColor)]
    pub fn set_edge_color(&mut self, color: &str) -> Result<(), JsValue> {
        let color: Rgb = color.parse().map_err(to_js)?;
        if let Some(mesh) = self.mesh_mut() {
            mesh.set_edge_color(color);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setFaceColor)]
    pub fn set_face_color(&mut self, color: &str) -> Result<(), JsValue> {
        let color: Rgb = color.parse().map_err(to_js)?;
        if let Some(mesh) = self.mesh_mut() {
            mesh.set_face_color(color);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, color: Option<String>) {
        self.renderer.set_background(color);
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.renderer.set_size(width, height);
        if let Some(camera) = self.renderer.camera_mut() {
            camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
        }
    }

    #[wasm_bindgen(js_name = lookAt)]
    pub fn look_at(&mut self, ex: f32, ey: f32, ez: f32, cx: f32, cy: f32, cz: f32) {
        if let Some(camera) = self.renderer.camera_mut() {
            camera.look_at(Point3::new(ex, ey, ez), Point3::new(cx, cy, cz), Vector3::y());
        }
    }

    /// Orbit the camera by a drag offset in normalized screen units.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if let Some(camera) = self.renderer.camera_mut() {
            camera.rotate(dx, dy);
        }
    }

    /// Move the camera toward (negative) or away from its center.
    pub fn dolly(&mut self, delta: f32) {
        if let Some(camera) = self.renderer.camera_mut() {
            camera.dolly(delta);
        }
    }

    #[wasm_bindgen(js_name = addPointLight)]
    pub fn add_point_light(&mut self, x: f32, y: f32, z: f32, intensity: f32) {
        let mut light = PointLight::new(Point3::new(x, y, z));
        light.intensity = intensity;
        if let Some(scene) = self.renderer.scene_mut() {
            scene.add_light(light);
        }
    }

    #[wasm_bindgen(js_name = addAmbientLight)]
    pub fn add_ambient_light(&mut self, color: &str, intensity: f32) -> Result<(), JsValue> {
        let color: Rgb = color.parse().map_err(to_js)?;
        if let Some(scene) = self.renderer.scene_mut() {
            scene.add_light(AmbientLight::new(color, intensity));
        }
        Ok(())
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        self.renderer.render().map_err(to_js)
    }

    #[wasm_bindgen(getter, js_name = svgText)]
    pub fn svg_text(&self) -> String {
        self.renderer.svg_text()
    }

    /// Render and place the SVG inside the element with the given id.
    pub fn mount(&mut self, element_id: &str) -> Result<(), JsValue> {
        self.render()?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{element_id}'")))?;
        element.set_inner_html(&self.renderer.svg_text());
        Ok(())
    }
}

impl WebRenderer {
    fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        let id = self.mesh?;
        self.renderer.scene_mut()?.mesh_mut(id)
    }

    /// Swap in a new mesh, keeping the previous mesh's material, and frame it.
    fn replace_mesh(&mut self, data: MeshData) -> svgl_core::Result<()> {
        let mut mesh = Mesh::from_data(data)?;
        mesh.set_render_mode(RenderMode::FaceLight);

        let scene = self.renderer.scene_mut().ok_or(svgl_core::SvglError::MissingScene)?;
        if let Some(previous) = self.mesh.and_then(|id| scene.remove(id)) {
            let material = previous.material();
            mesh.set_render_mode(material.render_mode());
            mesh.set_edge_color(material.edge_color());
            mesh.set_face_color(material.face_color());
        }

        let bbox = mesh.bounding_box()?;
        self.mesh = Some(scene.add(mesh));

        let camera = self
            .renderer
            .camera_mut()
            .ok_or(svgl_core::SvglError::MissingCamera)?;
        let radius = ((bbox.max - bbox.min).norm() / 2.0).max(f32::EPSILON);
        let distance = radius / (camera.field_of_view() / 2.0).sin() * 1.2;
        camera.look_at(
            bbox.center + Vector3::new(0.0, 0.0, distance),
            bbox.center,
            Vector3::y(),
        );
        Ok(())
    }
}
