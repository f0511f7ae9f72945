//! Command-line front end: load a mesh, apply a render configuration and
//! write the frame as an SVG document.
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use svgl_core::{parse_obj, stl, Mesh, MeshData, Renderer, Scene};

pub mod config;

pub use config::{ConfigError, RenderConfig};

/// Main application struct for rendering one mesh to SVG
pub struct App {
    config: RenderConfig,
}

impl App {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Read an `.obj` or `.stl` file.
    pub fn load_mesh_data(path: &Path) -> Result<MeshData> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let data = match extension.as_deref() {
            Some("obj") => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                parse_obj(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            Some("stl") => {
                let bytes =
                    std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
                stl::parse_stl(&bytes).with_context(|| format!("parsing {}", path.display()))?
            }
            _ => bail!("unsupported mesh format: {}", path.display()),
        };
        info!(
            "loaded {}: {} vertices, {} faces",
            path.display(),
            data.vertices.len() / 3,
            data.faces.len() / data.vertices_per_face.max(1)
        );
        Ok(data)
    }

    /// Render mesh data with the configured material, camera and lights.
    pub fn render(&self, data: MeshData) -> Result<String> {
        let canvas = &self.config.canvas;
        let mut mesh = Mesh::from_data(data).context("building mesh")?;
        self.config.material.apply(&mut mesh);

        let camera = self
            .config
            .camera
            .build(&mut mesh, canvas.width as f32 / canvas.height.max(1) as f32)
            .context("placing camera")?;

        let mut scene = Scene::new();
        scene.add(mesh);
        for light in self.config.scene_lights() {
            scene.add_light(light);
        }

        let mut renderer = match canvas.seed {
            Some(seed) => Renderer::with_seed(canvas.width, canvas.height, seed),
            None => Renderer::new(canvas.width, canvas.height),
        };
        renderer.set_background(canvas.background.clone());
        renderer.set_camera(camera);
        renderer.set_scene(scene);
        renderer.render().context("rendering")?;
        Ok(renderer.svg_text())
    }

    /// Load `input`, render it and write the SVG to `output`.
    pub fn run(&self, input: &Path, output: &Path) -> Result<()> {
        let data = Self::load_mesh_data(input)?;
        let svg = self.render(data)?;
        std::fs::write(output, &svg).with_context(|| format!("writing {}", output.display()))?;
        info!("wrote {} ({} bytes)", output.display(), svg.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgl_core::{RenderMode, Rgb};

    fn cube_data() -> MeshData {
        let mut cube = Mesh::cube(1.0);
        MeshData {
            vertices: cube.world_vertices().to_vec(),
            faces: cube.faces().unwrap_or_default().to_vec(),
            vertices_per_face: 3,
            normals: None,
        }
    }

    #[test]
    fn test_default_render_draws_lit_faces() {
        let svg = App::new(RenderConfig::default()).render(cube_data()).unwrap();
        assert!(svg.contains("width=\"800\""));
        assert_eq!(svg.matches("<polygon").count(), 6);
        assert!(!svg.contains("stroke: "));
    }

    #[test]
    fn test_material_overrides() {
        let mut config = RenderConfig::default();
        config.material.mode = RenderMode::PointCloud;
        config.material.edge_color = Rgb::new(0.0, 0.0, 255.0);
        config.canvas.background = Some("black".to_string());

        let svg = App::new(config).render(cube_data()).unwrap();
        assert_eq!(svg.matches("<circle").count(), 8);
        assert!(svg.contains("fill: rgb(0, 0, 255)"));
        assert!(svg.contains("background-color: black;"));
    }

    #[test]
    fn test_unknown_extension() {
        let err = App::load_mesh_data(Path::new("model.ply")).unwrap_err();
        assert!(err.to_string().contains("unsupported mesh format"));
    }
}
