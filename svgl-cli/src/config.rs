//! Render configuration read from TOML.
use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use svgl_core::{AmbientLight, Light, Mesh, PerspectiveCamera, PointLight, RenderMode, Rgb};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Everything the command line renders with. Missing sections and fields
/// fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub canvas: CanvasConfig,
    pub camera: CameraConfig,
    pub material: MaterialConfig,
    pub lights: Vec<LightConfig>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            camera: CameraConfig::default(),
            material: MaterialConfig::default(),
            lights: vec![
                LightConfig::Ambient {
                    color: Rgb::WHITE,
                    intensity: 0.3,
                },
                LightConfig::Point {
                    color: Rgb::WHITE,
                    intensity: 0.8,
                    position: [10.0, 20.0, 15.0],
                    radius: 1.0,
                    decay: false,
                },
            ],
        }
    }
}

impl RenderConfig {
    /// Load configuration from a `.toml` file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a `.toml` file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    pub fn scene_lights(&self) -> Vec<Light> {
        self.lights.iter().map(LightConfig::to_light).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Any CSS color; no background when absent.
    pub background: Option<String>,
    /// Seed for the random-subset wireframe.
    pub seed: Option<u64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position. When absent the camera frames the mesh from the
    /// (1, 1, 1) direction.
    pub eye: Option<[f32; 3]>,
    /// Orbit center. Defaults to the mesh's bounding-box center.
    pub center: Option<[f32; 3]>,
    pub up: [f32; 3],
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: None,
            center: None,
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
        }
    }
}

impl CameraConfig {
    /// Margin around the mesh's bounding sphere when framing.
    const FIT_MARGIN: f32 = 1.2;

    /// Build the camera for a mesh already carrying its transform.
    pub fn build(&self, mesh: &mut Mesh, aspect_ratio: f32) -> svgl_core::Result<PerspectiveCamera> {
        let fov = self.fov_degrees.to_radians();
        let bbox = mesh.bounding_box()?;
        let center = self.center.map(Point3::from).unwrap_or(bbox.center);
        let eye = match self.eye {
            Some(eye) => Point3::from(eye),
            None => {
                let radius = ((bbox.max - bbox.min).norm() / 2.0).max(f32::EPSILON);
                let distance = radius / (fov / 2.0).sin() * Self::FIT_MARGIN;
                center + Vector3::new(1.0, 1.0, 1.0).normalize() * distance
            }
        };

        let mut camera = PerspectiveCamera::looking_at(eye, center, Vector3::from(self.up));
        camera.set_field_of_view(fov);
        camera.set_aspect_ratio(aspect_ratio);
        Ok(camera)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub mode: RenderMode,
    pub edge_color: Rgb,
    pub face_color: Rgb,
    pub opacity: f32,
    pub line_thickness: f32,
    pub radius: f32,
    pub specularity: f32,
    pub show_bounding_box: bool,
    pub rotation_degrees: [f32; 3],
    pub position: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::FaceLight,
            edge_color: Rgb::BLACK,
            face_color: Rgb::new(200.0, 200.0, 200.0),
            opacity: 1.0,
            line_thickness: 1.0,
            radius: 1.0,
            specularity: 0.0,
            show_bounding_box: false,
            rotation_degrees: [0.0; 3],
            position: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl MaterialConfig {
    /// Copy the material and transform onto a mesh.
    pub fn apply(&self, mesh: &mut Mesh) {
        mesh.set_render_mode(self.mode);
        mesh.set_edge_color(self.edge_color);
        mesh.set_face_color(self.face_color);
        mesh.set_opacity(self.opacity);
        mesh.set_line_thickness(self.line_thickness);
        mesh.set_radius(self.radius);
        mesh.set_specularity(self.specularity);
        mesh.set_show_bounding_box(self.show_bounding_box);
        let [x, y, z] = self.rotation_degrees;
        mesh.set_rotation_from_euler_degrees(x, y, z);
        mesh.set_position(Vector3::from(self.position));
        mesh.set_scale(Vector3::from(self.scale));
    }
}

fn white() -> Rgb {
    Rgb::WHITE
}

fn one() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightConfig {
    Point {
        #[serde(default = "white")]
        color: Rgb,
        #[serde(default = "one")]
        intensity: f32,
        position: [f32; 3],
        #[serde(default = "one")]
        radius: f32,
        #[serde(default)]
        decay: bool,
    },
    Ambient {
        #[serde(default = "white")]
        color: Rgb,
        #[serde(default = "one")]
        intensity: f32,
    },
}

impl LightConfig {
    pub fn to_light(&self) -> Light {
        match *self {
            LightConfig::Point {
                color,
                intensity,
                position,
                radius,
                decay,
            } => {
                let mut light = PointLight::new(Point3::from(position));
                light.color = color;
                light.intensity = intensity;
                light.radius = radius;
                if decay {
                    light.enable_decay();
                }
                light.into()
            }
            LightConfig::Ambient { color, intensity } => AmbientLight::new(color, intensity).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use svgl_core::LightType;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(RenderConfig::from_toml("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = RenderConfig::from_toml(
            r##"
            [canvas]
            width = 320
            background = "white"

            [material]
            mode = "wireframe"
            edge_color = "#ff0000"

            [[lights]]
            type = "point"
            position = [1.0, 2.0, 3.0]
            decay = true
            "##,
        )
        .unwrap();

        assert_eq!(config.canvas.width, 320);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.canvas.background.as_deref(), Some("white"));
        assert_eq!(config.material.mode, RenderMode::Wireframe);
        assert_eq!(config.material.edge_color, Rgb::new(255.0, 0.0, 0.0));
        assert_eq!(config.material.opacity, 1.0);

        let lights = config.scene_lights();
        assert_eq!(lights.len(), 1);
        match &lights[0] {
            Light::Point(p) => {
                assert!(p.decay());
                assert_eq!(p.intensity, 1.0);
                assert_eq!(p.position, Point3::new(1.0, 2.0, 3.0));
            }
            other => panic!("expected a point light, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(matches!(
            RenderConfig::from_toml("[material]\nmode = \"sketch\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(RenderConfig::from_toml("[[lights]]\ntype = \"spot\"").is_err());
        assert!(matches!(
            RenderConfig::load_from_file(Path::new("render.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_serialized_config_reads_back() {
        let config = RenderConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(RenderConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_camera_fits_mesh() {
        let mut mesh = Mesh::cube(2.0);
        let camera = CameraConfig::default().build(&mut mesh, 4.0 / 3.0).unwrap();
        let eye = camera.position();
        assert_relative_eq!(eye.x, eye.y, epsilon = 1e-4);
        assert_relative_eq!(eye.y, eye.z, epsilon = 1e-4);
        assert!(eye.coords.norm() > 3.0_f32.sqrt());
        assert_relative_eq!(camera.aspect_ratio(), 4.0 / 3.0);
    }

    #[test]
    fn test_default_lights() {
        let lights = RenderConfig::default().scene_lights();
        assert_eq!(lights[0].light_type(), LightType::Ambient);
        assert_eq!(lights[1].light_type(), LightType::Point);
    }
}
