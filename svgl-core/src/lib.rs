//! SVGL Core Library - software 3D-to-SVG rasterization
//!
//! This library turns triangle and polygon meshes seen through a perspective
//! orbit camera into SVG circles, lines and polygons, including OBJ/STL
//! import, materials, lights and per-mesh output groups.

pub mod camera;
pub mod color;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod stl;
pub mod view;

// Re-export commonly used types
pub use camera::PerspectiveCamera;
pub use color::Rgb;
pub use error::{Result, SvglError};
pub use light::{AmbientLight, Light, LightId, LightInput, LightType, PointLight};
pub use math::Transform;
pub use mesh::{BoundingBox, Material, Mesh, MeshData, MeshId, RenderMode};
pub use obj::parse_obj;
pub use renderer::Renderer;
pub use scene::Scene;
pub use stl::parse_stl;
pub use view::{MeshView, SvgCanvas};
