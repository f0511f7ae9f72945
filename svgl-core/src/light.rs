//! Light sources and the per-face illumination model.
use std::fmt;

use nalgebra::{Point3, Vector3};
use uuid::Uuid;

use crate::color::Rgb;
use crate::error::{Result, SvglError};
use crate::math::normalize_or_zero;

/// Shininess exponent per unit of specularity.
const SPECULAR_EXPONENT: f32 = 30.0;

/// Opaque unique identifier of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(Uuid);

impl LightId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LightId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    Ambient = 1,
    Point = 2,
}

/// What a light needs to know about the surface it shines on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightInput {
    pub surface_color: Rgb,
    pub illuminated_position: Option<Point3<f32>>,
    pub illuminated_normal: Option<Vector3<f32>>,
    pub specularity: f32,
    pub camera_position: Option<Point3<f32>>,
}

impl LightInput {
    /// Input for a lit face: its color, center, normal and the viewer.
    pub fn for_face(
        surface_color: Rgb,
        center: Point3<f32>,
        normal: Vector3<f32>,
        specularity: f32,
        camera_position: Point3<f32>,
    ) -> Self {
        Self {
            surface_color,
            illuminated_position: Some(center),
            illuminated_normal: Some(normal),
            specularity,
            camera_position: Some(camera_position),
        }
    }
}

/// Omnidirectional light with diffuse and specular terms.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    id: LightId,
    pub position: Point3<f32>,
    pub color: Rgb,
    pub intensity: f32,
    /// Distance at which a decaying light has exactly `intensity`.
    pub radius: f32,
    decay: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            id: LightId::new(),
            position: Point3::origin(),
            color: Rgb::WHITE,
            intensity: 1.0,
            radius: 1.0,
            decay: false,
        }
    }
}

impl PointLight {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn id(&self) -> LightId {
        self.id
    }

    pub fn decay(&self) -> bool {
        self.decay
    }

    /// Intensity falls off with the squared distance in units of `radius`.
    pub fn enable_decay(&mut self) {
        self.decay = true;
    }

    pub fn disable_decay(&mut self) {
        self.decay = false;
    }

    pub fn compute_light(&self, input: &LightInput) -> Result<Rgb> {
        let position = input
            .illuminated_position
            .ok_or(SvglError::MissingIlluminatedPosition)?;
        let normal = input
            .illuminated_normal
            .ok_or(SvglError::MissingIlluminatedNormal)?;
        let camera = if input.specularity > 0.0 {
            Some(input.camera_position.ok_or(SvglError::MissingCameraPosition)?)
        } else {
            None
        };

        // A point sitting on the light keeps the nominal intensity.
        let intensity = match (self.position - position).norm() / self.radius {
            d if self.decay && d > 0.0 => self.intensity / (d * d),
            _ => self.intensity,
        };

        let to_light = normalize_or_zero(&(self.position - position));
        let diffuse = to_light.dot(&normal).max(0.0) * intensity;
        let s = input.surface_color;
        let l = self.color;
        let mut out = Rgb::new(
            255.0 * (s.r / 255.0) * (l.r / 255.0) * diffuse,
            255.0 * (s.g / 255.0) * (l.g / 255.0) * diffuse,
            255.0 * (s.b / 255.0) * (l.b / 255.0) * diffuse,
        );

        if let Some(eye) = camera {
            let incident = normalize_or_zero(&(position - self.position));
            let dl = normal.dot(&incident);
            if dl < 0.0 {
                let reflected = normalize_or_zero(&(incident - normal * (2.0 * dl)));
                let to_eye = normalize_or_zero(&(eye - position));
                let spec = reflected
                    .dot(&to_eye)
                    .max(0.0)
                    .powf(SPECULAR_EXPONENT * input.specularity);
                let factor = spec * input.specularity * (self.intensity + intensity) / 2.0;
                out += Rgb::new(l.r * factor, l.g * factor, l.b * factor);
            }
        }

        Ok(out.clamped())
    }
}

/// Uniform light added to every face regardless of orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    id: LightId,
    pub color: Rgb,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            id: LightId::new(),
            color: Rgb::WHITE,
            intensity: 1.0,
        }
    }
}

impl AmbientLight {
    pub fn new(color: Rgb, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            ..Self::default()
        }
    }

    pub fn id(&self) -> LightId {
        self.id
    }

    pub fn compute_light(&self, input: &LightInput) -> Rgb {
        let s = input.surface_color;
        let l = self.color;
        let k = self.intensity;
        Rgb::new(
            (l.r / 255.0) * (s.r / 255.0) * 255.0 * k,
            (l.g / 255.0) * (s.g / 255.0) * 255.0 * k,
            (l.b / 255.0) * (s.b / 255.0) * 255.0 * k,
        )
        .clamped()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
    Ambient(AmbientLight),
}

impl Light {
    pub fn id(&self) -> LightId {
        match self {
            Light::Point(light) => light.id(),
            Light::Ambient(light) => light.id(),
        }
    }

    pub fn light_type(&self) -> LightType {
        match self {
            Light::Point(_) => LightType::Point,
            Light::Ambient(_) => LightType::Ambient,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Light::Point(light) => light.color,
            Light::Ambient(light) => light.color,
        }
    }

    pub fn set_color(&mut self, color: Rgb) {
        match self {
            Light::Point(light) => light.color = color,
            Light::Ambient(light) => light.color = color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Point(light) => light.intensity,
            Light::Ambient(light) => light.intensity,
        }
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        match self {
            Light::Point(light) => light.intensity = intensity,
            Light::Ambient(light) => light.intensity = intensity,
        }
    }

    /// Contribution of this light, each channel in [0, 255].
    pub fn compute_light(&self, input: &LightInput) -> Result<Rgb> {
        match self {
            Light::Point(light) => light.compute_light(input),
            Light::Ambient(light) => Ok(light.compute_light(input)),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}
