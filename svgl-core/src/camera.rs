//! Orbit camera with a perspective projection.
use log::trace;
use nalgebra::{Isometry3, Matrix4, Point3, UnitQuaternion, Vector3};

use crate::math::{arcball_quaternion, transform_point, Transform};

/// Camera orbiting around `center` at `distance`, oriented by `rotation`.
///
/// `rotation` maps camera axes to world axes: the eye sits at
/// `center + rotation * (0, 0, distance)` and looks down the camera's -z.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    rotation: UnitQuaternion<f32>,
    center: Point3<f32>,
    distance: f32,
    field_of_view: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            center: Point3::origin(),
            distance: 10.0,
            field_of_view: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 16.0 / 9.0,
            near: 0.01,
            far: f32::INFINITY,
        }
    }
}

impl PerspectiveCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default camera already aimed with [`PerspectiveCamera::look_at`].
    pub fn looking_at(eye: Point3<f32>, center: Point3<f32>, up: Vector3<f32>) -> Self {
        let mut camera = Self::default();
        camera.look_at(eye, center, up);
        camera
    }

    /// Place the eye at `eye`, orbiting around `center`.
    pub fn look_at(&mut self, eye: Point3<f32>, center: Point3<f32>, up: Vector3<f32>) {
        let view = Isometry3::look_at_rh(&eye, &center, &up);
        self.rotation = view.rotation.inverse();
        self.center = center;
        self.distance = (eye - center).norm();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(&Vector3::new(0.0, 0.0, -self.distance))
            * self.rotation.conjugate().to_homogeneous()
            * Transform::translation_matrix(&-self.center.coords)
    }

    /// Camera-to-world matrix, the inverse of [`PerspectiveCamera::view_matrix`].
    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(&self.center.coords)
            * self.rotation.to_homogeneous()
            * Transform::translation_matrix(&Vector3::new(0.0, 0.0, self.distance))
    }

    pub fn proj_matrix(&self) -> Matrix4<f32> {
        Transform::perspective(self.field_of_view, self.aspect_ratio, self.near, self.far)
    }

    /// The eye position in world space.
    pub fn position(&self) -> Point3<f32> {
        transform_point(&self.matrix(), &Point3::origin())
    }

    /// Pan: move the center in the camera plane, scaled by distance.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        let d = self.distance;
        let local = Vector3::new(-d * offset.x, d * offset.y, d * offset.z);
        self.center += self.rotation * local;
    }

    /// Move toward (negative) or away from (positive) the center.
    pub fn dolly(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(0.0);
    }

    /// Arcball orbit by a 2D offset in normalized screen units.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let Some(target) = arcball_quaternion(dx, dy).try_inverse() else {
            return;
        };
        let delta = arcball_quaternion(0.0, 0.0) * target;
        if delta.norm() < 1e-6 {
            return;
        }

        self.rotation = UnitQuaternion::new_normalize(self.rotation.into_inner() * delta);
        trace!("camera rotated by ({dx}, {dy})");
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.rotation = rotation;
    }

    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    pub fn set_center(&mut self, center: Point3<f32>) {
        self.center = center;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(0.0);
    }

    /// Vertical field of view in radians.
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn set_field_of_view(&mut self, radians: f32) {
        self.field_of_view = radians;
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// `f32::INFINITY` selects the infinite-far projection.
    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }
}
