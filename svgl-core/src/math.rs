//! Matrix and quaternion helpers shared by the mesh, camera and renderer.
use nalgebra::{Matrix4, Point3, Quaternion, UnitQuaternion, Vector3};

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(offset)
    }

    /// Create a scale matrix
    pub fn scale_matrix(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(scale)
    }

    /// Create a model matrix: translate ∘ rotate ∘ scale
    pub fn model_matrix(
        position: &Vector3<f32>,
        rotation: &UnitQuaternion<f32>,
        scale: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Self::translation_matrix(position) * rotation.to_homogeneous() * Self::scale_matrix(scale)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }

    /// OpenGL-style perspective projection. An infinite `far` yields the
    /// limit matrix, so points are never rejected for being too far away.
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        if far.is_finite() {
            return Matrix4::new_perspective(aspect, fovy, near, far);
        }

        let f = 1.0 / (fovy / 2.0).tan();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, -1.0, -2.0 * near,
            0.0, 0.0, -1.0, 0.0,
        );
        matrix
    }
}

/// Apply a homogeneous matrix to a point and divide by w. A zero w is
/// treated as 1 so that degenerate points stay finite.
pub fn transform_point(matrix: &Matrix4<f32>, point: &Point3<f32>) -> Point3<f32> {
    let h = matrix * point.to_homogeneous();
    let w = if h.w == 0.0 { 1.0 } else { h.w };
    Point3::new(h.x / w, h.y / w, h.z / w)
}

/// Read the point stored at vertex `index` of a flat xyz array.
#[inline]
pub fn point_at(flat: &[f32], index: usize) -> Point3<f32> {
    let offset = index * 3;
    Point3::new(flat[offset], flat[offset + 1], flat[offset + 2])
}

/// Normalize, leaving zero-length vectors untouched instead of producing NaN.
#[inline]
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

/// Map a 2D offset onto the unit sphere as a pure quaternion: the offset
/// becomes x/y and z is lifted so that x² + y² + z² = 1.
pub fn arcball_quaternion(dx: f32, dy: f32) -> Quaternion<f32> {
    let s = (dx * dx + dy * dy).min(1.0);
    Quaternion::new(0.0, -dx, dy, (1.0 - s).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_model_matrix() {
        let matrix = Transform::model_matrix(
            &Vector3::zeros(),
            &UnitQuaternion::identity(),
            &Vector3::new(1.0, 1.0, 1.0),
        );
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_model_matrix_scales_then_rotates_then_translates() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2);
        let matrix = Transform::model_matrix(
            &Vector3::new(10.0, 0.0, 0.0),
            &rotation,
            &Vector3::new(2.0, 2.0, 2.0),
        );
        let p = transform_point(&matrix, &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_transform_point_divides_by_w() {
        let mut matrix = Matrix4::identity();
        matrix[(3, 3)] = 2.0;
        let p = transform_point(&matrix, &Point3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(p, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_point_zero_w_is_one() {
        let mut matrix = Matrix4::identity();
        matrix[(3, 3)] = 0.0;
        let p = transform_point(&matrix, &Point3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(p, Point3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_infinite_perspective_matches_finite_limit() {
        let infinite = Transform::perspective(1.0, 1.5, 0.1, f32::INFINITY);
        let far = Transform::perspective(1.0, 1.5, 0.1, 1e9);
        assert_relative_eq!(infinite, far, epsilon = 1e-4);
        assert_eq!(infinite[(3, 2)], -1.0);
    }

    #[test]
    fn test_arcball_quaternion_is_unit_inside_disk() {
        let q = arcball_quaternion(0.3, -0.4);
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-6);
        assert_eq!(q.w, 0.0);
        assert_relative_eq!(q.i, -0.3);
        assert_relative_eq!(q.j, -0.4);
    }

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(normalize_or_zero(&Vector3::zeros()), Vector3::zeros());
        assert_relative_eq!(normalize_or_zero(&Vector3::new(0.0, 3.0, 4.0)).norm(), 1.0);
    }
}
