/// Vector primitives shared by the camera, geometry and renderer.
///
/// Addition, subtraction, scaling, magnitude and normalization come straight
/// from nalgebra and always return new values. This module adds the few
/// operations the wall pipeline needs on top of that.
use nalgebra::{Vector2, Vector3};

/// A point or direction in world, mesh-local or view space.
///
/// `y` is vertical and grows downwards on screen, `z` is depth and grows
/// away from the camera.
pub type Vec3 = Vector3<f32>;

/// A point in screen space, in surface pixels.
pub type Vec2 = Vector2<f32>;

/// Smallest depth `project` will divide by.
pub const PROJECTION_EPSILON: f32 = 0.001;

/// Perspective-project a view-space point onto the screen.
///
/// Depth is clamped to [`PROJECTION_EPSILON`] so points on or behind the
/// camera plane never divide by zero or flip sign.
pub fn project(point: &Vec3, focal_length: f32, screen_center: &Vec2) -> Vec2 {
    let safe_z = point.z.max(PROJECTION_EPSILON);
    let scale = focal_length / safe_z;
    screen_center + Vec2::new(point.x, point.y) * scale
}

/// Rotate the `(x, z)` pair of a point around the vertical axis.
pub fn rotate_yaw(point: &Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(
        point.x * cos - point.z * sin,
        point.y,
        point.x * sin + point.z * cos,
    )
}

/// Normalize, returning the zero vector instead of NaNs for zero length.
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
}
