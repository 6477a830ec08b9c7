/// Viewer pose for the wall renderer
use crate::vector::Vec3;

/// Focal length used by [`Camera::default`].
pub const DEFAULT_FOCAL_LENGTH: f32 = 400.0;

/// First-person camera.
///
/// The renderer only reads it; movement is up to the host between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Yaw in radians, 0 faces +z.
    pub rotation: f32,
    /// Focal length in pixels. Larger values narrow the field of view.
    pub fov: f32,
}

impl Camera {
    pub fn new(position: Vec3, rotation: f32, fov: f32) -> Self {
        Self {
            position,
            rotation,
            fov,
        }
    }

    /// World-space floor-plane direction the camera is looking along.
    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec3::new(-sin, 0.0, cos)
    }

    /// World-space direction that ends up on the right side of the screen.
    pub fn right(&self) -> Vec3 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec3::new(cos, 0.0, sin)
    }

    /// Focal length giving `degrees` of horizontal field of view on a surface
    /// `width` pixels wide.
    pub fn focal_length_for(width: f32, degrees: f32) -> f32 {
        let half = (degrees.to_radians() * 0.5).tan();
        0.5 * width / half
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros(), 0.0, DEFAULT_FOCAL_LENGTH)
    }
}
