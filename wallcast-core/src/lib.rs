/// wallcast Core Library - 2.5D wall rendering pipeline
///
/// This library provides the stateless core of the renderer: vector helpers,
/// the camera and wall geometry model, the drawing-surface abstraction and
/// the per-frame pipeline that turns a list of wall meshes into filled quads.

pub mod camera;
pub mod color;
pub mod config;
pub mod geometry;
pub mod level;
pub mod renderer;
pub mod surface;
pub mod vector;

// Re-export commonly used types
pub use camera::Camera;
pub use color::{Color, ColorError};
pub use config::{ConfigError, RendererConfig};
pub use geometry::{Face, Mesh};
pub use level::{Level, LevelError};
pub use renderer::{FrameStats, RenderableFace, Renderer, NEAR_PLANE};
pub use surface::{CommandRecorder, DrawCommand, Surface};
pub use vector::{Vec2, Vec3};
