/// Keyboard-driven camera movement
use crossterm::event::KeyCode;
use wallcast_core::vector::normalize_or_zero;
use wallcast_core::{Camera, Level};

/// World units moved per key press.
pub const MOVE_STEP: f32 = 4.0;
/// Radians turned per key press.
pub const TURN_STEP: f32 = 0.08;
/// How close the camera may get to a block.
pub const CAMERA_RADIUS: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
}

impl Movement {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Up => Some(Self::Forward),
            KeyCode::Char('s') | KeyCode::Down => Some(Self::Back),
            KeyCode::Char('z') => Some(Self::StrafeLeft),
            KeyCode::Char('c') => Some(Self::StrafeRight),
            KeyCode::Char('a') | KeyCode::Left => Some(Self::TurnLeft),
            KeyCode::Char('d') | KeyCode::Right => Some(Self::TurnRight),
            _ => None,
        }
    }
}

/// Apply one movement to the camera. Steps that would walk into a block are
/// refused; returns whether the camera changed.
///
/// The view is the world rotated by the negative yaw, so increasing the yaw
/// turns the view to the left.
pub fn apply(camera: &mut Camera, level: &Level, movement: Movement) -> bool {
    let direction = match movement {
        Movement::TurnLeft => {
            camera.rotation += TURN_STEP;
            return true;
        }
        Movement::TurnRight => {
            camera.rotation -= TURN_STEP;
            return true;
        }
        Movement::Forward => camera.forward(),
        Movement::Back => -camera.forward(),
        Movement::StrafeLeft => -camera.right(),
        Movement::StrafeRight => camera.right(),
    };

    let target = camera.position + normalize_or_zero(&direction) * MOVE_STEP;
    if level.is_free_with_radius(&target, CAMERA_RADIUS) {
        camera.position = target;
        true
    } else {
        false
    }
}
