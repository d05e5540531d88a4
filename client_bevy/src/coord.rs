use bevy::prelude::{Vec2, Vec3};

use balloon_shared::config::SceneConfig;
use balloon_shared::point::Point;

/// Maps scene coordinates (origin top-left, Y-down) onto Bevy world
/// coordinates (origin at the scene center, Y-up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    pub width: f32,
    pub height: f32,
}

impl SceneFrame {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            width: config.width as f32,
            height: config.height as f32,
        }
    }

    pub fn to_world(&self, x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x - self.width * 0.5, self.height * 0.5 - y, z)
    }

    pub fn point_to_world(&self, p: Point, z: f32) -> Vec3 {
        self.to_world(p.x as f32, p.y as f32, z)
    }
}

/// Offset in scene space (Y-down) expressed as a local offset in a Bevy
/// child transform (Y-up).
pub fn local_offset(dx: f32, dy: f32) -> Vec2 {
    Vec2::new(dx, -dy)
}
