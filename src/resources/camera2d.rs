//! Shared scene camera resource.
//!
//! The camera is a center point plus the half extents of the visible area in
//! world units. Systems use it to convert world positions into viewport
//! coordinates (0..1 left to right, 0..1 bottom to top).

use bevy_ecs::prelude::Resource;
use bevy_math::Vec2;

/// ECS resource that holds the active camera parameters.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SceneCamera {
    pub position: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            half_width: 17.5,
            half_height: 10.0,
        }
    }
}

impl SceneCamera {
    pub fn new(position: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            position,
            half_width,
            half_height,
        }
    }

    /// World point to viewport coordinates.
    ///
    /// A degenerate (zero-sized) view maps everything to the center.
    pub fn world_to_viewport(&self, world: Vec2) -> Vec2 {
        let rel = world - self.position;
        let vx = if self.half_width > 0.0 {
            0.5 + rel.x / (2.0 * self.half_width)
        } else {
            0.5
        };
        let vy = if self.half_height > 0.0 {
            0.5 + rel.y / (2.0 * self.half_height)
        } else {
            0.5
        };
        Vec2::new(vx, vy)
    }

    /// Whether a world point lies inside the visible area.
    pub fn contains(&self, world: Vec2) -> bool {
        let v = self.world_to_viewport(world);
        (0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y)
    }
}
