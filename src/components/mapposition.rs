//! World-space position (pivot) of an entity.
//!
//! For entities with a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent the
//! position is local to the parent; see
//! [`GlobalTransform2D`](super::globaltransform2d::GlobalTransform2D).

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }
}
