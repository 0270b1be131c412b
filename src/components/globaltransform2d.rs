//! Computed world-space transform for entities in a hierarchy.
//!
//! When an entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, its
//! [`MapPosition`](super::mapposition::MapPosition) and
//! [`Scale`](super::scale::Scale) are interpreted as local to the parent.
//! The [`propagate_transforms`](crate::systems::propagate_transforms::propagate_transforms)
//! system computes the resulting world-space values and stores them here.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;

/// Computed world-space transform for hierarchical entities.
///
/// For root entities (no parent) it mirrors the local MapPosition/Scale.
/// For child entities it holds the composed result of the full ancestor chain.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GlobalTransform2D {
    /// World-space position.
    pub position: Vec2,
    /// World-space scale.
    pub scale: Vec2,
}

impl Default for GlobalTransform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}
