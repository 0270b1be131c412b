//! Transform propagation for parent-child entity hierarchies.
//!
//! Computes [`GlobalTransform2D`] for every root entity and its descendants
//! ([`ChildOf`]). Stickers pinned to the board are children of it, so their
//! world position is the board position plus the scaled local offset.
//!
//! # Schedule position
//!
//! Should run **after** all systems that mutate local transforms (drift,
//! parallax, passing objects, snapping) and **before** rendering so that
//! the draw list sees up-to-date world positions.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;

/// Compose a child's local position/scale onto its parent's world transform.
pub fn compose(parent: &GlobalTransform2D, local_pos: Vec2, local_scale: Vec2) -> GlobalTransform2D {
    GlobalTransform2D {
        position: parent.position + local_pos * parent.scale,
        scale: parent.scale * local_scale,
    }
}

/// Propagate transforms from root entities down through the hierarchy.
///
/// Entities that already have a `GlobalTransform2D` are updated in place.
/// Entities missing the component get it inserted via deferred [`Commands`]
/// (visible next frame).
pub fn propagate_transforms(
    roots: Query<(Entity, &MapPosition, Option<&Scale>, Option<&Children>), Without<ChildOf>>,
    children_query: Query<(&MapPosition, Option<&Scale>, Option<&Children>), With<ChildOf>>,
    mut globals: Query<&mut GlobalTransform2D>,
    mut commands: Commands,
) {
    for (root_entity, pos, scale, children) in roots.iter() {
        let root_gt = GlobalTransform2D {
            position: pos.pos,
            scale: scale.map_or(Vec2::ONE, |s| s.scale),
        };

        if let Ok(mut gt) = globals.get_mut(root_entity) {
            *gt = root_gt;
        } else {
            commands.entity(root_entity).try_insert(root_gt);
        }

        if let Some(children) = children {
            propagate_children(
                &root_gt,
                children,
                &children_query,
                &mut globals,
                &mut commands,
            );
        }
    }
}

fn propagate_children(
    parent_gt: &GlobalTransform2D,
    children: &Children,
    children_query: &Query<(&MapPosition, Option<&Scale>, Option<&Children>), With<ChildOf>>,
    globals: &mut Query<&mut GlobalTransform2D>,
    commands: &mut Commands,
) {
    for child_entity in children.iter() {
        let Ok((pos, scale, grandchildren)) = children_query.get(child_entity) else {
            continue;
        };

        let child_gt = compose(parent_gt, pos.pos, scale.map_or(Vec2::ONE, |s| s.scale));

        if let Ok(mut gt) = globals.get_mut(child_entity) {
            *gt = child_gt;
        } else {
            commands.entity(child_entity).try_insert(child_gt);
        }

        if let Some(grandchildren) = grandchildren {
            propagate_children(&child_gt, grandchildren, children_query, globals, commands);
        }
    }
}
