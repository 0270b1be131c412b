//! Layer assignment system.
//!
//! Resolves [`LayerRequest`]s: the requested layer is written as both
//! [`RenderLayer`] and [`SortingLayer`] on the root and every descendant,
//! then the request is removed. Parts added to a tree later do not inherit
//! the layer unless a new request is made.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::layer::{LayerRequest, RenderLayer, SortingLayer};

/// Root plus all descendants, depth first.
pub fn subtree(root: Entity, children: &Query<&Children>) -> SmallVec<[Entity; 8]> {
    let mut out = SmallVec::new();
    let mut stack: SmallVec<[Entity; 8]> = SmallVec::new();
    stack.push(root);
    while let Some(entity) = stack.pop() {
        out.push(entity);
        if let Ok(kids) = children.get(entity) {
            stack.extend(kids.iter());
        }
    }
    out
}

pub fn apply_layer_requests(
    requests: Query<(Entity, &LayerRequest)>,
    children: Query<&Children>,
    mut commands: Commands,
) {
    for (root, request) in requests.iter() {
        for entity in subtree(root, &children) {
            commands.entity(entity).try_insert((
                RenderLayer(request.0.clone()),
                SortingLayer(request.0.clone()),
            ));
        }
        commands.entity(root).try_remove::<LayerRequest>();
    }
}
