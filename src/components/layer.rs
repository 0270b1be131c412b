//! Render and sorting layer components.
//!
//! Spawned objects are usually small trees (a root plus decorative child
//! parts). Rather than setting layers on each part by hand, spawn code puts
//! a [`LayerRequest`] on the root and
//! [`apply_layer_requests`](crate::systems::layers::apply_layer_requests)
//! walks the hierarchy and assigns [`RenderLayer`] and [`SortingLayer`] to
//! every node.

use bevy_ecs::prelude::Component;

/// Logical layer an entity lives on (used for camera culling masks).
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderLayer(pub String);

/// Sorting layer name used to order draws between layers.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortingLayer(pub String);

/// Pending request to assign a layer to an entity and all of its descendants.
///
/// Removed once applied.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct LayerRequest(pub String);

impl LayerRequest {
    pub fn new(layer: impl Into<String>) -> Self {
        Self(layer.into())
    }
}
