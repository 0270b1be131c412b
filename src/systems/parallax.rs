//! Parallax background systems.
//!
//! - [`init_parallax_layers`] measures newly added layers: the wrap length is
//!   the sprite's world width, or [`DEFAULT_LAYER_LENGTH`] with an error log
//!   when the entity has no sprite.
//! - [`parallax_system`] scrolls and wraps every layer relative to the camera.
//!   Layers that are also a [`BackgroundScroller`] take their speed from it,
//!   so they stand still while paused and ease back up afterwards.

use bevy_ecs::prelude::*;
use log::error;

use crate::components::mapposition::MapPosition;
use crate::components::parallax::{DEFAULT_LAYER_LENGTH, ParallaxLayer};
use crate::components::scale::Scale;
use crate::components::scroller::BackgroundScroller;
use crate::components::sprite::Sprite;
use crate::resources::camera2d::SceneCamera;
use crate::resources::worldtime::WorldTime;

/// Set the wrap length of freshly added layers from their sprite width.
pub fn init_parallax_layers(
    mut layers: Query<
        (Entity, &mut ParallaxLayer, Option<&Sprite>, Option<&Scale>),
        Added<ParallaxLayer>,
    >,
) {
    for (entity, mut layer, sprite, scale) in layers.iter_mut() {
        match sprite {
            Some(sprite) => {
                let sx = scale.map_or(1.0, |s| s.scale.x);
                layer.length = sprite.width * sx;
            }
            None => {
                error!(
                    "Parallax layer {:?} has no sprite; using length {}",
                    entity, DEFAULT_LAYER_LENGTH
                );
                layer.length = DEFAULT_LAYER_LENGTH;
            }
        }
    }
}

/// Scroll every parallax layer.
pub fn parallax_system(
    time: Res<WorldTime>,
    camera: Res<SceneCamera>,
    mut layers: Query<(
        &mut ParallaxLayer,
        &mut MapPosition,
        Option<&BackgroundScroller>,
    )>,
) {
    for (mut layer, mut pos, scroller) in layers.iter_mut() {
        let speed = scroller.map_or(layer.scroll_speed, BackgroundScroller::current_speed);
        pos.pos.x = layer.advance(camera.position.x, speed, time.delta);
    }
}
