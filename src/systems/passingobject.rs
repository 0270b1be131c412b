//! Passing object system.
//!
//! Moves station objects left and runs their stop-once state machine:
//!
//! 1. `Approaching`: move; on reaching the view center, pause the background,
//!    trigger [`StationArrivedEvent`] and stop.
//! 2. `Paused`: count down `pause_duration`, then unpause the background with
//!    an eased restart.
//!
//! The background pause is timed on the scroller itself, so it ends even if
//! the station is despawned while stopped.
//! 3. `Departed`: move until the TTL removes the object.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::mapposition::MapPosition;
use crate::components::passingobject::{PassingObject, PassingState, reached_center};
use crate::components::scroller::BackgroundScroller;
use crate::events::station::StationArrivedEvent;
use crate::resources::camera2d::SceneCamera;
use crate::resources::worldtime::WorldTime;

pub fn passing_object_system(
    time: Res<WorldTime>,
    camera: Res<SceneCamera>,
    mut objects: Query<(Entity, &mut PassingObject, &mut MapPosition)>,
    mut scrollers: Query<&mut BackgroundScroller>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut passing, mut pos) in objects.iter_mut() {
        match passing.state {
            PassingState::Approaching => {
                let before = camera.world_to_viewport(pos.pos).x;
                pos.pos.x -= passing.speed * dt;
                let after = camera.world_to_viewport(pos.pos).x;
                if !reached_center(before, after) {
                    continue;
                }
                passing.state = PassingState::Paused {
                    remaining: passing.pause_duration,
                };
                match passing.background.map(|bg| scrollers.get_mut(bg)) {
                    Some(Ok(mut scroller)) => scroller.pause_for(passing.pause_duration),
                    _ => warn!("Passing object {:?} has no background to pause", entity),
                }
                info!("Station {:?} arrived", entity);
                commands.trigger(StationArrivedEvent { station: entity });
            }
            PassingState::Paused { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    passing.state = PassingState::Paused { remaining };
                    continue;
                }
                if let Some(Ok(mut scroller)) = passing.background.map(|bg| scrollers.get_mut(bg)) {
                    if scroller.is_paused() {
                        scroller.resume_scroll();
                    }
                }
                passing.state = PassingState::Departed;
                info!("Station {:?} departed", entity);
            }
            PassingState::Departed => {
                pos.pos.x -= passing.speed * dt;
            }
        }
    }
}
