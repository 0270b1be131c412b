//! Background scroller system.
//!
//! Advances every [`BackgroundScroller`] state machine and spawns a passing
//! station object each `spawn_interval` seconds of unpaused scrolling. The
//! passing object is placed at `camera + spawn_offset` and holds a reference
//! to the scroller so it can pause it.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use log::info;

use crate::components::layer::LayerRequest;
use crate::components::passingobject::PassingObject;
use crate::components::scroller::BackgroundScroller;
use crate::components::ttl::Ttl;
use crate::resources::camera2d::SceneCamera;
use crate::resources::prefabs::PrefabStore;
use crate::resources::worldtime::WorldTime;

/// Layer given to passing objects.
pub const STATION_LAYER: &str = "Station";

/// Spawn a passing object bound to `scroller_entity`.
pub fn spawn_passing_object(
    commands: &mut Commands,
    prefabs: &PrefabStore,
    scroller_entity: Entity,
    scroller: &BackgroundScroller,
    position: Vec2,
) -> Option<Entity> {
    let entity = prefabs.instantiate(commands, &scroller.passing_prefab, position)?;
    commands.entity(entity).insert((
        PassingObject::new(
            scroller.passing_speed,
            scroller.passing_pause,
            Some(scroller_entity),
        ),
        Ttl::new(scroller.passing_lifetime),
        LayerRequest::new(STATION_LAYER),
    ));
    info!(
        "Passing object {:?} spawned at ({:.1}, {:.1})",
        entity, position.x, position.y
    );
    Some(entity)
}

/// Tick scroll states and spawn passing objects.
pub fn scroller_system(
    time: Res<WorldTime>,
    camera: Res<SceneCamera>,
    prefabs: Res<PrefabStore>,
    mut scrollers: Query<(Entity, &mut BackgroundScroller)>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut scroller) in scrollers.iter_mut() {
        scroller.tick_state(dt);
        if scroller.tick_spawn_timer(dt) {
            let position = camera.position + scroller.spawn_offset;
            spawn_passing_object(&mut commands, &prefabs, entity, &scroller, position);
        }
    }
}
