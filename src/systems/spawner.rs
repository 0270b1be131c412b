//! Object spawning and growth.
//!
//! - [`on_button_event`] observer: a press spawns the category's prefab, a
//!   release stops its growth.
//! - [`object_growth_system`] grows the current instance of every held
//!   button: `scale = min(base + held_time, max)`.
//!
//! Spawned objects carry their [`ObjectCategory`], a [`Growth`] timer, a
//! [`StickerDrift`] and a [`LayerRequest`] for the category's layer.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use log::{debug, warn};

use crate::components::category::ObjectCategory;
use crate::components::growth::Growth;
use crate::components::layer::LayerRequest;
use crate::components::scale::Scale;
use crate::components::scroller::BackgroundScroller;
use crate::components::sticker::StickerDrift;
use crate::events::input::ButtonEvent;
use crate::resources::input::ButtonPad;
use crate::resources::prefabs::PrefabStore;
use crate::resources::spawner::{ObjectSpawner, SpawnRng};
use crate::resources::worldtime::WorldTime;

/// Spawn one object of `category` and make it the growing instance.
pub fn spawn_object(
    commands: &mut Commands,
    spawner: &mut ObjectSpawner,
    prefabs: &PrefabStore,
    rng: &mut fastrand::Rng,
    category: ObjectCategory,
) -> Option<Entity> {
    let position = spawner.spawn_position(category, rng);
    let entity = prefabs.instantiate(commands, category.key(), position)?;
    let settings = spawner.settings(category);
    commands.entity(entity).insert((
        category,
        Scale::uniform(settings.base_scale),
        Growth::new(settings.base_scale, settings.max_scale),
        StickerDrift::new(spawner.drift_speed, spawner.drift_acceleration)
            .with_collect_x(spawner.collect_x),
        LayerRequest::new(settings.layer.clone()),
    ));
    spawner.record_spawn(category, entity);
    debug!(
        "Spawned {:?} {:?} at ({:.1}, {:.1})",
        category, entity, position.x, position.y
    );
    Some(entity)
}

/// Grow the category's current instance by `dt`. Returns the new scale.
///
/// An instance that no longer exists (or stopped being growable) is forgotten.
pub fn grow_object(
    spawner: &mut ObjectSpawner,
    category: ObjectCategory,
    dt: f32,
    objects: &mut Query<(&mut Growth, &mut Scale)>,
) -> Option<f32> {
    let entity = spawner.growing(category)?;
    match objects.get_mut(entity) {
        Ok((mut growth, mut scale)) => {
            let s = growth.grow(dt);
            scale.scale = Vec2::splat(s);
            Some(s)
        }
        Err(_) => {
            spawner.reset_state(category);
            None
        }
    }
}

/// Observer: spawn on press, stop growing on release.
pub fn on_button_event(
    trigger: On<ButtonEvent>,
    mut commands: Commands,
    mut spawner: ResMut<ObjectSpawner>,
    prefabs: Res<PrefabStore>,
    mut rng: ResMut<SpawnRng>,
) {
    let event = trigger.event();
    let Some(category) = event.category() else {
        warn!("Button event for unknown slot {}", event.slot);
        return;
    };
    if event.pressed {
        spawn_object(&mut commands, &mut spawner, &prefabs, &mut rng.0, category);
    } else {
        spawner.reset_state(category);
    }
}

/// Grow the current instance of every held button.
///
/// Nothing grows while the background is paused.
pub fn object_growth_system(
    time: Res<WorldTime>,
    pad: Res<ButtonPad>,
    mut spawner: ResMut<ObjectSpawner>,
    scrollers: Query<&BackgroundScroller>,
    mut objects: Query<(&mut Growth, &mut Scale)>,
) {
    if scrollers.iter().any(BackgroundScroller::is_paused) {
        return;
    }
    for category in pad.held_slots().filter_map(ObjectCategory::from_slot) {
        grow_object(&mut spawner, category, time.delta, &mut objects);
    }
}
