//! Misc prop spawner system.
//!
//! Every [`MiscSpawner`] counts up to its interval and then instantiates one
//! randomly chosen entry at the entry's fixed position, with an optional TTL.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::layer::LayerRequest;
use crate::components::miscspawner::MiscSpawner;
use crate::components::ttl::Ttl;
use crate::resources::prefabs::PrefabStore;
use crate::resources::spawner::SpawnRng;
use crate::resources::worldtime::WorldTime;

pub fn misc_spawner_system(
    time: Res<WorldTime>,
    prefabs: Res<PrefabStore>,
    mut rng: ResMut<SpawnRng>,
    mut spawners: Query<&mut MiscSpawner>,
    mut commands: Commands,
) {
    for mut spawner in spawners.iter_mut() {
        if !spawner.tick(time.delta) || spawner.entries.is_empty() {
            continue;
        }
        let entry = &spawner.entries[rng.0.usize(..spawner.entries.len())];
        let Some(entity) = prefabs.instantiate(&mut commands, &entry.prefab, entry.position) else {
            continue;
        };
        commands
            .entity(entity)
            .insert(LayerRequest::new(spawner.layer.clone()));
        if let Some(ttl) = entry.ttl {
            commands.entity(entity).insert(Ttl::new(ttl));
        }
        debug!("Misc spawner placed '{}' as {:?}", entry.prefab, entity);
    }
}
