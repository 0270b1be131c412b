//! Object spawner bookkeeping.
//!
//! [`ObjectSpawner`] remembers, per category, which instance is currently
//! growing (its button is held) and how many objects were spawned since the
//! last reset. The ECS side of spawning lives in
//! [`crate::systems::spawner`].

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use rustc_hash::FxHashMap;

use crate::components::category::ObjectCategory;
use crate::resources::gameconfig::{CategorySettings, GameConfig};

/// Random source for spawn heights and misc spawner choices.
#[derive(Resource, Debug, Clone)]
pub struct SpawnRng(pub fastrand::Rng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

impl SpawnRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ObjectSpawner {
    /// X coordinate of every spawn.
    pub spawn_x: f32,
    /// Indexed by button slot.
    pub settings: [CategorySettings; 5],
    /// Initial drift speed given to spawned objects.
    pub drift_speed: f32,
    pub drift_acceleration: f32,
    pub collect_x: f32,
    growing: FxHashMap<ObjectCategory, Entity>,
    counts: FxHashMap<ObjectCategory, u32>,
}

impl Default for ObjectSpawner {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl ObjectSpawner {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            spawn_x: config.spawn_x,
            settings: config.categories.clone(),
            drift_speed: config.drift_speed,
            drift_acceleration: config.drift_acceleration,
            collect_x: config.collect_x,
            growing: FxHashMap::default(),
            counts: FxHashMap::default(),
        }
    }

    pub fn settings(&self, category: ObjectCategory) -> &CategorySettings {
        &self.settings[category.slot()]
    }

    /// Spawn point for a category: fixed X, uniformly random Y in range.
    pub fn spawn_position(&self, category: ObjectCategory, rng: &mut fastrand::Rng) -> Vec2 {
        let s = self.settings(category);
        let (lo, hi) = if s.min_y <= s.max_y {
            (s.min_y, s.max_y)
        } else {
            (s.max_y, s.min_y)
        };
        Vec2::new(self.spawn_x, lo + rng.f32() * (hi - lo))
    }

    /// Record a fresh instance: it becomes the growing one and the count goes up.
    pub fn record_spawn(&mut self, category: ObjectCategory, entity: Entity) {
        self.growing.insert(category, entity);
        *self.counts.entry(category).or_insert(0) += 1;
    }

    /// The instance currently growing for a category.
    pub fn growing(&self, category: ObjectCategory) -> Option<Entity> {
        self.growing.get(&category).copied()
    }

    /// Stop growing the category's current instance. The object keeps its scale.
    pub fn reset_state(&mut self, category: ObjectCategory) {
        self.growing.remove(&category);
    }

    pub fn spawn_counts(&self) -> &FxHashMap<ObjectCategory, u32> {
        &self.counts
    }

    pub fn count(&self, category: ObjectCategory) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total_spawned(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn reset_spawn_counts(&mut self) {
        self.counts.clear();
    }
}
