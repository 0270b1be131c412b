//! Interval spawner for ambient props.
//!
//! A [`MiscSpawner`] fires every `interval` seconds and instantiates one of
//! its entries, chosen at random, at that entry's fixed position.

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

/// One candidate spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnEntry {
    /// Prefab key in the [`PrefabStore`](crate::resources::prefabs::PrefabStore).
    pub prefab: String,
    /// World position of the spawned root.
    pub position: Vec2,
    /// Optional lifetime of the spawned prop.
    pub ttl: Option<f32>,
}

impl SpawnEntry {
    pub fn new(prefab: impl Into<String>, position: Vec2) -> Self {
        Self {
            prefab: prefab.into(),
            position,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, seconds: f32) -> Self {
        self.ttl = Some(seconds);
        self
    }
}

#[derive(Component, Clone, Debug)]
pub struct MiscSpawner {
    pub entries: Vec<SpawnEntry>,
    /// Seconds between spawns.
    pub interval: f32,
    /// Time accumulated toward the next spawn.
    pub timer: f32,
    /// Layer requested for spawned props.
    pub layer: String,
}

impl MiscSpawner {
    pub fn new(entries: Vec<SpawnEntry>, interval: f32) -> Self {
        Self {
            entries,
            interval,
            timer: 0.0,
            layer: "Ground".to_string(),
        }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Accumulate time; returns true when a spawn is due (and resets the timer).
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_fires_and_resets() {
        let mut s = MiscSpawner::new(vec![SpawnEntry::new("tractor", Vec2::ZERO)], 10.0);
        assert!(!s.tick(9.9));
        assert!(s.tick(0.2));
        assert_eq!(s.timer, 0.0);
    }
}
