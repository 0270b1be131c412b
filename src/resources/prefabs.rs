//! Prefab definitions and instantiation.
//!
//! A prefab is a root entity with an optional sprite plus any number of child
//! parts. Prefabs are keyed by name (`cow`, `station`, `board`...). The store
//! starts from built-in shapes and can be extended or overridden from a JSON
//! file:
//!
//! ```json
//! {
//!   "cow": { "sprite": { "tex_key": "cow", "width": 4.0, "height": 3.0 }, "z": 2 },
//!   "windmill": {
//!     "sprite": { "tex_key": "windmill_body", "width": 3.0, "height": 6.0 },
//!     "parts": [
//!       { "sprite": { "tex_key": "windmill_blades", "width": 5.0, "height": 5.0 },
//!         "offset": [0.0, 2.0], "z": 1 }
//!     ]
//!   }
//! }
//! ```

use std::path::Path;

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::gameconfig::ConfigError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PrefabSprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
}

impl PrefabSprite {
    fn new(tex_key: &str, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.to_string(),
            width,
            height,
        }
    }

    fn to_sprite(&self) -> Sprite {
        Sprite::new(self.tex_key.clone(), self.width, self.height)
    }
}

/// A child of a prefab root, positioned relative to it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PrefabPart {
    pub sprite: PrefabSprite,
    #[serde(default)]
    pub offset: [f32; 2],
    #[serde(default)]
    pub z: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Prefab {
    /// Root sprite. Roots without one act as plain containers.
    #[serde(default)]
    pub sprite: Option<PrefabSprite>,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub parts: Vec<PrefabPart>,
}

impl Prefab {
    fn single(tex_key: &str, width: f32, height: f32, z: i32) -> Self {
        Self {
            sprite: Some(PrefabSprite::new(tex_key, width, height)),
            z,
            parts: Vec::new(),
        }
    }

    fn with_part(mut self, tex_key: &str, width: f32, height: f32, offset: [f32; 2]) -> Self {
        self.parts.push(PrefabPart {
            sprite: PrefabSprite::new(tex_key, width, height),
            offset,
            z: self.z + 1,
        });
        self
    }
}

/// Named prefab definitions.
#[derive(Resource, Debug, Clone, Default)]
pub struct PrefabStore {
    prefabs: FxHashMap<String, Prefab>,
}

impl PrefabStore {
    /// Store holding the built-in shapes.
    pub fn builtin() -> Self {
        let mut store = Self::default();
        store.insert("cow", Prefab::single("cow", 4.0, 3.0, 2));
        store.insert("cloud", Prefab::single("cloud", 5.0, 3.0, 1));
        // Flowers are a stem and a bloom with no root sprite.
        store.insert(
            "flower",
            Prefab {
                sprite: None,
                z: 3,
                parts: Vec::new(),
            }
            .with_part("flower_stem", 0.5, 2.0, [0.0, -1.0])
            .with_part("flower_bloom", 1.5, 1.5, [0.0, 0.5]),
        );
        store.insert(
            "windmill",
            Prefab::single("windmill_body", 3.0, 6.0, 2).with_part(
                "windmill_blades",
                5.0,
                5.0,
                [0.0, 2.0],
            ),
        );
        store.insert("tree", Prefab::single("tree", 4.0, 6.0, 2));
        store.insert("station", Prefab::single("station", 12.0, 8.0, 0));
        store.insert("board", Prefab::single("information_board", 15.0, 20.0, 0));
        store.insert("sky", Prefab::single("sky", 40.0, 20.0, 0));
        store.insert("hills", Prefab::single("hills", 40.0, 10.0, 0));
        store.insert("ground", Prefab::single("ground", 40.0, 12.0, 1));
        store.insert("tractor", Prefab::single("tractor", 4.0, 3.0, 1));
        store.insert("balloon", Prefab::single("balloon", 3.0, 4.0, 1));
        store
    }

    /// Built-in shapes overridden and extended by a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::PrefabIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut store = Self::builtin();
        let loaded = store
            .merge_json(&content)
            .map_err(|source| ConfigError::PrefabParse {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded {} prefab(s) from {:?}", loaded, path);
        Ok(store)
    }

    /// Merge definitions from a JSON object; returns how many were read.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let parsed: FxHashMap<String, Prefab> = serde_json::from_str(json)?;
        let count = parsed.len();
        self.prefabs.extend(parsed);
        Ok(count)
    }

    pub fn insert(&mut self, key: impl Into<String>, prefab: Prefab) {
        self.prefabs.insert(key.into(), prefab);
    }

    pub fn get(&self, key: &str) -> Option<&Prefab> {
        self.prefabs.get(key)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    /// Spawn a prefab's root (and its parts as children) at `position`.
    ///
    /// Returns `None` and logs a warning for unknown keys.
    pub fn instantiate(&self, commands: &mut Commands, key: &str, position: Vec2) -> Option<Entity> {
        let Some(prefab) = self.get(key) else {
            warn!("Unknown prefab '{}'", key);
            return None;
        };

        let mut root = commands.spawn((
            MapPosition::from_vec(position),
            Scale::default(),
            ZIndex(prefab.z),
            GlobalTransform2D::default(),
        ));
        if let Some(sprite) = &prefab.sprite {
            root.insert(sprite.to_sprite());
        }
        let root = root.id();

        for part in &prefab.parts {
            commands.spawn((
                MapPosition::new(part.offset[0], part.offset[1]),
                part.sprite.to_sprite(),
                ZIndex(part.z),
                GlobalTransform2D::default(),
                ChildOf(root),
            ));
        }

        Some(root)
    }
}
