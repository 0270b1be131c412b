//! Spawnable object categories.
//!
//! Each of the five logical buttons maps to one [`ObjectCategory`]. The
//! category is also stored on spawned entities so systems and tests can find
//! "all windmills" without a separate group registry.

use bevy_ecs::prelude::Component;

/// Kind of world object a button spawns and grows.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectCategory {
    Cow,
    Cloud,
    Flower,
    Windmill,
    Tree,
}

impl ObjectCategory {
    /// All categories in button-slot order.
    pub const ALL: [ObjectCategory; 5] = [
        ObjectCategory::Cow,
        ObjectCategory::Cloud,
        ObjectCategory::Flower,
        ObjectCategory::Windmill,
        ObjectCategory::Tree,
    ];

    /// Category bound to a button slot (0..5).
    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// Button slot of this category.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Lowercase key used in config files and prefab stores.
    pub fn key(self) -> &'static str {
        match self {
            ObjectCategory::Cow => "cow",
            ObjectCategory::Cloud => "cloud",
            ObjectCategory::Flower => "flower",
            ObjectCategory::Windmill => "windmill",
            ObjectCategory::Tree => "tree",
        }
    }
}
