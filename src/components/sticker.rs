//! Sticker drift and board markers.
//!
//! Every object a player spawns is a future sticker: it drifts left with the
//! landscape and, once it is far enough off-screen, it is handed to the
//! [`StickerCollector`](crate::resources::collector::StickerCollector)
//! instead of being destroyed.

use bevy_ecs::prelude::Component;

/// X coordinate past which a drifting sticker is collected.
pub const DEFAULT_COLLECT_X: f32 = -40.0;

/// Leftward drift that speeds up over time and stops while the scroll is paused.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct StickerDrift {
    /// Initial speed in world units per second.
    pub scroll_speed: f32,
    /// Speed increase per second of unpaused drifting.
    pub acceleration: f32,
    /// Current speed.
    pub current_speed: f32,
    /// Collection threshold on the X axis.
    pub collect_x: f32,
}

impl StickerDrift {
    pub fn new(scroll_speed: f32, acceleration: f32) -> Self {
        Self {
            scroll_speed,
            acceleration,
            current_speed: scroll_speed,
            collect_x: DEFAULT_COLLECT_X,
        }
    }

    pub fn with_collect_x(mut self, collect_x: f32) -> Self {
        self.collect_x = collect_x;
        self
    }

    /// Horizontal displacement for this tick (negative = left).
    pub fn step(&mut self, dt: f32, paused: bool) -> f32 {
        if paused {
            return 0.0;
        }
        self.current_speed += self.acceleration * dt;
        -self.current_speed * dt
    }
}

/// Marks a sticker currently placed on the station board.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct OnBoard;
