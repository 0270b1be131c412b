//! Passing station object.
//!
//! A [`PassingObject`] slides right-to-left through the view. The first time
//! it crosses the middle of the viewport it stops, holds its background
//! scroller paused for `pause_duration` seconds (the train is "at the
//! station"), then releases the scroller with an eased restart and leaves.
//!
//! The background is an explicit [`Entity`] reference handed over at spawn
//! time.

use bevy_ecs::prelude::{Component, Entity};

/// Lower bound of the viewport X window that counts as "centered".
pub const CENTER_WINDOW_MIN: f32 = 0.49;
/// Upper bound of the viewport X window that counts as "centered".
pub const CENTER_WINDOW_MAX: f32 = 0.50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassingState {
    /// Moving toward the middle of the view.
    Approaching,
    /// Stopped at the station.
    Paused { remaining: f32 },
    /// Already stopped once; just moving away.
    Departed,
}

#[derive(Component, Clone, Debug)]
pub struct PassingObject {
    /// Speed in world units per second (moves to the left).
    pub speed: f32,
    /// Seconds to stay at the station.
    pub pause_duration: f32,
    /// Scroller entity paused while stopped.
    pub background: Option<Entity>,
    pub state: PassingState,
}

impl PassingObject {
    pub fn new(speed: f32, pause_duration: f32, background: Option<Entity>) -> Self {
        Self {
            speed,
            pause_duration,
            background,
            state: PassingState::Approaching,
        }
    }

    pub fn has_paused(&self) -> bool {
        !matches!(self.state, PassingState::Approaching)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, PassingState::Paused { .. })
    }
}

/// True when a viewport X coordinate lies in the centered window.
pub fn is_centered(viewport_x: f32) -> bool {
    (CENTER_WINDOW_MIN..=CENTER_WINDOW_MAX).contains(&viewport_x)
}

/// True when a leftward move from `previous_x` to `viewport_x` (viewport
/// coordinates) lands in or jumps over the centered window.
pub fn reached_center(previous_x: f32, viewport_x: f32) -> bool {
    is_centered(viewport_x) || (previous_x > CENTER_WINDOW_MAX && viewport_x < CENTER_WINDOW_MIN)
}
