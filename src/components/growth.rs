//! Hold-to-grow state of a spawned object.

use bevy_ecs::prelude::Component;

/// Scale grows linearly with the time its button is held, up to `max_scale`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Growth {
    /// Seconds the button has been held since spawn.
    pub timer: f32,
    /// Scale at spawn time.
    pub base_scale: f32,
    /// Upper bound of the scale.
    pub max_scale: f32,
}

impl Growth {
    pub fn new(base_scale: f32, max_scale: f32) -> Self {
        Self {
            timer: 0.0,
            base_scale,
            max_scale,
        }
    }

    /// Add `dt` seconds of holding and return the new uniform scale.
    pub fn grow(&mut self, dt: f32) -> f32 {
        self.timer += dt;
        self.current_scale()
    }

    pub fn current_scale(&self) -> f32 {
        (self.base_scale + self.timer).min(self.max_scale)
    }
}
