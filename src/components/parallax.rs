//! Endlessly wrapping parallax background layer.
//!
//! A [`ParallaxLayer`] scrolls its entity to the left at `scroll_speed` and
//! wraps its anchor by one `length` whenever the camera-relative offset drifts
//! a full tile away, so two copies of the same artwork side by side give an
//! endless strip. `parallax_effect` controls how much of the camera movement
//! the layer follows (0.0 = fixed in the world, 1.0 = glued to the camera).
//!
//! When the same entity also has a
//! [`BackgroundScroller`](super::scroller::BackgroundScroller), the layer
//! speed is taken from the scroller instead so it can pause and ease.

use bevy_ecs::prelude::Component;

/// Default wrap length used when the layer has no sprite to measure.
pub const DEFAULT_LAYER_LENGTH: f32 = 10.0;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct ParallaxLayer {
    /// Scroll anchor on the X axis (world units).
    pub start_position: f32,
    /// Width of one tile of the layer; the wrap distance.
    pub length: f32,
    /// Fraction of camera movement the layer follows.
    pub parallax_effect: f32,
    /// Own scroll speed in world units per second.
    pub scroll_speed: f32,
}

impl ParallaxLayer {
    pub fn new(start_position: f32, length: f32, parallax_effect: f32, scroll_speed: f32) -> Self {
        Self {
            start_position,
            length,
            parallax_effect,
            scroll_speed,
        }
    }

    /// Scroll the anchor by `speed * dt`, then wrap relative to `camera_x`.
    ///
    /// Returns the new world X of the layer.
    pub fn advance(&mut self, camera_x: f32, speed: f32, dt: f32) -> f32 {
        self.start_position -= speed * dt;
        let temp = camera_x * (1.0 - self.parallax_effect);
        let distance = camera_x * self.parallax_effect;
        let x = self.start_position + distance;

        if temp > self.start_position + self.length {
            self.start_position += self.length;
        } else if temp < self.start_position - self.length {
            self.start_position -= self.length;
        }
        x
    }
}
