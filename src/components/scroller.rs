//! Background scroller with station pauses and eased restarts.
//!
//! The scroller owns the world's scroll speed. Its [`ScrollState`] is a small
//! per-entity state machine advanced once per tick by
//! [`scroller_system`](crate::systems::scroller::scroller_system):
//!
//! ```text
//!   Idle ──set_pause(true)──▶ Paused
//!   Idle ──pause_for(t)──▶ Paused ──t elapsed──▶ Easing
//!   Paused ──set_pause(false)──▶ Idle
//!   Paused ──resume_scroll()──▶ Easing ──elapsed ≥ duration──▶ Idle
//! ```
//!
//! While not paused a spawn timer accumulates and, every `spawn_interval`
//! seconds, the system spawns a passing station object.

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

use crate::components::tween::Easing;

/// Scroll state of a [`BackgroundScroller`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollState {
    /// Steady scrolling at full speed.
    Idle,
    /// Speeding up from 0 to `target` over `duration` seconds.
    Easing {
        target: f32,
        elapsed: f32,
        duration: f32,
    },
    /// Stopped. `remaining` is `Some` for self-timed pauses (stations) and
    /// `None` for a pause held until `set_pause(false)`.
    Paused { remaining: Option<f32> },
}

#[derive(Component, Clone, Debug)]
pub struct BackgroundScroller {
    /// Full scroll speed in world units per second.
    pub scroll_speed: f32,
    pub state: ScrollState,
    /// Curve used by [`BackgroundScroller::resume_scroll`].
    pub easing: Easing,
    /// Duration of the eased restart in seconds.
    pub ease_duration: f32,
    /// Seconds between passing object spawns.
    pub spawn_interval: f32,
    /// Time accumulated toward the next spawn.
    pub spawn_timer: f32,
    /// Offset from the camera position where passing objects appear.
    pub spawn_offset: Vec2,
    /// Prefab key for passing objects.
    pub passing_prefab: String,
    /// Horizontal speed given to spawned passing objects.
    pub passing_speed: f32,
    /// How long a passing object holds the scroll.
    pub passing_pause: f32,
    /// Seconds before a passing object despawns.
    pub passing_lifetime: f32,
}

impl BackgroundScroller {
    pub fn new(scroll_speed: f32, spawn_interval: f32) -> Self {
        Self {
            scroll_speed,
            state: ScrollState::Idle,
            easing: Easing::default(),
            ease_duration: 2.0,
            spawn_interval,
            spawn_timer: 0.0,
            spawn_offset: Vec2::new(10.0, 0.0),
            passing_prefab: "station".into(),
            passing_speed: 5.0,
            passing_pause: 5.0,
            passing_lifetime: 15.0,
        }
    }

    pub fn with_easing(mut self, easing: Easing, duration: f32) -> Self {
        self.easing = easing;
        self.ease_duration = duration;
        self
    }

    pub fn with_passing(mut self, prefab: impl Into<String>, speed: f32, offset: Vec2) -> Self {
        self.passing_prefab = prefab.into();
        self.passing_speed = speed;
        self.spawn_offset = offset;
        self
    }

    pub fn with_passing_timing(mut self, pause: f32, lifetime: f32) -> Self {
        self.passing_pause = pause;
        self.passing_lifetime = lifetime;
        self
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, ScrollState::Paused { .. })
    }

    /// Pause (hold) or unpause the scroller.
    ///
    /// Unpausing jumps straight back to full speed; use
    /// [`resume_scroll`](Self::resume_scroll) for an eased restart.
    pub fn set_pause(&mut self, pause: bool) {
        if pause {
            self.state = ScrollState::Paused { remaining: None };
        } else if self.is_paused() {
            self.state = ScrollState::Idle;
        }
    }

    /// Pause for a fixed number of seconds, then resume with easing.
    pub fn pause_for(&mut self, seconds: f32) {
        self.state = ScrollState::Paused {
            remaining: Some(seconds),
        };
    }

    /// Start an eased restart from standstill up to `scroll_speed`.
    pub fn resume_scroll(&mut self) {
        if self.ease_duration <= 0.0 {
            self.state = ScrollState::Idle;
            return;
        }
        self.state = ScrollState::Easing {
            target: self.scroll_speed,
            elapsed: 0.0,
            duration: self.ease_duration,
        };
    }

    /// Speed for the current state.
    pub fn current_speed(&self) -> f32 {
        match self.state {
            ScrollState::Idle => self.scroll_speed,
            ScrollState::Easing {
                target,
                elapsed,
                duration,
            } => target * self.easing.apply(elapsed / duration),
            ScrollState::Paused { .. } => 0.0,
        }
    }

    /// Advance timed states by `dt`.
    pub fn tick_state(&mut self, dt: f32) {
        match &mut self.state {
            ScrollState::Idle => {}
            ScrollState::Easing {
                elapsed, duration, ..
            } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    self.state = ScrollState::Idle;
                }
            }
            ScrollState::Paused { remaining } => {
                if let Some(r) = remaining {
                    *r -= dt;
                    if *r <= 0.0 {
                        self.resume_scroll();
                    }
                }
            }
        }
    }

    /// Accumulate the spawn timer; returns true when a passing object is due.
    ///
    /// Never fires while paused.
    pub fn tick_spawn_timer(&mut self, dt: f32) -> bool {
        if self.is_paused() {
            return false;
        }
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            return true;
        }
        false
    }
}
