//! Button events.
//!
//! [`ButtonEvent`] is triggered by
//! [`button_input_system`](crate::systems::input::button_input_system) on
//! every press or release edge of one of the five logical buttons. The
//! spawner observer reacts to it; anything else interested in raw button
//! edges can add its own observer.

use bevy_ecs::prelude::*;

use crate::components::category::ObjectCategory;

/// Emitted when a button changes state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Button slot (0..5).
    pub slot: usize,
    /// Whether the button was pressed (true) or released (false).
    pub pressed: bool,
}

impl ButtonEvent {
    pub fn press(slot: usize) -> Self {
        Self {
            slot,
            pressed: true,
        }
    }

    pub fn release(slot: usize) -> Self {
        Self {
            slot,
            pressed: false,
        }
    }

    /// Category bound to this button.
    pub fn category(&self) -> Option<ObjectCategory> {
        ObjectCategory::from_slot(self.slot)
    }
}
