//! Button input system.
//!
//! - [`button_input_system`] polls the active
//!   [`ButtonSource`](crate::resources::buttonsource::ButtonSource) once per
//!   frame, folds the result into [`ButtonPad`] and triggers a [`ButtonEvent`]
//!   for every press or release edge.
//!
//! While any background scroller is paused (the train is at a station) the
//! source is still drained but its frames are ignored, so nothing spawns and
//! the previous held states stay as they were.
use bevy_ecs::prelude::*;
use log::{error, warn};

use crate::components::scroller::BackgroundScroller;
use crate::events::input::ButtonEvent;
use crate::resources::buttonsource::{ButtonInput, InputError};
use crate::resources::input::ButtonPad;

/// Poll the button source and update the `ButtonPad` resource.
pub fn button_input_system(
    input: Option<ResMut<ButtonInput>>,
    mut pad: ResMut<ButtonPad>,
    scrollers: Query<&BackgroundScroller>,
    mut commands: Commands,
) {
    pad.clear_edges();
    let Some(mut input) = input else {
        return;
    };

    let frame = match input.poll() {
        Ok(frame) => {
            input.disconnected = false;
            frame
        }
        Err(InputError::Disconnected) => {
            if !input.disconnected {
                warn!("[input] {} disconnected; holding last state", input.describe());
                input.disconnected = true;
            }
            None
        }
        Err(e) => {
            error!("[input] error reading from {}: {}", input.describe(), e);
            None
        }
    };

    let Some(frame) = frame else {
        return;
    };
    if scrollers.iter().any(BackgroundScroller::is_paused) {
        return;
    }

    for event in pad.apply_frame(frame) {
        commands.trigger(event);
    }
}
