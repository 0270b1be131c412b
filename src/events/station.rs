//! Station arrival event.
//!
//! Triggered once per passing object, the moment it reaches the center of the
//! view and pauses the background. The board observer
//! [`snap_stickers_to_board`](crate::systems::stickerboard::snap_stickers_to_board)
//! lays out the collected stickers in response.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct StationArrivedEvent {
    /// The passing object that stopped.
    pub station: Entity,
}
