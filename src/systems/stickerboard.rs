//! Station board observer.
//!
//! [`snap_stickers_to_board`] runs on every [`StationArrivedEvent`]. It
//! despawns the stickers pinned at the previous station, plans a grid for the
//! newly collected batch and reparents each sticker under the board at its
//! cell, scaled to the cell size.
//!
//! A missing board, a board without a sprite or an invalid board size is
//! logged and leaves the collector untouched.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use log::{error, info};

use crate::components::growth::Growth;
use crate::components::layer::LayerRequest;
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::sticker::{OnBoard, StickerDrift};
use crate::components::stickerboard::{StickerBoard, plan_grid, sticker_scale};
use crate::components::ttl::Ttl;
use crate::events::station::StationArrivedEvent;
use crate::resources::collector::StickerCollector;

/// Layer given to stickers pinned on the board.
pub const BOARD_LAYER: &str = "Board";

pub fn snap_stickers_to_board(
    trigger: On<StationArrivedEvent>,
    mut collector: ResMut<StickerCollector>,
    boards: Query<(Entity, &StickerBoard, Option<&Sprite>, Option<&Scale>)>,
    stickers: Query<Option<&Sprite>>,
    mut commands: Commands,
) {
    let station = trigger.event().station;

    let (board_entity, board, sprite, scale) = match boards.single() {
        Ok(found) => found,
        Err(e) => {
            error!("Cannot snap stickers at station {:?}: {}", station, e);
            return;
        }
    };
    let Some(sprite) = sprite else {
        error!("Sticker board {:?} has no sprite to measure", board_entity);
        return;
    };
    let measured = Vec2::new(sprite.width, sprite.height) * scale.map_or(Vec2::ONE, |s| s.scale);
    let size = board.usable_size(measured);

    // Stickers may have been despawned while waiting.
    let batch: Vec<Entity> = collector
        .collected()
        .iter()
        .copied()
        .filter(|e| stickers.contains(*e))
        .collect();

    let plan = match plan_grid(size.x, size.y, board.min_cell_size, batch.len()) {
        Ok(Some(plan)) => plan,
        Ok(None) => return,
        Err(e) => {
            error!("Cannot lay out sticker board {:?}: {}", board_entity, e);
            return;
        }
    };

    for old in collector.replace_on_board(Vec::new()) {
        commands.entity(old).try_despawn();
    }

    for (&sticker, local) in batch.iter().zip(plan.positions(batch.len())) {
        let natural_width = stickers.get(sticker).ok().flatten().map(|s| s.width);
        let s = sticker_scale(plan.cell_size, natural_width);
        commands
            .entity(sticker)
            .remove::<(StickerDrift, Growth, Ttl)>()
            .insert((
                ChildOf(board_entity),
                MapPosition::from_vec(local),
                Scale::uniform(s),
                OnBoard,
                LayerRequest::new(BOARD_LAYER),
            ));
    }

    info!(
        "Snapped {} sticker(s) to board: {}x{} grid, cell {:.2} (max {}x{})",
        batch.len(),
        plan.cols,
        plan.rows,
        plan.cell_size,
        plan.max_cols,
        plan.max_rows
    );

    collector.take_collected();
    collector.replace_on_board(batch);
}
