//! Sticker drift and collection.
//!
//! Every spawned object drifts left with a speed that grows over time. While
//! the background is paused the drift stops. Once an object passes its
//! `collect_x` threshold the drift is removed and the entity is handed to the
//! [`StickerCollector`], preserving the order in which objects leave the view.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::mapposition::MapPosition;
use crate::components::scroller::BackgroundScroller;
use crate::components::sticker::StickerDrift;
use crate::resources::collector::StickerCollector;
use crate::resources::worldtime::WorldTime;

pub fn sticker_drift_system(
    time: Res<WorldTime>,
    scrollers: Query<&BackgroundScroller>,
    mut stickers: Query<(Entity, &mut StickerDrift, &mut MapPosition)>,
    mut collector: Option<ResMut<StickerCollector>>,
    mut commands: Commands,
) {
    let paused = scrollers.iter().any(BackgroundScroller::is_paused);
    for (entity, mut drift, mut pos) in stickers.iter_mut() {
        pos.pos.x += drift.step(time.delta, paused);
        if pos.pos.x >= drift.collect_x {
            continue;
        }
        commands.entity(entity).remove::<StickerDrift>();
        if let Some(collector) = collector.as_mut() {
            collector.add_sticker(entity);
            debug!("Collected sticker {:?} ({} waiting)", entity, collector.len());
        }
    }
}
