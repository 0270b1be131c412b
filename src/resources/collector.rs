//! Sticker collection resource.
//!
//! Stickers that drift past the collection line are appended here in the
//! order they leave the screen. At the next station the board observer takes
//! the whole batch, pins it to the board and remembers it so the following
//! station can clear it.

use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Default, Clone)]
pub struct StickerCollector {
    collected: Vec<Entity>,
    on_board: Vec<Entity>,
}

impl StickerCollector {
    /// Append a sticker. Entities already waiting are not added twice.
    pub fn add_sticker(&mut self, sticker: Entity) {
        if !self.collected.contains(&sticker) {
            self.collected.push(sticker);
        }
    }

    /// Stickers waiting for the next station, oldest first.
    pub fn collected(&self) -> &[Entity] {
        &self.collected
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    /// Take the waiting batch, leaving the collector empty.
    pub fn take_collected(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.collected)
    }

    /// Stickers pinned at the last station.
    pub fn on_board(&self) -> &[Entity] {
        &self.on_board
    }

    /// Replace the pinned batch, returning the previous one.
    pub fn replace_on_board(&mut self, stickers: Vec<Entity>) -> Vec<Entity> {
        std::mem::replace(&mut self.on_board, stickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keeps_order_and_skips_duplicates() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut collector = StickerCollector::default();
        collector.add_sticker(b);
        collector.add_sticker(a);
        collector.add_sticker(b);
        assert_eq!(collector.collected(), &[b, a]);

        let batch = collector.take_collected();
        assert_eq!(batch, vec![b, a]);
        assert!(collector.is_empty());

        assert!(collector.replace_on_board(batch).is_empty());
        assert_eq!(collector.on_board(), &[b, a]);
        assert_eq!(collector.replace_on_board(Vec::new()), vec![b, a]);
    }
}
