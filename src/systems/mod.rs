//! Game systems.
//!
//! This module groups all ECS systems and observers that advance the
//! simulation and build the draw list.
//!
//! Submodules overview
//! - [`input`] – poll the button source and trigger button edges
//! - [`layers`] – resolve layer requests over entity trees
//! - [`miscspawner`] – spawn ambient props on an interval
//! - [`parallax`] – scroll and wrap background layers
//! - [`passingobject`] – station stop-once state machine
//! - [`propagate_transforms`] – world transforms for hierarchies
//! - [`render`] – sorted, culled draw list for the display port
//! - [`scroller`] – scroll speed state and passing object spawns
//! - [`spawner`] – spawn on press, grow while held
//! - [`sticker`] – drift and collection of spawned objects
//! - [`stickerboard`] – pin collected stickers to the board at a station
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose lifetime ran out

pub mod input;
pub mod layers;
pub mod miscspawner;
pub mod parallax;
pub mod passingobject;
pub mod propagate_transforms;
pub mod render;
pub mod scroller;
pub mod spawner;
pub mod sticker;
pub mod stickerboard;
pub mod time;
pub mod ttl;
