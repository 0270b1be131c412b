//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world.
//!
//! Submodules overview:
//! - [`category`] – which of the five spawnable kinds an object is
//! - [`globaltransform2d`] – computed world transform for hierarchies
//! - [`growth`] – hold-to-grow scale state
//! - [`layer`] – render/sorting layers and recursive layer requests
//! - [`mapposition`] – world-space (or parent-local) position
//! - [`miscspawner`] – interval spawner for ambient props
//! - [`parallax`] – wrapping parallax background layer
//! - [`passingobject`] – station object that pauses the scroll when centered
//! - [`scale`] – 2D scale factor
//! - [`scroller`] – scroll speed state machine (idle/easing/paused)
//! - [`sprite`] – texture key and natural size
//! - [`sticker`] – drift toward collection and board marker
//! - [`stickerboard`] – station board and the grid packing algorithm
//! - [`ttl`] – automatic despawn after a duration
//! - [`tween`] – easing curves
//! - [`zindex`] – draw order inside a sorting layer

pub mod category;
pub mod globaltransform2d;
pub mod growth;
pub mod layer;
pub mod mapposition;
pub mod miscspawner;
pub mod parallax;
pub mod passingobject;
pub mod scale;
pub mod scroller;
pub mod sprite;
pub mod sticker;
pub mod stickerboard;
pub mod ttl;
pub mod tween;
pub mod zindex;
