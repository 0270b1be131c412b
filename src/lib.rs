//! Sticker train library.
//!
//! A headless side-scrolling scene: the player spawns and grows objects with
//! five buttons while the landscape scrolls by. The objects drift off as
//! stickers and get pinned to the board whenever the train stops at a station.
//!
//! This crate exposes the ECS components, resources, systems and events for
//! the binary and for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
