//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input, timing, configuration,
//! spawn bookkeeping and output. Each submodule documents the semantics and
//! intended usage of its resource(s).
//!
//! Overview
//! - `buttonsource` – where button frames come from (serial lines, keys, scripts)
//! - `camera2d` – shared camera used for world/viewport transforms
//! - `collector` – stickers waiting for the next station
//! - `display` – draw list output port
//! - `gameconfig` – INI-backed settings
//! - `input` – per-frame state of the five logical buttons
//! - `prefabs` – named entity shapes and instantiation
//! - `spawner` – growing instance and spawn counts per category
//! - `worldtime` – simulation time and delta
pub mod buttonsource;
pub mod camera2d;
pub mod collector;
pub mod display;
pub mod gameconfig;
pub mod input;
pub mod prefabs;
pub mod spawner;
pub mod worldtime;
