//! Event types exchanged between systems and observers.
//!
//! Events provide a decoupled way for systems to communicate: the input
//! system does not know about the spawner, and passing objects do not know
//! about the sticker board.
//!
//! Submodules:
//! - [`input`] – press/release edges of the five logical buttons
//! - [`station`] – a passing object stopped at the center of the view
pub mod input;
pub mod station;
