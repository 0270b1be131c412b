//! Display output.
//!
//! [`render_system`](crate::systems::render::render_system) turns the world
//! into a sorted list of [`DrawCommand`]s and hands it to the [`Display`]
//! resource, which forwards it to a [`DisplayPort`]. A windowed renderer would
//! implement the port; [`LogDisplay`] is the headless one.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use log::{debug, log_enabled, Level};
use rustc_hash::FxHashMap;

/// One sprite to draw, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub entity: Entity,
    pub tex_key: String,
    /// Center of the sprite.
    pub position: Vec2,
    /// Size after scaling.
    pub size: Vec2,
    pub sorting_layer: Option<String>,
    pub z: i32,
}

/// Receives the draw list once per frame.
pub trait DisplayPort: Send + Sync {
    fn present(&mut self, frame: u64, commands: &[DrawCommand]);
}

/// Logs a per-layer summary every `every` frames at debug level.
#[derive(Debug, Clone)]
pub struct LogDisplay {
    pub every: u64,
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self { every: 60 }
    }
}

impl DisplayPort for LogDisplay {
    fn present(&mut self, frame: u64, commands: &[DrawCommand]) {
        if self.every == 0 || frame % self.every != 0 || !log_enabled!(Level::Debug) {
            return;
        }
        let mut per_layer: FxHashMap<&str, usize> = FxHashMap::default();
        for cmd in commands {
            *per_layer
                .entry(cmd.sorting_layer.as_deref().unwrap_or("Default"))
                .or_insert(0) += 1;
        }
        let mut layers: Vec<_> = per_layer.into_iter().collect();
        layers.sort();
        debug!(
            "[display] frame {}: {} sprite(s) {:?}",
            frame,
            commands.len(),
            layers
        );
    }
}

/// Resource owning the active display and the sorting layer order.
#[derive(Resource)]
pub struct Display {
    port: Box<dyn DisplayPort>,
    /// Sorting layers back to front.
    pub sorting_layers: Vec<String>,
    /// The list handed to the port on the last frame.
    pub last_frame: Vec<DrawCommand>,
}

impl Display {
    pub fn new(port: impl DisplayPort + 'static, sorting_layers: Vec<String>) -> Self {
        Self {
            port: Box::new(port),
            sorting_layers,
            last_frame: Vec::new(),
        }
    }

    /// Draw rank of a sorting layer. Entities without a layer draw first,
    /// unknown layers draw last.
    pub fn layer_rank(&self, layer: Option<&str>) -> usize {
        match layer {
            None => 0,
            Some(name) => self
                .sorting_layers
                .iter()
                .position(|l| l == name)
                .map_or(self.sorting_layers.len() + 1, |i| i + 1),
        }
    }

    pub fn present(&mut self, frame: u64, commands: Vec<DrawCommand>) {
        self.port.present(frame, &commands);
        self.last_frame = commands;
    }
}
