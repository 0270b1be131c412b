//! Station board component and grid packing.
//!
//! The [`StickerBoard`] component marks the entity whose sprite is the
//! "information board" collected stickers get pinned to. Every time the train
//! reaches a station, the
//! [`snap_stickers_to_board`](crate::systems::stickerboard::snap_stickers_to_board)
//! observer plans a grid with [`plan_grid`] and places the stickers in
//! collection order.
//!
//! # Layout rules
//!
//! - The grid never uses cells smaller than `min_cell_size`.
//! - If every sticker fits at the minimum size, cells are enlarged uniformly
//!   (square cells) so the grid fills the board with a column count matching
//!   the board aspect ratio.
//! - If there are more stickers than minimum-size cells, the grid stays at
//!   the minimum size and extra stickers continue on rows past the bottom
//!   edge, overlapping other artwork.
//! - The grid block is centered on the board; cells fill left-to-right,
//!   top-to-bottom.

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;
use thiserror::Error;

/// Default smallest allowed cell edge (world units).
pub const DEFAULT_MIN_CELL_SIZE: f32 = 2.0;
/// Divisor used for sticker scale when a sticker has no size metadata.
pub const FALLBACK_SCALE_DIVISOR: f32 = 5.0;

/// Reasons a grid cannot be planned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("board size must be positive, got {width} x {height}")]
    InvalidBoard { width: f32, height: f32 },
    #[error("minimum cell size must be positive, got {0}")]
    InvalidCellSize(f32),
}

/// Board that receives collected stickers.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct StickerBoard {
    /// Smallest cell edge; stickers never shrink below it.
    pub min_cell_size: f32,
    /// The board's measured width is divided by this (1 = full width).
    pub width_factor: f32,
    /// The board's measured height is divided by this (1 = full height).
    pub height_factor: f32,
}

impl Default for StickerBoard {
    fn default() -> Self {
        Self {
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
            width_factor: 1.0,
            height_factor: 1.0,
        }
    }
}

impl StickerBoard {
    pub fn new(min_cell_size: f32) -> Self {
        Self {
            min_cell_size,
            ..Default::default()
        }
    }

    pub fn with_factors(mut self, width_factor: f32, height_factor: f32) -> Self {
        self.width_factor = width_factor;
        self.height_factor = height_factor;
        self
    }

    /// Usable board size from the measured (world) size of its artwork.
    pub fn usable_size(&self, measured: Vec2) -> Vec2 {
        Vec2::new(
            measured.x / self.width_factor,
            measured.y / self.height_factor,
        )
    }
}

/// Result of grid planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    pub board_width: f32,
    pub board_height: f32,
    /// Columns used for placement.
    pub cols: usize,
    /// Rows of the planned grid; overflow items go past this.
    pub rows: usize,
    /// Edge of a (square) cell.
    pub cell_size: f32,
    /// Columns that fit at the minimum cell size.
    pub max_cols: usize,
    /// Rows that fit at the minimum cell size.
    pub max_rows: usize,
}

/// Plan a grid for `count` items on a `board_width` x `board_height` board.
///
/// Returns `Ok(None)` when there is nothing to place. A non-positive board or
/// cell size is rejected. Boards smaller than one minimum cell on an axis
/// still get one column (or row) on that axis.
pub fn plan_grid(
    board_width: f32,
    board_height: f32,
    min_cell_size: f32,
    count: usize,
) -> Result<Option<GridPlan>, GridError> {
    if !(board_width > 0.0 && board_height > 0.0) {
        return Err(GridError::InvalidBoard {
            width: board_width,
            height: board_height,
        });
    }
    if !(min_cell_size > 0.0) {
        return Err(GridError::InvalidCellSize(min_cell_size));
    }
    if count == 0 {
        return Ok(None);
    }

    let max_cols = ((board_width / min_cell_size).floor() as usize).max(1);
    let max_rows = ((board_height / min_cell_size).floor() as usize).max(1);

    // Huge board to cell ratios saturate; such a board fits anything.
    let (cols, rows, cell_size) = if max_cols.saturating_mul(max_rows) >= count {
        let ratio = board_width / board_height;
        let approx_cols = ((count as f32 * ratio).sqrt().ceil() as usize).clamp(1, max_cols);
        let approx_rows = count.div_ceil(approx_cols).clamp(1, max_rows);
        let w = board_width / approx_cols as f32;
        let h = board_height / approx_rows as f32;
        (approx_cols, approx_rows, w.min(h))
    } else {
        (max_cols, max_rows, min_cell_size)
    };

    Ok(Some(GridPlan {
        board_width,
        board_height,
        cols,
        rows,
        cell_size,
        max_cols,
        max_rows,
    }))
}

impl GridPlan {
    /// Number of items placed without overlap.
    pub fn capacity(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    /// (column, row) of item `index`. Rows keep growing past `rows` on overflow.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    /// Local position (board-centered, Y up) of item `index`.
    pub fn position_of(&self, index: usize) -> Vec2 {
        let (col, row) = self.cell_of(index);
        let grid_w = self.cols as f32 * self.cell_size;
        let grid_h = self.rows as f32 * self.cell_size;
        Vec2::new(
            -grid_w / 2.0 + (col as f32 + 0.5) * self.cell_size,
            grid_h / 2.0 - (row as f32 + 0.5) * self.cell_size,
        )
    }

    /// Positions for the first `count` items, in insertion order.
    pub fn positions(&self, count: usize) -> impl Iterator<Item = Vec2> + '_ {
        (0..count).map(move |i| self.position_of(i))
    }
}

/// Uniform scale that makes an item `natural_width` wide fill one cell.
///
/// Items without size metadata fall back to `cell_size / 5`.
pub fn sticker_scale(cell_size: f32, natural_width: Option<f32>) -> f32 {
    match natural_width {
        Some(w) if w > 0.0 => cell_size / w,
        _ => cell_size / FALLBACK_SCALE_DIVISOR,
    }
}
