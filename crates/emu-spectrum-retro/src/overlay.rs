//! On-screen keyboard overlay: state, key-cell layout and default bitmap.

use emu_core::rgb565;
use serde::Serialize;

use crate::keymap::{OVERLAY_KEYS, SpectrumKey};

/// Overlay bitmap size in logical pixels.
pub const OVERLAY_WIDTH: usize = 320;
pub const OVERLAY_HEIGHT: usize = 240;

/// Rows of frame above the overlay window (logical pixels).
pub const OVERLAY_TOP: usize = 24;

pub const GRID_ROWS: usize = 4;
pub const GRID_COLUMNS: usize = 10;

/// Top-left of column 0 in each grid row, overlay coordinates.
const ROW_ORIGINS: [(usize, usize); GRID_ROWS] = [(32, 40), (40, 88), (48, 136), (32, 184)];

/// Horizontal distance between key cells.
const KEY_PITCH: usize = 24;
/// Height of a key cell.
pub const KEY_HEIGHT: usize = 24;

/// A key cell in overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCell {
    pub x: usize,
    pub y: usize,
    pub width: usize,
}

/// Cell of the key at (`row`, `column`).
///
/// Most keys are 23 pixels wide. On the bottom row Symbol Shift is 24 and
/// Space is 30, shifted one pixel right.
#[must_use]
pub const fn key_cell(row: usize, column: usize) -> KeyCell {
    let (row_x, row_y) = ROW_ORIGINS[row];
    let x = row_x + column * KEY_PITCH;
    match (row, column) {
        (3, 8) => KeyCell { x, y: row_y, width: 24 },
        (3, 9) => KeyCell { x: x + 1, y: row_y, width: 30 },
        _ => KeyCell { x, y: row_y, width: 23 },
    }
}

/// Overlay visibility and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OverlayState {
    pub active: bool,
    pub row: usize,
    pub column: usize,
}

impl OverlayState {
    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    pub fn up(&mut self) {
        self.row = (self.row + GRID_ROWS - 1) % GRID_ROWS;
    }

    pub fn down(&mut self) {
        self.row = (self.row + 1) % GRID_ROWS;
    }

    pub fn left(&mut self) {
        self.column = (self.column + GRID_COLUMNS - 1) % GRID_COLUMNS;
    }

    pub fn right(&mut self) {
        self.column = (self.column + 1) % GRID_COLUMNS;
    }

    /// The highlighted key.
    #[must_use]
    pub fn key(&self) -> SpectrumKey {
        OVERLAY_KEYS[self.row % GRID_ROWS][self.column % GRID_COLUMNS]
    }

    #[must_use]
    pub fn cell(&self) -> KeyCell {
        key_cell(self.row % GRID_ROWS, self.column % GRID_COLUMNS)
    }
}

const BACKGROUND: u16 = rgb565(0x20, 0x20, 0x28);
const KEY_FRAME: u16 = rgb565(0xD0, 0xD0, 0xD0);
const KEY_FACE: u16 = rgb565(0x40, 0x40, 0x48);

/// A plain keyboard: a frame around every key cell on a dark background.
#[must_use]
pub fn default_bitmap() -> Vec<u16> {
    let mut bitmap = vec![BACKGROUND; OVERLAY_WIDTH * OVERLAY_HEIGHT];
    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            let cell = key_cell(row, column);
            for y in cell.y..cell.y + KEY_HEIGHT {
                let line = &mut bitmap[y * OVERLAY_WIDTH..(y + 1) * OVERLAY_WIDTH];
                for (dx, pixel) in line[cell.x..cell.x + cell.width].iter_mut().enumerate() {
                    let edge = y == cell.y
                        || y == cell.y + KEY_HEIGHT - 1
                        || dx == 0
                        || dx == cell.width - 1;
                    *pixel = if edge { KEY_FRAME } else { KEY_FACE };
                }
            }
        }
    }
    bitmap
}
