//! The fixed 40×25 character-art screen model.

use serde::{Deserialize, Serialize};

/// Cells per screen row.
pub const COLS: usize = 40;
/// Screen rows.
pub const ROWS: usize = 25;
/// Cells per screen.
pub const CELLS: usize = COLS * ROWS;
/// Pixel width of a rendered screen.
pub const PIXEL_WIDTH: u32 = COLS as u32 * 8;
/// Pixel height of a rendered screen.
pub const PIXEL_HEIGHT: u32 = ROWS as u32 * 8;

/// One character cell: a glyph index and its foreground color.
///
/// The matcher never emits a foreground equal to the screen background;
/// cells replayed from a persisted document are not under that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenCell {
    pub code: u8,
    pub color: u8,
}

/// A converted image: one background color plus 1000 cells in row-major
/// order (row 0 is the top screen row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub id: String,
    pub background: u8,
    pub cells: Vec<ScreenCell>,
}

impl Screen {
    pub fn new(id: impl Into<String>, background: u8, cells: Vec<ScreenCell>) -> Self {
        assert_eq!(cells.len(), CELLS, "a screen holds exactly {} cells", CELLS);
        Self { id: id.into(), background, cells }
    }

    pub fn cell(&self, col: usize, row: usize) -> ScreenCell {
        self.cells[row * COLS + col]
    }
}
