//! Rendering screens and charsets back into raster images.

use crate::charset::{CharSet, GLYPHS_PER_SET};
use crate::raster::{Raster, TILE_SIZE};
use crate::screen::{Screen, COLS, PIXEL_HEIGHT, PIXEL_WIDTH};

/// Reconstruct the 320×200 image a screen describes: every cell's glyph
/// rendered in the cell's foreground color over the shared background,
/// blitted at the cell's pixel offset.
pub fn render_screen(screen: &Screen, charset: &CharSet) -> Raster {
    let mut raster = Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT);
    for (i, cell) in screen.cells.iter().enumerate() {
        let tile = charset.glyph(cell.code).to_tile(cell.color, screen.background);
        let col = (i % COLS) as u32;
        let row = (i / COLS) as u32;
        raster.blit_tile(col * TILE_SIZE, row * TILE_SIZE, &tile);
    }
    raster
}

/// Render a whole charset as a 32-glyph-per-row sheet, white on black.
pub fn render_charset(charset: &CharSet) -> Raster {
    let per_row = 32u32;
    let rows = GLYPHS_PER_SET as u32 / per_row;
    let mut raster = Raster::black(per_row * TILE_SIZE, rows * TILE_SIZE);
    for code in 0..GLYPHS_PER_SET {
        let tile = charset.glyph(code as u8).to_tile(1, 0);
        let col = code as u32 % per_row;
        let row = code as u32 / per_row;
        raster.blit_tile(col * TILE_SIZE, row * TILE_SIZE, &tile);
    }
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Glyph;
    use crate::palette::PALETTE;
    use crate::screen::{ScreenCell, CELLS};

    // glyph 0 empty, glyph 1 full
    fn test_charset() -> CharSet {
        let mut glyphs = vec![Glyph::new([0; 8]); 256];
        glyphs[1] = Glyph::new([0xFF; 8]);
        CharSet::from_glyphs(glyphs)
    }

    fn empty_screen(background: u8) -> Screen {
        Screen::new("s", background, vec![ScreenCell { code: 0, color: 1 }; CELLS])
    }

    #[test]
    fn empty_cells_render_as_background() {
        let raster = render_screen(&empty_screen(6), &test_charset());
        assert_eq!(raster.width(), 320);
        assert_eq!(raster.height(), 200);
        assert!(raster.pixels().all(|px| px == PALETTE[6]));
    }

    #[test]
    fn cells_land_at_their_pixel_offsets() {
        let mut screen = empty_screen(0);
        // cell (1, 0) and cell (0, 1)
        screen.cells[1] = ScreenCell { code: 1, color: 2 };
        screen.cells[COLS] = ScreenCell { code: 1, color: 5 };
        let raster = render_screen(&screen, &test_charset());
        assert_eq!(raster.pixel(0, 0), PALETTE[0]);
        assert_eq!(raster.pixel(8, 0), PALETTE[2]);
        assert_eq!(raster.pixel(15, 7), PALETTE[2]);
        assert_eq!(raster.pixel(16, 0), PALETTE[0]);
        assert_eq!(raster.pixel(0, 8), PALETTE[5]);
        assert_eq!(raster.pixel(7, 15), PALETTE[5]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut screen = empty_screen(3);
        screen.cells[999] = ScreenCell { code: 1, color: 9 };
        let charset = test_charset();
        assert_eq!(render_screen(&screen, &charset), render_screen(&screen, &charset));
    }

    #[test]
    fn charset_sheet_lays_out_32_glyphs_per_row() {
        let raster = render_charset(&test_charset());
        assert_eq!(raster.width(), 256);
        assert_eq!(raster.height(), 64);
        // glyph 1 sits in row 0, column 1, rendered white on black
        assert_eq!(raster.pixel(8, 0), PALETTE[1]);
        assert_eq!(raster.pixel(0, 0), PALETTE[0]);
        // glyph 33 would sit at (8, 8); it is empty in this set
        assert_eq!(raster.pixel(8, 8), PALETTE[0]);
    }
}
