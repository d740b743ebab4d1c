//! Glyph matching: the best (glyph, foreground color) pair for a tile.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::charset::{CharSet, Glyph};
use crate::palette::{self, PALETTE};
use crate::raster::Tile;
use crate::screen::ScreenCell;

/// Matching strategy, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Exhaustive search over every (color, glyph) pair.
    Slow,
    /// Commit to one foreground color up front, then search glyphs only.
    Fast,
}

impl MatchStrategy {
    /// The pure matching function this strategy stands for.
    pub fn matcher(&self) -> fn(&Tile, &CharSet, u8, &[u8]) -> ScreenCell {
        match self {
            MatchStrategy::Slow => best_match,
            MatchStrategy::Fast => best_fast_match,
        }
    }
}

/// Total color distance between corresponding pixels of two tiles,
/// accumulated row by row.
pub fn tile_distance(a: &Tile, b: &Tile) -> f64 {
    let mut total = 0.0;
    for (row_a, row_b) in a.iter().zip(b) {
        let mut row = 0.0;
        for (px_a, px_b) in row_a.iter().zip(row_b) {
            row += palette::distance(*px_a, *px_b);
        }
        total += row;
    }
    total
}

/// Distance between a tile and a glyph rendered in the given colors.
pub fn glyph_distance(tile: &Tile, glyph: Glyph, fg: u8, bg: u8) -> f64 {
    tile_distance(tile, &glyph.to_tile(fg, bg))
}

/// Distance from every tile pixel (row-major) to one palette color.
fn pixel_distances(tile: &Tile, color: u8) -> [f64; 64] {
    let reference = PALETTE[color as usize];
    let mut out = [0.0; 64];
    for (row, pixels) in tile.iter().enumerate() {
        for (col, px) in pixels.iter().enumerate() {
            out[row * 8 + col] = palette::distance(*px, reference);
        }
    }
    out
}

/// `glyph_distance` over precomputed per-pixel distances. Keeps the exact
/// row-by-row summation order of `tile_distance`, so the result is
/// bit-identical to rendering the glyph and measuring it.
fn masked_distance(glyph: Glyph, fg_d: &[f64; 64], bg_d: &[f64; 64]) -> f64 {
    let mut total = 0.0;
    for row in 0..8 {
        let mut row_sum = 0.0;
        for col in 0..8 {
            let pos = row * 8 + col;
            row_sum += if glyph.bit(row, col) { fg_d[pos] } else { bg_d[pos] };
        }
        total += row_sum;
    }
    total
}

/// Exhaustive match: every foreground color 0..16 ascending except the
/// background, crossed with every allowed glyph in order. Strict `<`, so
/// the first minimum in enumeration order wins. Never picks the background
/// as foreground and never picks a glyph outside `allowed`.
pub fn best_match(tile: &Tile, charset: &CharSet, background: u8, allowed: &[u8]) -> ScreenCell {
    debug_assert!(!allowed.is_empty());
    let distances: [[f64; 64]; 16] = std::array::from_fn(|c| pixel_distances(tile, c as u8));
    let bg_d = &distances[background as usize];
    let mut best = ScreenCell { code: 0, color: 0 };
    let mut best_distance = f64::MAX;
    for color in 0..16u8 {
        if color == background {
            continue;
        }
        let fg_d = &distances[color as usize];
        for &code in allowed {
            let d = masked_distance(charset.glyph(code), fg_d, bg_d);
            if d < best_distance {
                best = ScreenCell { code, color };
                best_distance = d;
            }
        }
    }
    best
}

/// Fast heuristic match: fix the foreground to the tile's dominant
/// non-background color, then search only the allowed glyphs. Same
/// tie-break as `best_match`; strictly cheaper, lower fidelity.
pub fn best_fast_match(tile: &Tile, charset: &CharSet, background: u8, allowed: &[u8]) -> ScreenCell {
    debug_assert!(!allowed.is_empty());
    let color = best_tile_color(tile, background);
    let fg_d = pixel_distances(tile, color);
    let bg_d = pixel_distances(tile, background);
    let mut best = ScreenCell { code: 0, color: 0 };
    let mut best_distance = f64::MAX;
    for &code in allowed {
        let d = masked_distance(charset.glyph(code), &fg_d, &bg_d);
        if d < best_distance {
            best = ScreenCell { code, color };
            best_distance = d;
        }
    }
    best
}

/// Dominant quantized color of a tile, ignoring background pixels. A tile
/// that is entirely background filters down to nothing and degenerates to
/// index 0.
fn best_tile_color(tile: &Tile, background: u8) -> u8 {
    palette::most_occurring(
        tile.iter().flatten().map(|&px| palette::quantize(px)).filter(|&c| c != background),
    )
}
