//! The 256-glyph C64 character set: bit patterns, ROM loading, tile rendering.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::palette::PALETTE;
use crate::raster::Tile;
use crate::{PicsciiError, Result};

/// Bytes per glyph: one byte per pixel row.
pub const GLYPH_BYTES: usize = 8;
/// Glyphs per character set.
pub const GLYPHS_PER_SET: usize = 256;

/// One 8×8 monochrome glyph. Byte i is pixel row i; bit 7 of a row byte is
/// the leftmost column. Set bits are foreground, clear bits background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph([u8; GLYPH_BYTES]);

impl Glyph {
    pub const fn new(rows: [u8; GLYPH_BYTES]) -> Self {
        Self(rows)
    }

    pub fn row(&self, row: usize) -> u8 {
        self.0[row]
    }

    /// Whether the pixel at (row, col) belongs to the foreground.
    pub fn bit(&self, row: usize, col: usize) -> bool {
        self.0[row] & (0x80 >> col) != 0
    }

    /// Render into a two-color tile using palette indices.
    pub fn to_tile(&self, fg: u8, bg: u8) -> Tile {
        let fg = PALETTE[fg as usize];
        let bg = PALETTE[bg as usize];
        let mut tile = [[[0u8; 3]; 8]; 8];
        for (row, pixels) in tile.iter_mut().enumerate() {
            for (col, px) in pixels.iter_mut().enumerate() {
                *px = if self.bit(row, col) { fg } else { bg };
            }
        }
        tile
    }
}

/// Which half of the 4096-byte character ROM to use. The ROM holds the
/// uppercase/graphics set in bytes [0, 2048) and the lowercase/uppercase
/// set in bytes [2048, 4096).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CharsetKind {
    Uppercase,
    Lowercase,
}

impl CharsetKind {
    /// Index of the first glyph of this set within the ROM.
    pub fn glyph_offset(&self) -> usize {
        match self {
            CharsetKind::Uppercase => 0,
            CharsetKind::Lowercase => GLYPHS_PER_SET,
        }
    }

    /// The charset label used by the Petmate document format.
    pub fn petmate_tag(&self) -> &'static str {
        match self {
            CharsetKind::Uppercase => "upper",
            CharsetKind::Lowercase => "lower",
        }
    }

    pub fn from_petmate_tag(tag: &str) -> Option<Self> {
        match tag {
            "upper" => Some(CharsetKind::Uppercase),
            "lower" => Some(CharsetKind::Lowercase),
            _ => None,
        }
    }
}

/// A resolved, ordered set of exactly 256 glyphs.
#[derive(Debug, Clone)]
pub struct CharSet {
    glyphs: Vec<Glyph>,
}

impl CharSet {
    /// Build from an explicit glyph list; must hold exactly 256 glyphs.
    pub fn from_glyphs(glyphs: Vec<Glyph>) -> Self {
        assert_eq!(glyphs.len(), GLYPHS_PER_SET, "a charset holds exactly 256 glyphs");
        Self { glyphs }
    }

    /// Read 256 consecutive glyphs starting at `glyph_offset` records in.
    pub fn from_bytes(bytes: &[u8], glyph_offset: usize) -> Result<Self> {
        let start = glyph_offset * GLYPH_BYTES;
        let end = (glyph_offset + GLYPHS_PER_SET) * GLYPH_BYTES;
        if bytes.len() < end {
            return Err(PicsciiError::CharsetTooShort(bytes.len()));
        }
        let glyphs = bytes[start..end]
            .chunks_exact(GLYPH_BYTES)
            .map(|rows| {
                let mut g = [0u8; GLYPH_BYTES];
                g.copy_from_slice(rows);
                Glyph::new(g)
            })
            .collect();
        Ok(Self { glyphs })
    }

    /// Load one half of a character ROM file.
    pub fn load(path: impl AsRef<Path>, kind: CharsetKind) -> Result<Self> {
        Self::from_bytes(&fs::read(path)?, kind.glyph_offset())
    }

    /// Load an arbitrary 256-glyph page of a charset file.
    pub fn load_at(path: impl AsRef<Path>, glyph_offset: usize) -> Result<Self> {
        Self::from_bytes(&fs::read(path)?, glyph_offset)
    }

    pub fn glyph(&self, index: u8) -> Glyph {
        self.glyphs[index as usize]
    }
}
