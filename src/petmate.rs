//! The Petmate multi-screen document format (version 2 JSON).

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::charset::CharsetKind;
use crate::screen::{Screen, ScreenCell, COLS, ROWS};
use crate::{PicsciiError, Result};

const SUPPORTED_VERSION: u64 = 2;

/// One persisted screen record: fixed 40×25 cell grid plus its colors,
/// charset tag and name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameBuf {
    pub width: usize,
    pub height: usize,
    pub background_color: u8,
    pub border_color: u8,
    pub charset: String,
    pub name: String,
    pub framebuf: Vec<Vec<ScreenCell>>,
    /// Forward-compatibility placeholder, always empty here.
    #[serde(default)]
    pub custom_fonts: Map<String, Value>,
}

impl FrameBuf {
    fn from_screen(screen: &Screen, kind: CharsetKind) -> Self {
        let framebuf = (0..ROWS)
            .map(|row| screen.cells[row * COLS..(row + 1) * COLS].to_vec())
            .collect();
        FrameBuf {
            width: COLS,
            height: ROWS,
            background_color: screen.background,
            border_color: 0,
            charset: kind.petmate_tag().to_string(),
            name: screen.id.clone(),
            framebuf,
            custom_fonts: Map::new(),
        }
    }

    /// The charset a later render of this record must use. Unknown tags
    /// fall back to uppercase, as the original Petmate readers do.
    pub fn charset_kind(&self) -> CharsetKind {
        CharsetKind::from_petmate_tag(&self.charset).unwrap_or_else(|| {
            warn!("unknown charset tag {:?} in frame {:?}, assuming upper", self.charset, self.name);
            CharsetKind::Uppercase
        })
    }

    /// Flatten the 2-D cell array back into a row-major Screen, rejecting
    /// malformed shapes and out-of-palette colors outright.
    pub fn to_screen(&self) -> Result<Screen> {
        if self.framebuf.len() != ROWS || self.framebuf.iter().any(|row| row.len() != COLS) {
            return Err(PicsciiError::InvalidFrameSize {
                name: self.name.clone(),
                rows: self.framebuf.len(),
                cols: self.framebuf.first().map_or(0, |row| row.len()),
            });
        }
        if self.background_color > 15 {
            return Err(PicsciiError::InvalidColorIndex {
                name: self.name.clone(),
                color: self.background_color,
            });
        }
        let cells: Vec<ScreenCell> = self.framebuf.iter().flatten().copied().collect();
        if let Some(cell) = cells.iter().find(|c| c.color > 15) {
            return Err(PicsciiError::InvalidColorIndex { name: self.name.clone(), color: cell.color });
        }
        Ok(Screen::new(self.name.clone(), self.background_color, cells))
    }
}

/// A whole document: format version, screen ordering and one record per
/// screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Petmate {
    pub version: u64,
    pub screens: Vec<usize>,
    pub framebufs: Vec<FrameBuf>,
}

impl Petmate {
    /// Wrap screens into a version-2 document, all tagged with one charset.
    pub fn from_screens(screens: &[Screen], kind: CharsetKind) -> Self {
        Petmate {
            version: SUPPORTED_VERSION,
            screens: (0..screens.len()).collect(),
            framebufs: screens.iter().map(|s| FrameBuf::from_screen(s, kind)).collect(),
        }
    }

    /// Parse a document. Exactly one format version is supported; anything
    /// else is a hard failure carrying the offending value.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Petmate = serde_json::from_str(json)?;
        if doc.version != SUPPORTED_VERSION {
            return Err(PicsciiError::UnsupportedVersion(doc.version));
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Recover every screen in document order.
    pub fn to_screens(&self) -> Result<Vec<Screen>> {
        self.framebufs.iter().map(FrameBuf::to_screen).collect()
    }
}
