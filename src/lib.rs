//! Image to C64 PETSCII converter using per-tile glyph matching.

pub mod charset;
pub mod config;
pub mod files;
pub mod matcher;
pub mod mono;
pub mod palette;
pub mod petmate;
pub mod raster;
pub mod render;
pub mod screen;

pub use charset::{CharSet, CharsetKind};
pub use config::{BackgroundMode, Config};
pub use matcher::MatchStrategy;
pub use petmate::Petmate;
pub use raster::Raster;
pub use screen::{Screen, ScreenCell};

use std::path::PathBuf;

use image::imageops::FilterType;
use image::DynamicImage;
use log::debug;
use thiserror::Error;

use crate::screen::{PIXEL_HEIGHT, PIXEL_WIDTH};

#[derive(Error, Debug)]
pub enum PicsciiError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported Petmate version: {0}")]
    UnsupportedVersion(u64),
    #[error("Frame {name:?} is {rows}x{cols} cells, expected 25x40")]
    InvalidFrameSize { name: String, rows: usize, cols: usize },
    #[error("Color index {color} in frame {name:?} is outside the 16-color palette")]
    InvalidColorIndex { name: String, color: u8 },
    #[error("Charset data is {0} bytes, too short for the requested glyphs")]
    CharsetTooShort(usize),
    #[error("The allowed glyph range is empty")]
    EmptyGlyphSet,
    #[error("No files of type {} found in {}", .extensions, .path.display())]
    NoInputFiles { path: PathBuf, extensions: String },
    #[error("Output file {} already exists, use --overwrite to replace it", .0.display())]
    OutputExists(PathBuf),
    #[error("Unsupported input file type: {}", .0.display())]
    UnsupportedInput(PathBuf),
}

pub type Result<T> = std::result::Result<T, PicsciiError>;

/// Converts decoded images into PETSCII screens.
///
/// Holds everything a run resolves once: the glyph set, the matching
/// strategy, how the background is chosen and which glyphs are allowed.
/// One converter serves a whole batch; conversions only read it, so it
/// can be shared across worker threads.
pub struct Converter {
    charset: CharSet,
    strategy: MatchStrategy,
    background: BackgroundMode,
    background_sample: Option<u8>,
    allowed: Vec<u8>,
    mono: bool,
    threshold: u8,
    dither: bool,
}

impl Converter {
    pub fn new(charset: CharSet) -> Self {
        Self::from_config(charset, &Config::default())
    }

    pub fn from_config(charset: CharSet, config: &Config) -> Self {
        Self {
            charset,
            strategy: config.matcher,
            background: config.background,
            background_sample: None,
            allowed: config.allowed_glyphs(),
            mono: config.mono,
            threshold: config.threshold,
            dither: config.dither,
        }
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_background(mut self, mode: BackgroundMode) -> Self {
        self.background = mode;
        self
    }

    /// Pin the first-pixel background to one sample, so every screen of a
    /// batch shares it.
    pub fn with_background_sample(mut self, color: u8) -> Self {
        self.background_sample = Some(color);
        self
    }

    /// Restrict matching to an explicit, ordered glyph list.
    pub fn with_allowed_glyphs(mut self, allowed: Vec<u8>) -> Self {
        self.allowed = allowed;
        self
    }

    /// Restrict matching to an inclusive glyph index range. A reversed
    /// range leaves the list empty, which conversion rejects.
    pub fn with_allowed_range(mut self, first: u8, last: u8) -> Self {
        self.allowed = if first > last { Vec::new() } else { (first..=last).collect() };
        self
    }

    pub fn with_mono(mut self, enabled: bool) -> Self {
        self.mono = enabled;
        self
    }

    pub fn with_threshold(mut self, cutoff: u8) -> Self {
        self.threshold = cutoff;
        self
    }

    pub fn with_dither(mut self, enabled: bool) -> Self {
        self.dither = enabled;
        self
    }

    /// Scale to the fixed 320x200 grid and binarize when configured.
    fn preprocess(&self, image: &DynamicImage) -> Raster {
        let resized = image.resize_exact(PIXEL_WIDTH, PIXEL_HEIGHT, FilterType::Lanczos3);
        if self.mono {
            mono::monochrome_raster(&resized, self.threshold, self.dither)
        } else {
            Raster::from_image(&resized)
        }
    }

    /// The background color a first-pixel run pins: the quantized first
    /// pixel of the (typically first) input image.
    pub fn first_pixel_sample(&self, image: &DynamicImage) -> u8 {
        palette::first_pixel(&self.preprocess(image))
    }

    pub fn convert(&self, image: &DynamicImage, id: impl Into<String>) -> Result<Screen> {
        self.convert_raster(&self.preprocess(image), id)
    }

    /// Convert a raster that already has the 320x200 shape.
    pub fn convert_raster(&self, raster: &Raster, id: impl Into<String>) -> Result<Screen> {
        if self.allowed.is_empty() {
            return Err(PicsciiError::EmptyGlyphSet);
        }
        debug_assert_eq!((raster.width(), raster.height()), (PIXEL_WIDTH, PIXEL_HEIGHT));
        let id = id.into();

        let background = match self.background {
            BackgroundMode::Optimal => palette::most_occurring(palette::quantize_raster(raster)),
            BackgroundMode::FirstPixel => self
                .background_sample
                .unwrap_or_else(|| palette::first_pixel(raster)),
        };
        debug!(
            "{}: background color {}, {} of 256 glyphs allowed",
            id,
            background,
            self.allowed.len()
        );

        let matcher = self.strategy.matcher();
        let cells = raster
            .tiles()
            .map(|tile| matcher(&tile, &self.charset, background, &self.allowed))
            .collect();
        Ok(Screen::new(id, background, cells))
    }
}
