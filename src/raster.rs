//! Raw raster buffers and 8×8 tile extraction.

use image::DynamicImage;

/// One RGB pixel, 8 bits per channel.
pub type Pixel = [u8; 3];

/// An 8×8 block of pixels, one screen cell worth of image data.
pub type Tile = [[Pixel; 8]; 8];

/// Pixel edge length of a tile / screen cell.
pub const TILE_SIZE: u32 = 8;

/// A decoded raster buffer with an explicit channel stride.
///
/// The upstream decoder delivers a fixed channel count, but nothing here
/// hard-codes it: all addressing goes through `channels`. Only the first
/// three channels of a pixel are ever read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u32,
}

impl Raster {
    /// Wrap a raw buffer. `data.len()` must be `width * height * channels`.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32, channels: u32) -> Self {
        assert!(channels >= 3, "need at least 3 channels, got {}", channels);
        assert_eq!(
            data.len(),
            (width * height * channels) as usize,
            "buffer length does not match {}x{}x{}",
            width,
            height,
            channels
        );
        Self { data, width, height, channels }
    }

    /// Flatten a decoded image to an opaque 3-channel buffer.
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self { data: rgb.into_raw(), width, height, channels: 3 }
    }

    /// An all-black 3-channel buffer, used as the rendering target.
    pub fn black(width: u32, height: u32) -> Self {
        Self { data: vec![0; (width * height * 3) as usize], width, height, channels: 3 }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Byte offset of the first channel of the pixel at (x, y).
    fn byte_offset(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * self.channels) as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let o = self.byte_offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, p: Pixel) {
        let o = self.byte_offset(x, y);
        self.data[o..o + 3].copy_from_slice(&p);
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| self.pixel(x, y)))
    }

    /// Copy out the 8×8 tile whose top-left corner is at (x, y).
    pub fn tile_at(&self, x: u32, y: u32) -> Tile {
        let mut tile = [[[0u8; 3]; 8]; 8];
        for (ty, row) in tile.iter_mut().enumerate() {
            for (tx, px) in row.iter_mut().enumerate() {
                *px = self.pixel(x + tx as u32, y + ty as u32);
            }
        }
        tile
    }

    /// Paste an 8×8 tile with its top-left corner at (x, y), in raster scan order.
    pub fn blit_tile(&mut self, x: u32, y: u32, tile: &Tile) {
        for (ty, row) in tile.iter().enumerate() {
            for (tx, px) in row.iter().enumerate() {
                self.put_pixel(x + tx as u32, y + ty as u32, *px);
            }
        }
    }

    /// All 8×8 tiles in row-major cell order (row 0 left to right, then row 1, …).
    ///
    /// Width and height being multiples of 8 is a precondition of the resize
    /// contract upstream, not something checked per call.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        debug_assert!(self.width % TILE_SIZE == 0 && self.height % TILE_SIZE == 0);
        let cols = self.width / TILE_SIZE;
        let rows = self.height / TILE_SIZE;
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| self.tile_at(col * TILE_SIZE, row * TILE_SIZE))
        })
    }
}
