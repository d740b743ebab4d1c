//! Fixed 16-color C64 palette and nearest-color quantization.

use crate::raster::{Pixel, Raster};

/// The colodore palette. Index 0 is black; the order is the C64 color index.
pub const PALETTE: [Pixel; 16] = [
    [0x00, 0x00, 0x00], // black
    [0xff, 0xff, 0xff], // white
    [0x81, 0x33, 0x38], // red
    [0x75, 0xce, 0xc8], // cyan
    [0x8e, 0x3c, 0x97], // purple
    [0x56, 0xac, 0x4d], // green
    [0x2e, 0x2c, 0x9b], // blue
    [0xed, 0xf0, 0x71], // yellow
    [0x8e, 0x50, 0x29], // orange
    [0x55, 0x38, 0x00], // brown
    [0xc4, 0x6c, 0x71], // light red
    [0x4a, 0x4a, 0x4a], // dark gray
    [0x7b, 0x7b, 0x7b], // medium gray
    [0xa9, 0xff, 0x9f], // light green
    [0x70, 0x6e, 0xeb], // light blue
    [0xb2, 0xb2, 0xb2], // light gray
];

/// Euclidean distance between two pixels in RGB space.
pub fn distance(a: Pixel, b: Pixel) -> f64 {
    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Index of the nearest entry; strict `<` comparison, so exact ties keep
/// the lowest index.
fn nearest(table: &[Pixel], p: Pixel) -> u8 {
    let mut best = 0u8;
    let mut best_distance = f64::INFINITY;
    for (i, &entry) in table.iter().enumerate() {
        let d = distance(p, entry);
        if d < best_distance {
            best = i as u8;
            best_distance = d;
        }
    }
    best
}

/// Map a pixel to the index of the closest palette color.
pub fn quantize(p: Pixel) -> u8 {
    nearest(&PALETTE, p)
}

/// Quantize every pixel of a raster in row-major order.
pub fn quantize_raster(raster: &Raster) -> Vec<u8> {
    raster.pixels().map(quantize).collect()
}

/// The quantized color of the top-left pixel.
pub fn first_pixel(raster: &Raster) -> u8 {
    quantize(raster.pixel(0, 0))
}

/// The palette index occurring most often. Strict `>` during a
/// left-to-right scan, so ties keep the lower index; an empty input
/// degenerates to index 0.
pub fn most_occurring<I: IntoIterator<Item = u8>>(indices: I) -> u8 {
    let mut counts = [0usize; 16];
    for i in indices {
        counts[i as usize] += 1;
    }
    let mut best = 0u8;
    let mut best_count = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > best_count {
            best = i as u8;
            best_count = count;
        }
    }
    best
}
