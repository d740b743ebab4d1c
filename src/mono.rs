//! Monochrome preprocessing: threshold or dither an image to black/white.

use image::{DynamicImage, GrayImage, Luma};

use crate::raster::Raster;

/// Binarize with a fixed cutoff: values >= `cutoff` become white.
pub fn threshold(gray: &GrayImage, cutoff: u8) -> GrayImage {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, px) in gray.enumerate_pixels() {
        let v = if px.0[0] >= cutoff { 255 } else { 0 };
        out.put_pixel(x, y, Luma([v]));
    }
    out
}

/// Atkinson error diffusion to pure black/white.
///
/// Distributes 1/8 of the quantization error to 6 neighbors (6/8 total),
/// which loses some luminosity but increases contrast.
pub fn dither_atkinson(image: &GrayImage) -> GrayImage {
    let (w, h) = image.dimensions();
    let mut errors: Vec<f32> = image.pixels().map(|p| p.0[0] as f32).collect();
    let mut out = GrayImage::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            let old_val = errors[idx].clamp(0.0, 255.0);
            let new_val = if old_val > 127.5 { 255.0 } else { 0.0 };
            out.put_pixel(x, y, Luma([new_val as u8]));

            let e = (old_val - new_val) / 8.0;

            if x + 1 < w {
                errors[idx + 1] += e;
            }
            if x + 2 < w {
                errors[idx + 2] += e;
            }
            if y + 1 < h {
                let row = idx + w as usize;
                if x > 0 {
                    errors[row - 1] += e;
                }
                errors[row] += e;
                if x + 1 < w {
                    errors[row + 1] += e;
                }
            }
            if y + 2 < h {
                errors[idx + 2 * w as usize] += e;
            }
        }
    }

    out
}

/// Flatten a decoded image to a black/white 3-channel raster, either by a
/// hard threshold or by Atkinson dithering.
pub fn monochrome_raster(image: &DynamicImage, cutoff: u8, dither: bool) -> Raster {
    let gray = image.to_luma8();
    let bw = if dither { dither_atkinson(&gray) } else { threshold(&gray, cutoff) };
    let (w, h) = bw.dimensions();
    let mut data = Vec::with_capacity((w * h * 3) as usize);
    for px in bw.pixels() {
        let v = px.0[0];
        data.extend_from_slice(&[v, v, v]);
    }
    Raster::from_raw(data, w, h, 3)
}
