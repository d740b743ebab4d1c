//! Input file enumeration and output safety checks.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{PicsciiError, Result};

/// Extensions the image decoder is expected to handle.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "webp"];

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Resolve an input path to the list of images to convert. A file must
/// carry a supported extension; a directory contributes every supported
/// file it holds, in name order.
pub fn collect_images(input: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(input)?;
    if meta.is_file() {
        if is_supported(input) {
            return Ok(vec![input.to_path_buf()]);
        }
        return Err(PicsciiError::UnsupportedInput(input.to_path_buf()));
    }
    if meta.is_dir() {
        let mut images: Vec<PathBuf> = fs::read_dir(input)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_supported(path))
            .collect();
        images.sort();
        if images.is_empty() {
            return Err(PicsciiError::NoInputFiles {
                path: input.to_path_buf(),
                extensions: SUPPORTED_EXTENSIONS.join(", "),
            });
        }
        return Ok(images);
    }
    Err(PicsciiError::UnsupportedInput(input.to_path_buf()))
}

/// Refuse to clobber an existing file unless overwriting was requested.
pub fn check_overwrite(path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(PicsciiError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

/// Filename without directory or extension. Screens take their ids from
/// this, and output files are named after it.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
