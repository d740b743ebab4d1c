//! charset2png CLI - Render a character ROM as a glyph sheet image

use std::path::PathBuf;

use clap::Parser;

use picscii::charset::GLYPHS_PER_SET;
use picscii::files;
use picscii::render::render_charset;
use picscii::{CharSet, PicsciiError};

#[derive(Parser)]
#[command(name = "charset2png", about = "Render a character ROM as a glyph sheet")]
struct Args {
    /// Character ROM file, 8 bytes per glyph
    input: PathBuf,
    /// 256-glyph page to render
    #[arg(short, long, default_value = "0")]
    page: usize,
    /// Overwrite an existing output file
    #[arg(long)]
    overwrite: bool,
}

fn main() -> Result<(), PicsciiError> {
    env_logger::init();
    let args = Args::parse();

    let charset = CharSet::load_at(&args.input, args.page * GLYPHS_PER_SET)?;
    let raster = render_charset(&charset);
    let output = PathBuf::from(format!("{}.png", files::file_stem(&args.input)));
    files::check_overwrite(&output, args.overwrite)?;
    image::save_buffer(
        &output,
        raster.data(),
        raster.width(),
        raster.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    println!("Output: {}", output.display());
    Ok(())
}
