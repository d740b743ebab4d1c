//! petmate2png CLI - Render the screens of a Petmate document to PNG images

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use picscii::files;
use picscii::render::render_screen;
use picscii::screen::{PIXEL_HEIGHT, PIXEL_WIDTH};
use picscii::{CharSet, CharsetKind, Petmate, PicsciiError};

#[derive(Parser)]
#[command(name = "petmate2png", about = "Render Petmate screens to PNG images")]
struct Args {
    /// Input .petmate document
    input: PathBuf,
    /// Character ROM file
    #[arg(long, default_value = "assets/characters.901225-01.bin")]
    charset_file: PathBuf,
    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,
}

fn main() -> Result<(), PicsciiError> {
    env_logger::init();
    let args = Args::parse();

    let petmate = Petmate::from_json(&fs::read_to_string(&args.input)?)?;
    let basename = files::file_stem(&args.input);

    // Both ROM halves up front; each frame picks one by its charset tag.
    let rom = fs::read(&args.charset_file)?;
    let upper = CharSet::from_bytes(&rom, CharsetKind::Uppercase.glyph_offset())?;
    let lower = CharSet::from_bytes(&rom, CharsetKind::Lowercase.glyph_offset())?;

    info!("rendering {} screens from {}", petmate.framebufs.len(), args.input.display());
    for frame in &petmate.framebufs {
        let charset = match frame.charset_kind() {
            CharsetKind::Uppercase => &upper,
            CharsetKind::Lowercase => &lower,
        };
        let screen = frame.to_screen()?;
        let raster = render_screen(&screen, charset);
        let output = PathBuf::from(format!("{}-{}.png", basename, screen.id));
        files::check_overwrite(&output, args.overwrite)?;
        image::save_buffer(
            &output,
            raster.data(),
            PIXEL_WIDTH,
            PIXEL_HEIGHT,
            image::ExtendedColorType::Rgb8,
        )?;
        println!("Output: {}", output.display());
    }
    Ok(())
}
