//! picscii CLI - Convert images to C64 PETSCII screens in Petmate format

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rayon::prelude::*;

use picscii::files;
use picscii::{
    BackgroundMode, CharSet, CharsetKind, Config, Converter, MatchStrategy, Petmate, PicsciiError,
    Screen,
};

#[derive(Parser)]
#[command(name = "picscii", about = "Convert images to C64 PETSCII screens")]
struct Args {
    /// Input image file or a folder of images
    input: PathBuf,
    /// Glyph matching method
    #[arg(short, long, value_enum)]
    method: Option<MatchStrategy>,
    /// How to pick the background color
    #[arg(short, long, value_enum)]
    background: Option<BackgroundMode>,
    /// Which half of the character ROM to match against
    #[arg(short, long, value_enum)]
    charset: Option<CharsetKind>,
    /// Character ROM file
    #[arg(long, default_value = "assets/characters.901225-01.bin")]
    charset_file: PathBuf,
    /// First glyph index the matcher may use
    #[arg(long)]
    first_glyph: Option<u8>,
    /// Last glyph index the matcher may use
    #[arg(long)]
    last_glyph: Option<u8>,
    /// Binarize the image before matching
    #[arg(long)]
    mono: bool,
    /// Gray cutoff for --mono
    #[arg(long)]
    threshold: Option<u8>,
    /// Atkinson-dither instead of hard thresholding with --mono
    #[arg(long)]
    dither: bool,
    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,
    /// Read settings from a JSON config file
    #[arg(long)]
    load_config: Option<PathBuf>,
    /// Write the effective settings to a JSON config file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

/// Loaded config first, then every flag given on the command line on top.
fn effective_config(args: &Args) -> Result<Config, PicsciiError> {
    let mut config = match &args.load_config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(method) = args.method {
        config.matcher = method;
    }
    if let Some(background) = args.background {
        config.background = background;
    }
    if let Some(charset) = args.charset {
        config.charset = charset;
    }
    if let Some(first) = args.first_glyph {
        config.first_glyph = first;
    }
    if let Some(last) = args.last_glyph {
        config.last_glyph = last;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    config.mono |= args.mono;
    config.dither |= args.dither;
    config.overwrite |= args.overwrite;
    Ok(config)
}

fn main() -> Result<(), PicsciiError> {
    env_logger::init();
    let args = Args::parse();
    let config = effective_config(&args)?;

    let inputs = files::collect_images(&args.input)?;
    let output = PathBuf::from(format!("{}.petmate", args.input.display()));
    files::check_overwrite(&output, config.overwrite)?;

    let charset = CharSet::load(&args.charset_file, config.charset)?;
    let mut converter = Converter::from_config(charset, &config);

    if config.background == BackgroundMode::FirstPixel {
        let first = image::open(&inputs[0])?;
        let sample = converter.first_pixel_sample(&first);
        converter = converter.with_background_sample(sample);
    }

    info!("converting {} images from {}", inputs.len(), args.input.display());
    let screens: Vec<Screen> = inputs
        .par_iter()
        .map(|path| {
            let image = image::open(path)?;
            converter.convert(&image, files::file_stem(path))
        })
        .collect::<Result<_, _>>()?;

    let petmate = Petmate::from_screens(&screens, config.charset);
    fs::write(&output, petmate.to_json()?)?;
    println!("Output: {}", output.display());

    if let Some(path) = &args.save_config {
        config.save(path)?;
    }
    Ok(())
}
