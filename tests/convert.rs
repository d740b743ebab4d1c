//! End-to-end pipeline tests: image buffer in, Petmate document out, and
//! back to pixels again.

use image::{DynamicImage, Rgb, RgbImage};
use picscii::charset::Glyph;
use picscii::palette::PALETTE;
use picscii::render::render_screen;
use picscii::screen::{CELLS, PIXEL_HEIGHT, PIXEL_WIDTH};
use picscii::{
    BackgroundMode, CharSet, CharsetKind, Config, Converter, Petmate, PicsciiError, Raster,
    ScreenCell,
};

/// A set shaped like the real ROM where it matters: an empty glyph at the
/// space code, a full block, and a filler pattern everywhere else.
fn test_charset() -> CharSet {
    let mut glyphs = vec![Glyph::new([0b0011_1100; 8]); 256];
    glyphs[32] = Glyph::new([0x00; 8]);
    glyphs[160] = Glyph::new([0xFF; 8]);
    CharSet::from_glyphs(glyphs)
}

fn solid_raster(color: usize) -> Raster {
    let mut raster = Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT);
    for y in 0..PIXEL_HEIGHT {
        for x in 0..PIXEL_WIDTH {
            raster.put_pixel(x, y, PALETTE[color]);
        }
    }
    raster
}

#[test]
fn black_image_becomes_space_cells() {
    let converter = Converter::new(test_charset()).with_background(BackgroundMode::FirstPixel);
    let screen = converter.convert_raster(&Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT), "black").unwrap();

    assert_eq!(screen.id, "black");
    assert_eq!(screen.background, 0);
    assert_eq!(screen.cells.len(), CELLS);
    // the empty glyph at the first non-background color wins every cell
    for cell in &screen.cells {
        assert_eq!(*cell, ScreenCell { code: 32, color: 1 });
    }
}

#[test]
fn single_colored_tile_matches_the_full_block() {
    let mut raster = Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT);
    for y in 0..8 {
        for x in 0..8 {
            raster.put_pixel(x, y, PALETTE[2]);
        }
    }
    let converter = Converter::new(test_charset());
    let screen = converter.convert_raster(&raster, "block").unwrap();

    assert_eq!(screen.background, 0);
    assert_eq!(screen.cells[0], ScreenCell { code: 160, color: 2 });
    for cell in &screen.cells[1..] {
        assert_eq!(*cell, ScreenCell { code: 32, color: 1 });
    }
}

#[test]
fn rendering_inverts_matching_for_palette_pure_images() {
    let mut raster = Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT);
    for y in 0..8 {
        for x in 0..8 {
            raster.put_pixel(x, y, PALETTE[2]);
        }
    }
    let charset = test_charset();
    let screen = Converter::new(charset.clone()).convert_raster(&raster, "block").unwrap();
    let rendered = render_screen(&screen, &charset);
    assert_eq!(rendered, raster);
}

#[test]
fn screens_survive_the_petmate_round_trip() {
    let mut second = solid_raster(5);
    for y in 100..108 {
        for x in 0..8 {
            second.put_pixel(x, y, PALETTE[7]);
        }
    }
    let converter = Converter::new(test_charset());
    let screens = vec![
        converter.convert_raster(&Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT), "a").unwrap(),
        converter.convert_raster(&second, "b").unwrap(),
    ];

    let json = Petmate::from_screens(&screens, CharsetKind::Uppercase).to_json().unwrap();
    let decoded = Petmate::from_json(&json).unwrap().to_screens().unwrap();
    assert_eq!(decoded, screens);
}

#[test]
fn first_pixel_and_optimal_backgrounds_can_differ() {
    let mut raster = solid_raster(5);
    raster.put_pixel(0, 0, PALETTE[3]);

    let converter = Converter::new(test_charset());
    let optimal = converter.convert_raster(&raster, "x").unwrap();
    assert_eq!(optimal.background, 5);

    let converter = converter.with_background(BackgroundMode::FirstPixel);
    let first = converter.convert_raster(&raster, "x").unwrap();
    assert_eq!(first.background, 3);
}

#[test]
fn pinned_background_sample_overrides_the_image() {
    let converter = Converter::new(test_charset())
        .with_background(BackgroundMode::FirstPixel)
        .with_background_sample(11);
    let screen = converter.convert_raster(&solid_raster(5), "x").unwrap();
    assert_eq!(screen.background, 11);
}

#[test]
fn empty_glyph_list_is_rejected() {
    let converter = Converter::new(test_charset()).with_allowed_glyphs(Vec::new());
    match converter.convert_raster(&Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT), "x") {
        Err(PicsciiError::EmptyGlyphSet) => {}
        other => panic!("expected EmptyGlyphSet, got {:?}", other),
    }
}

#[test]
fn reversed_config_range_is_rejected_too() {
    let config = Config { first_glyph: 200, last_glyph: 100, ..Config::default() };
    let converter = Converter::from_config(test_charset(), &config);
    assert!(matches!(
        converter.convert_raster(&Raster::black(PIXEL_WIDTH, PIXEL_HEIGHT), "x"),
        Err(PicsciiError::EmptyGlyphSet)
    ));
}

#[test]
fn restricted_glyph_range_only_uses_those_codes() {
    let converter = Converter::new(test_charset()).with_allowed_glyphs((64..=95).collect());
    let screen = converter.convert_raster(&solid_raster(6), "x").unwrap();
    for cell in &screen.cells {
        assert!((64..=95).contains(&cell.code));
    }
}

#[test]
fn decoded_images_go_through_the_same_pipeline() {
    // a solid image survives the resize untouched
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 400, Rgb(PALETTE[0])));
    let converter = Converter::new(test_charset()).with_background(BackgroundMode::FirstPixel);
    let screen = converter.convert(&image, "solid").unwrap();
    assert_eq!(screen.background, 0);
    for cell in &screen.cells {
        assert_eq!(*cell, ScreenCell { code: 32, color: 1 });
    }
}

#[test]
fn fast_and_slow_agree_on_solid_screens() {
    let raster = solid_raster(4);
    let slow = Converter::new(test_charset()).convert_raster(&raster, "x").unwrap();
    let fast = Converter::new(test_charset())
        .with_strategy(picscii::MatchStrategy::Fast)
        .convert_raster(&raster, "x")
        .unwrap();
    assert_eq!(slow.background, fast.background);
    // every tile is pure background, so both land on the empty glyph
    assert_eq!(slow.cells, fast.cells);
    assert!(slow.cells.iter().all(|cell| cell.code == 32));
}
