//! Run configuration and its JSON persistence.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::charset::CharsetKind;
use crate::matcher::MatchStrategy;
use crate::Result;

/// How the shared background color of a screen is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundMode {
    /// The most frequent quantized color of each image.
    Optimal,
    /// The quantized first pixel, sampled once per batch.
    FirstPixel,
}

/// Complete settings for one conversion run. Every field has a default,
/// so a partial config file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub matcher: MatchStrategy,
    pub background: BackgroundMode,
    pub charset: CharsetKind,
    /// Inclusive glyph index range the matcher may choose from.
    pub first_glyph: u8,
    pub last_glyph: u8,
    pub mono: bool,
    pub threshold: u8,
    pub dither: bool,
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matcher: MatchStrategy::Slow,
            background: BackgroundMode::Optimal,
            charset: CharsetKind::Uppercase,
            first_glyph: 0,
            last_glyph: 255,
            mono: false,
            threshold: 128,
            dither: false,
            overwrite: false,
        }
    }
}

impl Config {
    /// The ordered candidate list described by the glyph range. Empty when
    /// the range is reversed.
    pub fn allowed_glyphs(&self) -> Vec<u8> {
        if self.first_glyph > self.last_glyph {
            return Vec::new();
        }
        (self.first_glyph..=self.last_glyph).collect()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(fs::write(path, serde_json::to_string_pretty(self)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_full_glyph_range() {
        let config = Config::default();
        assert_eq!(config.matcher, MatchStrategy::Slow);
        assert_eq!(config.background, BackgroundMode::Optimal);
        assert_eq!(config.charset, CharsetKind::Uppercase);
        assert_eq!((config.first_glyph, config.last_glyph), (0, 255));
        assert_eq!(config.threshold, 128);
        let allowed = config.allowed_glyphs();
        assert_eq!(allowed.len(), 256);
        assert_eq!(allowed[0], 0);
        assert_eq!(allowed[255], 255);
    }

    #[test]
    fn reversed_range_yields_no_glyphs() {
        let config = Config {
            first_glyph: 10,
            last_glyph: 9,
            ..Config::default()
        };
        assert!(config.allowed_glyphs().is_empty());
    }

    #[test]
    fn serializes_with_camel_case_tags() {
        let config = Config {
            background: BackgroundMode::FirstPixel,
            matcher: MatchStrategy::Fast,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"background\":\"firstPixel\""));
        assert!(json.contains("\"matcher\":\"fast\""));
        assert!(json.contains("\"charset\":\"uppercase\""));
        assert!(json.contains("\"firstGlyph\":0"));
        assert!(json.contains("\"lastGlyph\":255"));
    }

    #[test]
    fn partial_config_keeps_defaults_for_the_rest() {
        let config: Config = serde_json::from_str("{\"matcher\":\"fast\",\"threshold\":96}").unwrap();
        assert_eq!(config.matcher, MatchStrategy::Fast);
        assert_eq!(config.threshold, 96);
        assert_eq!(config.background, BackgroundMode::Optimal);
        assert_eq!(config.last_glyph, 255);
        assert!(!config.mono);
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config {
            matcher: MatchStrategy::Fast,
            background: BackgroundMode::FirstPixel,
            charset: CharsetKind::Lowercase,
            first_glyph: 32,
            last_glyph: 90,
            mono: true,
            threshold: 100,
            dither: true,
            overwrite: true,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }
}
