use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use collage_core::CanvasPreset;
use serde::Deserialize;

/// Defaults read from a TOML file; command line flags take precedence.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub canvas: Option<CanvasChoice>,
    pub tile_multiplier: Option<u32>,
    pub seed: Option<u64>,
    pub quality: Option<u8>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read config {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse config {:?}", path))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasChoice {
    /// 600x600 canvas, 100 px tiles
    Small,
    /// 768x768 canvas, 128 px tiles
    #[default]
    Large,
    /// 1536x768 canvas, 128 px tiles
    Wide,
}

impl CanvasChoice {
    pub fn to_preset(self) -> CanvasPreset {
        match self {
            CanvasChoice::Small => CanvasPreset::Small,
            CanvasChoice::Large => CanvasPreset::Large,
            CanvasChoice::Wide => CanvasPreset::Wide,
        }
    }
}
