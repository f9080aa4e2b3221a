//! Weighted color palettes.
//!
//! Every particle carries one palette color for a whole lifecycle. Colors are
//! drawn by weight, so a palette is usually one dominant base tone with a few
//! rare accents:
//!
//! ```ignore
//! let palette = Palette::new(vec![
//!     PaletteEntry::new(Vec3::splat(0.83), 0.7),       // base
//!     PaletteEntry::new(Vec3::new(0.55, 0.7, 0.95), 0.3), // accent
//! ]);
//! ```

use crate::error::ConfigError;
use glam::Vec3;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of a color within the field's [`Palette`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorIndex(pub usize);

/// One palette color and its relative draw weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Linear RGB, each channel 0.0-1.0.
    pub color: Vec3,
    /// Relative weight. Weights are proportional; they need not sum to 1.
    pub weight: f32,
}

impl PaletteEntry {
    pub fn new(color: Vec3, weight: f32) -> Self {
        Self { color, weight }
    }
}

/// A small fixed set of colors sampled by weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Light gray, the default dot color.
    pub const BASE: Vec3 = Vec3::new(0.827, 0.827, 0.827);

    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// A palette with a single color (every draw returns index 0).
    pub fn single(color: Vec3) -> Self {
        Self::new(vec![PaletteEntry::new(color, 1.0)])
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an index to its RGB color.
    ///
    /// Indices outside the palette resolve to [`Palette::BASE`].
    pub fn color(&self, index: ColorIndex) -> Vec3 {
        self.entries
            .get(index.0)
            .map(|e| e.color)
            .unwrap_or(Self::BASE)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Build the weighted sampler used for draws.
    ///
    /// Fails when the palette is empty, a weight is negative or non-finite,
    /// or all weights are zero.
    pub fn sampler(&self) -> Result<PaletteSampler, ConfigError> {
        if let Some(bad) = self.entries.iter().find(|e| !e.weight.is_finite()) {
            return Err(ConfigError::InvalidPalette(format!(
                "weight {} is not finite",
                bad.weight
            )));
        }
        let index = WeightedIndex::new(self.entries.iter().map(|e| e.weight))
            .map_err(|e| ConfigError::InvalidPalette(e.to_string()))?;
        Ok(PaletteSampler { index })
    }
}

impl Default for Palette {
    /// Light gray base with three soft accents (70/10/10/10).
    fn default() -> Self {
        Self::new(vec![
            PaletteEntry::new(Self::BASE, 0.7),
            PaletteEntry::new(Vec3::new(0.55, 0.70, 0.95), 0.1),  // Pale blue
            PaletteEntry::new(Vec3::new(0.72, 0.62, 0.95), 0.1),  // Lavender
            PaletteEntry::new(Vec3::new(0.98, 0.78, 0.50), 0.1),  // Amber
        ])
    }
}

/// Pre-built weighted distribution over a palette's entries.
#[derive(Clone, Debug)]
pub struct PaletteSampler {
    index: WeightedIndex<f32>,
}

impl PaletteSampler {
    /// Draw one color index.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ColorIndex {
        ColorIndex(self.index.sample(rng))
    }
}
