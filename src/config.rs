//! Field configuration.
//!
//! A [`FieldConfig`] describes everything needed to build a
//! [`ParticleField`]: particle count, bounding box, radius range, palette,
//! lifecycle and physics constants, and where the field sits in the world.
//! Defaults give a sparse, slow field suited to a page background.
//!
//! Configs are plain data and serialize to JSON:
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_count(16)
//!     .with_physics(Physics { g: 0.004, ..Physics::default() });
//! config.save("field.json")?;
//! let loaded = FieldConfig::load("field.json")?;
//! ```
//!
//! [`ParticleField`]: crate::ParticleField

use crate::bounds::Bounds;
use crate::error::ConfigError;
use crate::lifecycle::Lifecycle;
use crate::palette::Palette;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Particle counts above this are allowed but the all-pairs force sum
/// starts to dominate the frame.
pub const PAIRWISE_SOFT_LIMIT: usize = 256;

/// Inclusive `[min, max]` range of `f32`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform draw in `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        let ok = self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange { name, min: self.min, max: self.max })
        }
    }
}

/// Constants of the force law and integrator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Gravitational constant.
    pub g: f32,
    /// Velocity multiplier applied every tick (1.0 = no damping).
    pub damping: f32,
    /// Pairs closer than this exert no force on each other.
    pub min_distance: f32,
    /// Floor for particle mass.
    pub min_mass: f32,
    /// Mass per unit of `scale³`.
    pub mass_multiplier: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            g: 0.002,
            damping: 0.98,
            min_distance: 0.1,
            min_mass: 0.01,
            mass_multiplier: 1.0,
        }
    }
}

impl Physics {
    fn check(&self) -> Result<(), ConfigError> {
        let invalid = |name, value| Err(ConfigError::InvalidPhysics { name, value });
        if !(self.g.is_finite() && self.g >= 0.0) {
            return invalid("g", self.g);
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return invalid("damping", self.damping);
        }
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return invalid("min_distance", self.min_distance);
        }
        if !(self.min_mass.is_finite() && self.min_mass > 0.0) {
            return invalid("min_mass", self.min_mass);
        }
        if !(self.mass_multiplier.is_finite() && self.mass_multiplier > 0.0) {
            return invalid("mass_multiplier", self.mass_multiplier);
        }
        Ok(())
    }
}

/// Where the field sits in world space and how it follows the scroll.
///
/// Every tick the field origin's Y is set to
/// `scroll * scroll_coefficient + base_y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub origin_x: f32,
    pub origin_z: f32,
    pub base_y: f32,
    pub scroll_coefficient: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            origin_x: 2.0,
            origin_z: 0.0,
            base_y: -1.0,
            scroll_coefficient: 0.0005,
        }
    }
}

/// Complete field configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles. Fixed for the lifetime of the field.
    pub count: usize,
    pub bounds: Bounds,
    /// Geometric radius range drawn at each spawn.
    pub radius: Span,
    /// Per-axis bound of the random spawn velocity.
    pub initial_speed: f32,
    pub palette: Palette,
    pub lifecycle: Lifecycle,
    pub physics: Physics,
    pub placement: Placement,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 20,
            bounds: Bounds::default(),
            radius: Span::new(0.03, 0.08),
            initial_speed: 0.01,
            palette: Palette::default(),
            lifecycle: Lifecycle::default(),
            physics: Physics::default(),
            placement: Placement::default(),
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the bounding box (full sizes per axis).
    pub fn with_bounds(mut self, x: f32, y: f32, z: f32) -> Self {
        self.bounds = Bounds::new(x, y, z);
        self
    }

    /// Set the geometric radius range.
    pub fn with_radius_range(mut self, min: f32, max: f32) -> Self {
        self.radius = Span::new(min, max);
        self
    }

    /// Set the per-axis spawn velocity bound (0 spawns at rest).
    pub fn with_initial_speed(mut self, speed: f32) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_physics(mut self, physics: Physics) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Shorthand for `lifecycle.recolor_on_reset`.
    pub fn with_recolor_on_reset(mut self, enabled: bool) -> Self {
        self.lifecycle.recolor_on_reset = enabled;
        self
    }

    /// Check every constant the simulation relies on.
    ///
    /// A validated config guarantees the simulation never divides by zero
    /// and every lifecycle makes progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, size) in [('x', self.bounds.x), ('y', self.bounds.y), ('z', self.bounds.z)] {
            if !(size.is_finite() && size > 0.0) {
                return Err(ConfigError::InvalidBounds { axis, size });
            }
        }

        self.radius.check("radius")?;
        if !(self.initial_speed.is_finite() && self.initial_speed >= 0.0) {
            return Err(ConfigError::InvalidRange {
                name: "initial_speed",
                min: -self.initial_speed,
                max: self.initial_speed,
            });
        }

        let lifecycle = &self.lifecycle;
        if !(lifecycle.min_scale.is_finite() && lifecycle.min_scale >= 0.0) {
            return Err(ConfigError::InvalidRange {
                name: "min_scale",
                min: lifecycle.min_scale,
                max: lifecycle.min_scale,
            });
        }
        lifecycle.scale.check("scale")?;
        if lifecycle.scale.min <= lifecycle.min_scale {
            return Err(ConfigError::ScaleBelowThreshold {
                scale_min: lifecycle.scale.min,
                min_scale: lifecycle.min_scale,
            });
        }
        lifecycle.shrink_rate.check("shrink_rate")?;
        if lifecycle.shrink_rate.min <= 0.0 {
            return Err(ConfigError::InvalidRange {
                name: "shrink_rate",
                min: lifecycle.shrink_rate.min,
                max: lifecycle.shrink_rate.max,
            });
        }

        self.physics.check()?;
        self.palette.sampler()?;

        let total = self.palette.total_weight();
        if (total - 1.0).abs() > 1e-3 {
            log::debug!("palette weights sum to {}, draws use them proportionally", total);
        }
        if self.count > PAIRWISE_SOFT_LIMIT {
            log::warn!(
                "{} particles: the all-pairs force sum is O(n^2) and has no spatial partitioning",
                self.count
            );
        }

        Ok(())
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing sections fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded field config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
