//! Particle lifecycle: shrink, expire, respawn.
//!
//! A lifecycle runs from a spawn at a random scale down to the reset
//! threshold. Each particle shrinks at its own rate so the field never
//! collapses and respawns in lockstep:
//!
//! ```ignore
//! let lifecycle = Lifecycle::new()
//!     .scale_range(0.4, 1.0)      // spawn scale phase
//!     .shrink_rate(0.001, 0.004)  // scale lost per tick
//!     .min_scale(0.05)            // reset threshold
//!     .recolor_on_reset(true);
//! ```
//!
//! Respawning reuses the particle's slot; see [`SpawnContext::respawn`].
//!
//! [`SpawnContext::respawn`]: crate::SpawnContext::respawn

use crate::config::{Physics, Span};
use crate::particle::{mass_from_scale, Particle};
use serde::{Deserialize, Serialize};

/// Lifecycle configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifecycle {
    /// Scale at or below which a particle is respawned.
    pub min_scale: f32,
    /// Range the spawn scale is drawn from. Must start above `min_scale`.
    pub scale: Span,
    /// Range the per-lifecycle shrink rate is drawn from.
    pub shrink_rate: Span,
    /// Redraw the palette color on every respawn instead of keeping the
    /// color drawn at field creation.
    pub recolor_on_reset: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            min_scale: 0.05,
            scale: Span::new(0.4, 1.0),
            shrink_rate: Span::new(0.001, 0.004),
            recolor_on_reset: false,
        }
    }
}

/// Outcome of advancing one particle's lifecycle by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleStep {
    /// Still alive; scale and mass updated.
    Shrunk,
    /// Reached the threshold; the slot must be respawned.
    Expired,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reset threshold.
    pub fn min_scale(mut self, min_scale: f32) -> Self {
        self.min_scale = min_scale;
        self
    }

    /// Set the spawn scale range.
    pub fn scale_range(mut self, min: f32, max: f32) -> Self {
        self.scale = Span::new(min, max);
        self
    }

    /// Set the shrink rate range.
    pub fn shrink_rate(mut self, min: f32, max: f32) -> Self {
        self.shrink_rate = Span::new(min, max);
        self
    }

    /// Redraw colors on respawn.
    pub fn recolor_on_reset(mut self, enabled: bool) -> Self {
        self.recolor_on_reset = enabled;
        self
    }

    /// Expected lifecycle length in ticks for a particle spawned at full
    /// scale with the slowest shrink rate.
    pub fn max_lifetime_ticks(&self) -> u32 {
        if self.shrink_rate.min <= 0.0 {
            return u32::MAX;
        }
        ((self.scale.max - self.min_scale) / self.shrink_rate.min).ceil() as u32
    }

    /// Shrink `p` by its rate and refresh its mass.
    ///
    /// Reports [`LifecycleStep::Expired`] once the scale is at or below the
    /// threshold, including when it crossed it during this very call.
    pub fn advance(&self, p: &mut Particle, physics: &Physics) -> LifecycleStep {
        if p.scale > self.min_scale {
            p.scale -= p.shrink_rate;
            p.mass = mass_from_scale(p.scale, physics.mass_multiplier, physics.min_mass);
        }

        if p.scale <= self.min_scale {
            LifecycleStep::Expired
        } else {
            LifecycleStep::Shrunk
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_builder_chain() {
        let l = Lifecycle::new()
            .min_scale(0.1)
            .scale_range(0.5, 0.9)
            .shrink_rate(0.002, 0.003)
            .recolor_on_reset(true);

        assert_eq!(l.min_scale, 0.1);
        assert_eq!(l.scale, Span::new(0.5, 0.9));
        assert_eq!(l.shrink_rate, Span::new(0.002, 0.003));
        assert!(l.recolor_on_reset);
    }

    #[test]
    fn test_advance_shrinks_and_updates_mass() {
        let l = Lifecycle::default();
        let physics = Physics::default();
        let mut p = Particle::at(Vec3::ZERO).with_scale(1.0).with_shrink_rate(0.01);

        assert_eq!(l.advance(&mut p, &physics), LifecycleStep::Shrunk);
        assert!((p.scale - 0.99).abs() < 1e-6);
        let expected = 0.99_f32.powi(3) * physics.mass_multiplier;
        assert!((p.mass - expected.max(physics.min_mass)).abs() < 1e-6);
    }

    #[test]
    fn test_crossing_threshold_expires_same_tick() {
        let l = Lifecycle::default().min_scale(0.1);
        let physics = Physics::default();
        let mut p = Particle::at(Vec3::ZERO).with_scale(0.1 + 0.0005).with_shrink_rate(0.001);

        assert_eq!(l.advance(&mut p, &physics), LifecycleStep::Expired);
    }

    #[test]
    fn test_already_below_threshold_expires_without_shrinking() {
        let l = Lifecycle::default().min_scale(0.1);
        let physics = Physics::default();
        let mut p = Particle::at(Vec3::ZERO).with_scale(0.05).with_shrink_rate(0.01);

        assert_eq!(l.advance(&mut p, &physics), LifecycleStep::Expired);
        assert_eq!(p.scale, 0.05);
    }

    #[test]
    fn test_max_lifetime_ticks() {
        let l = Lifecycle::default();
        // (1.0 - 0.05) / 0.001, give or take float rounding
        let ticks = l.max_lifetime_ticks();
        assert!((949..=951).contains(&ticks), "got {}", ticks);
    }
}
