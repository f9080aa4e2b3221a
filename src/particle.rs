//! Particle records and the mass law.

use crate::palette::ColorIndex;
use glam::Vec3;

/// One simulated body.
///
/// Particles live in a fixed arena owned by [`ParticleField`] and are
/// recycled in place when their lifecycle ends.
///
/// [`ParticleField`]: crate::ParticleField
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position relative to the field origin.
    pub position: Vec3,
    /// Displacement applied per tick.
    pub velocity: Vec3,
    /// Gravitational mass. Always positive.
    pub mass: f32,
    /// Lifecycle scale, shrinking toward the reset threshold.
    pub scale: f32,
    /// Geometric radius. Visual radius is `radius * scale`.
    pub radius: f32,
    /// Scale lost per tick during this lifecycle.
    pub shrink_rate: f32,
    /// Palette color.
    pub color: ColorIndex,
    /// Number of times this slot has respawned.
    pub generation: u32,
}

/// Shrink rate given to hand-built particles: the slowest default lifecycle.
pub const DEFAULT_SHRINK_RATE: f32 = 0.001;

impl Particle {
    /// A resting particle with unit scale and mass, for hand-built scenes.
    ///
    /// It shrinks at [`DEFAULT_SHRINK_RATE`], so it lives about a thousand
    /// ticks before its first respawn.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass: 1.0,
            scale: 1.0,
            radius: 0.05,
            shrink_rate: DEFAULT_SHRINK_RATE,
            color: ColorIndex(0),
            generation: 0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_shrink_rate(mut self, shrink_rate: f32) -> Self {
        self.shrink_rate = shrink_rate;
        self
    }

    pub fn with_color(mut self, color: ColorIndex) -> Self {
        self.color = color;
        self
    }

    /// Radius as drawn.
    #[inline]
    pub fn visual_radius(&self) -> f32 {
        self.radius * self.scale
    }
}

/// Volume-proportional mass: `scale³ * multiplier`, floored at `min_mass`.
#[inline]
pub fn mass_from_scale(scale: f32, multiplier: f32, min_mass: f32) -> f32 {
    let mass = scale * scale * scale * multiplier;
    // max() also maps a NaN mass to the floor
    mass.max(min_mass)
}
