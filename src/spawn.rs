//! Spawn context for particle initialization and respawn.
//!
//! All randomness in the crate flows through a [`SpawnContext`], which
//! borrows the RNG owned by the field. Seeding that RNG makes every spawn and
//! respawn reproducible.

use crate::config::FieldConfig;
use crate::palette::{ColorIndex, PaletteSampler};
use crate::particle::{mass_from_scale, Particle};
use glam::Vec3;
use rand::Rng;

/// Helpers for drawing particle state from the field's RNG.
///
/// ```ignore
/// let mut ctx = SpawnContext::new(&config, &sampler, &mut rng);
/// let p = ctx.spawn();
/// ctx.respawn(&mut particles[3]);
/// ```
pub struct SpawnContext<'a, R: Rng + ?Sized> {
    config: &'a FieldConfig,
    palette: &'a PaletteSampler,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> SpawnContext<'a, R> {
    pub fn new(config: &'a FieldConfig, palette: &'a PaletteSampler, rng: &'a mut R) -> Self {
        Self { config, palette, rng }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[min, max]`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Random point inside the field bounds.
    pub fn random_in_bounds(&mut self) -> Vec3 {
        self.config.bounds.sample(self.rng)
    }

    /// Random velocity with each axis in `[-initial_speed, initial_speed]`.
    pub fn small_velocity(&mut self) -> Vec3 {
        let eps = self.config.initial_speed;
        if eps <= 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(
            self.random_range(-eps, eps),
            self.random_range(-eps, eps),
            self.random_range(-eps, eps),
        )
    }

    /// Weighted palette draw.
    pub fn draw_color(&mut self) -> ColorIndex {
        self.palette.draw(self.rng)
    }

    // ========== Particles ==========

    /// A fresh particle for a new field.
    pub fn spawn(&mut self) -> Particle {
        let mut p = Particle::at(Vec3::ZERO);
        self.roll_lifecycle(&mut p);
        p.color = self.draw_color();
        p
    }

    /// Reset a particle in place at the end of its lifecycle.
    ///
    /// Position, radius, scale, velocity, shrink rate and mass are redrawn.
    /// The color is redrawn only with `recolor_on_reset`.
    pub fn respawn(&mut self, p: &mut Particle) {
        self.roll_lifecycle(p);
        if self.config.lifecycle.recolor_on_reset {
            p.color = self.draw_color();
        }
        p.generation = p.generation.wrapping_add(1);
    }

    fn roll_lifecycle(&mut self, p: &mut Particle) {
        let config = self.config;
        let lifecycle = &config.lifecycle;
        let physics = &config.physics;

        p.position = self.random_in_bounds();
        p.radius = config.radius.sample(self.rng);
        p.scale = lifecycle.scale.sample(self.rng);
        p.velocity = self.small_velocity();
        p.shrink_rate = lifecycle.shrink_rate.sample(self.rng);
        p.mass = mass_from_scale(p.scale, physics.mass_multiplier, physics.min_mass);
    }
}
