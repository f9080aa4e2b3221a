//! The particle field simulator.
//!
//! A [`ParticleField`] owns a fixed arena of particles and advances it one
//! discrete step per call to [`tick`](ParticleField::tick). The host render
//! loop calls `tick` once per frame with the current scroll position and
//! reads the result through [`snapshots`](ParticleField::snapshots) or
//! [`render::instances`](crate::render::instances).
//!
//! # Tick
//!
//! 1. Field origin Y snaps to `scroll * scroll_coefficient + base_y`.
//! 2. All-pairs gravity is summed into a scratch buffer.
//! 3. Each particle integrates (`v += F/m`, `v *= damping`, `x += v`).
//! 4. Positions wrap around the bounding box.
//! 5. Lifecycles shrink; expired particles respawn in their slot.
//!
//! # Example
//!
//! ```ignore
//! let mut field = ParticleField::seeded(FieldConfig::default(), 42)?;
//! loop {
//!     field.tick(scroll_y);
//!     for s in field.snapshots() {
//!         draw_circle(s.position, s.radius * s.scale, s.rgb);
//!     }
//! }
//! ```
//!
//! Dropping the field ends the simulation; nothing runs in the background.

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::forces::{accumulate_gravity, integrate};
use crate::lifecycle::LifecycleStep;
use crate::palette::{Palette, PaletteSampler};
use crate::particle::{mass_from_scale, Particle};
use crate::render::ParticleSnapshot;
use crate::spawn::SpawnContext;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Summary of one call to [`ParticleField::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Number of ticks completed, including this one.
    pub tick: u64,
    /// Particles that reached the end of their lifecycle and respawned.
    pub respawned: usize,
}

/// Fixed-size N-body particle field.
///
/// Generic over the random source so tests can inject a seeded generator.
pub struct ParticleField<R = SmallRng> {
    config: FieldConfig,
    sampler: PaletteSampler,
    particles: Vec<Particle>,
    /// Scratch buffer for the per-tick force sum; same length as `particles`.
    forces: Vec<Vec3>,
    vertical_offset: f32,
    rng: R,
    ticks: u64,
}

impl ParticleField<SmallRng> {
    /// Field with a deterministic RNG.
    pub fn seeded(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    /// Field seeded from OS entropy.
    pub fn from_entropy(config: FieldConfig) -> Result<Self, ConfigError> {
        Self::new(config, SmallRng::from_entropy())
    }
}

impl<R: Rng> ParticleField<R> {
    /// Validate `config` and spawn `config.count` particles.
    pub fn new(config: FieldConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = config.palette.sampler()?;

        let particles: Vec<Particle> = {
            let mut ctx = SpawnContext::new(&config, &sampler, &mut rng);
            (0..config.count).map(|_| ctx.spawn()).collect()
        };

        log::debug!(
            "spawned particle field: {} particles in {:?}, lifecycles up to {} ticks",
            particles.len(),
            config.bounds,
            config.lifecycle.max_lifetime_ticks()
        );

        Ok(Self::assemble(config, sampler, particles, rng))
    }

    /// Build a field from explicit particle records.
    ///
    /// `config.count` is replaced by `particles.len()`. Masses are kept as
    /// given but floored at `physics.min_mass`; lifecycles continue from the
    /// given scales. Every particle must have a finite scale and a positive,
    /// finite shrink rate, otherwise its lifecycle would never end.
    pub fn from_particles(
        mut config: FieldConfig,
        mut particles: Vec<Particle>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.count = particles.len();
        config.validate()?;
        let sampler = config.palette.sampler()?;

        let min_mass = config.physics.min_mass;
        for (slot, p) in particles.iter_mut().enumerate() {
            if !(p.shrink_rate.is_finite() && p.shrink_rate > 0.0) {
                return Err(ConfigError::InvalidParticle {
                    slot,
                    field: "shrink_rate",
                    value: p.shrink_rate,
                });
            }
            if !p.scale.is_finite() {
                return Err(ConfigError::InvalidParticle {
                    slot,
                    field: "scale",
                    value: p.scale,
                });
            }
            p.mass = p.mass.max(min_mass);
        }

        Ok(Self::assemble(config, sampler, particles, rng))
    }

    fn assemble(config: FieldConfig, sampler: PaletteSampler, particles: Vec<Particle>, rng: R) -> Self {
        let forces = vec![Vec3::ZERO; particles.len()];
        let vertical_offset = config.placement.base_y;
        Self {
            config,
            sampler,
            particles,
            forces,
            vertical_offset,
            rng,
            ticks: 0,
        }
    }

    /// Advance the whole field by one step.
    ///
    /// `scroll` is the host's current scroll position (larger = scrolled
    /// further). It is read once and never stored beyond the derived offset.
    pub fn tick(&mut self, scroll: f32) -> TickReport {
        let placement = &self.config.placement;
        self.vertical_offset = scroll * placement.scroll_coefficient + placement.base_y;

        accumulate_gravity(&self.particles, &self.config.physics, &mut self.forces);

        let physics = &self.config.physics;
        let bounds = &self.config.bounds;
        let lifecycle = &self.config.lifecycle;
        let mut ctx = SpawnContext::new(&self.config, &self.sampler, &mut self.rng);
        let mut respawned = 0;

        for (slot, (p, force)) in self.particles.iter_mut().zip(&self.forces).enumerate() {
            integrate(p, *force, physics);
            bounds.wrap(&mut p.position);

            if lifecycle.advance(p, physics) == LifecycleStep::Expired {
                ctx.respawn(p);
                respawned += 1;
                log::trace!("slot {} respawned (generation {})", slot, p.generation);
            }
        }

        self.ticks += 1;
        TickReport {
            tick: self.ticks,
            respawned,
        }
    }

    /// Force an immediate respawn of one slot, as if its lifecycle ended.
    ///
    /// Returns `false` if `slot` is out of range.
    pub fn respawn(&mut self, slot: usize) -> bool {
        let Some(p) = self.particles.get_mut(slot) else {
            return false;
        };
        SpawnContext::new(&self.config, &self.sampler, &mut self.rng).respawn(p);
        true
    }

    /// Change a particle's scale, keeping its mass on the volume law.
    ///
    /// Returns `false` if `slot` is out of range.
    pub fn set_scale(&mut self, slot: usize, scale: f32) -> bool {
        let physics = &self.config.physics;
        let Some(p) = self.particles.get_mut(slot) else {
            return false;
        };
        p.scale = scale;
        p.mass = mass_from_scale(scale, physics.mass_multiplier, physics.min_mass);
        true
    }
}

impl<R> ParticleField<R> {
    /// Per-frame render data, one snapshot per slot in slot order.
    pub fn snapshots(&self) -> impl Iterator<Item = ParticleSnapshot> + '_ {
        let origin = self.origin();
        self.particles
            .iter()
            .map(move |p| ParticleSnapshot::of(p, origin, &self.config.palette))
    }

    /// Read-only view of the particle arena.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles. Constant for the life of the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current Y translation of the whole field.
    #[inline]
    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    /// World-space translation applied to every particle.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        let placement = &self.config.placement;
        Vec3::new(placement.origin_x, self.vertical_offset, placement.origin_z)
    }

    /// Ticks completed so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }
}

impl<R> Drop for ParticleField<R> {
    fn drop(&mut self) {
        log::debug!(
            "disposing particle field ({} particles, {} ticks)",
            self.particles.len(),
            self.ticks
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Physics;

    #[test]
    fn test_new_spawns_count() {
        let field = ParticleField::seeded(FieldConfig::default().with_count(12), 1).unwrap();
        assert_eq!(field.len(), 12);
        assert_eq!(field.ticks(), 0);
        assert_eq!(field.vertical_offset(), -1.0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = FieldConfig::default().with_bounds(0.0, 1.0, 1.0);
        assert!(ParticleField::seeded(config, 1).is_err());
    }

    #[test]
    fn test_empty_field_ticks() {
        let mut field = ParticleField::seeded(FieldConfig::default().with_count(0), 1).unwrap();
        let report = field.tick(100.0);
        assert_eq!(report, TickReport { tick: 1, respawned: 0 });
        assert!(field.is_empty());
        assert_eq!(field.snapshots().count(), 0);
    }

    #[test]
    fn test_vertical_offset_snaps_to_scroll() {
        let mut field = ParticleField::seeded(FieldConfig::default().with_count(3), 1).unwrap();

        field.tick(2000.0);
        assert!((field.vertical_offset() - 0.0).abs() < 1e-6);

        field.tick(0.0);
        assert!((field.vertical_offset() - -1.0).abs() < 1e-6);

        assert_eq!(field.origin(), Vec3::new(2.0, -1.0, 0.0));
    }

    #[test]
    fn test_from_particles_floors_mass() {
        let config = FieldConfig::default();
        let particles = vec![Particle::at(Vec3::ZERO).with_mass(0.0)];
        let field = ParticleField::from_particles(config, particles, SmallRng::seed_from_u64(0)).unwrap();

        assert_eq!(field.len(), 1);
        assert_eq!(field.config().count, 1);
        assert_eq!(field.particles()[0].mass, Physics::default().min_mass);
    }

    #[test]
    fn test_from_particles_rejects_stalled_lifecycle() {
        let particles = vec![
            Particle::at(Vec3::ZERO),
            Particle::at(Vec3::X).with_shrink_rate(0.0),
        ];
        let result = ParticleField::from_particles(FieldConfig::default(), particles, SmallRng::seed_from_u64(0));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParticle { slot: 1, field: "shrink_rate", .. })
        ));

        let nan_rate = vec![Particle::at(Vec3::ZERO).with_shrink_rate(f32::NAN)];
        assert!(ParticleField::from_particles(FieldConfig::default(), nan_rate, SmallRng::seed_from_u64(0)).is_err());

        let nan_scale = vec![Particle::at(Vec3::ZERO).with_scale(f32::NAN)];
        assert!(matches!(
            ParticleField::from_particles(FieldConfig::default(), nan_scale, SmallRng::seed_from_u64(0)),
            Err(ConfigError::InvalidParticle { field: "scale", .. })
        ));
    }

    #[test]
    fn test_hand_built_particle_eventually_respawns() {
        let particles = vec![Particle::at(Vec3::ZERO).with_mass(f32::NAN)];
        let mut field =
            ParticleField::from_particles(FieldConfig::default(), particles, SmallRng::seed_from_u64(0)).unwrap();
        assert_eq!(field.particles()[0].mass, Physics::default().min_mass);

        for _ in 0..2000 {
            field.tick(0.0);
        }
        let p = field.particles()[0];
        assert!(p.generation >= 1, "slot never respawned");
        assert!(p.scale > FieldConfig::default().lifecycle.min_scale);
    }

    #[test]
    fn test_forced_respawn() {
        let mut field = ParticleField::seeded(FieldConfig::default().with_count(2), 9).unwrap();
        assert!(field.respawn(1));
        assert_eq!(field.particles()[1].generation, 1);
        assert_eq!(field.particles()[0].generation, 0);
        assert!(!field.respawn(2));
    }

    #[test]
    fn test_set_scale_updates_mass() {
        let mut field = ParticleField::seeded(FieldConfig::default().with_count(1), 9).unwrap();
        assert!(field.set_scale(0, 0.5));
        let p = field.particles()[0];
        assert_eq!(p.scale, 0.5);
        assert!((p.mass - 0.125).abs() < 1e-6);
        assert!(!field.set_scale(1, 0.5));
    }

    #[test]
    fn test_report_counts_ticks() {
        let mut field = ParticleField::seeded(FieldConfig::default(), 4).unwrap();
        for expected in 1..=5 {
            assert_eq!(field.tick(0.0).tick, expected);
        }
        assert_eq!(field.ticks(), 5);
    }
}
