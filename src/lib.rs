//! # Backdrop - decorative N-body particle field
//!
//! A small, fixed population of spheres drifting under mutual gravity inside
//! a wrap-around box. Each one slowly shrinks; when it gets too small it is
//! reborn somewhere random with a fresh size and color. The whole field
//! slides vertically with the page scroll position.
//!
//! The simulation is a plain CPU library with no renderer dependency. A host
//! render loop calls [`ParticleField::tick`] once per frame and draws the
//! result; [`Viewer`] is such a host, built on winit and wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use backdrop::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = FieldConfig::default()
//!         .with_count(20)
//!         .with_bounds(15.0, 10.0, 4.0);
//!
//!     let mut field = ParticleField::seeded(config, 42)?;
//!     for frame in 0..600 {
//!         field.tick(frame as f32 * 2.0);
//!         for s in field.snapshots() {
//!             // draw a circle of radius s.visual_radius() at s.position
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] has position, velocity, mass, scale, radius, a shrink rate
//! and a palette index. Mass follows scale by a cube law and never drops
//! below [`Physics::min_mass`].
//!
//! ### Tick
//!
//! Every tick runs, in order:
//!
//! | Step | Where |
//! |------|-------|
//! | Vertical offset from scroll | [`Placement`] |
//! | All-pairs gravity with minimum-distance cutoff | [`forces::accumulate_gravity`] |
//! | Integrate and damp | [`forces::integrate`] |
//! | Toroidal wrap | [`Bounds::wrap`] |
//! | Shrink, respawn when spent | [`Lifecycle::advance`], [`SpawnContext::respawn`] |
//!
//! ### Randomness
//!
//! The field is generic over its random source. [`ParticleField::seeded`]
//! gives a reproducible run; [`ParticleField::new`] accepts any [`rand::Rng`].

pub mod bounds;
pub mod config;
pub mod error;
pub mod field;
pub mod forces;
mod gpu;
pub mod lifecycle;
pub mod palette;
pub mod particle;
pub mod render;
pub mod spawn;
pub mod viewer;

pub use bounds::Bounds;
pub use bytemuck;
pub use config::{FieldConfig, Physics, Placement, Span, PAIRWISE_SOFT_LIMIT};
pub use error::{ConfigError, GpuError, ViewerError};
pub use field::{ParticleField, TickReport};
pub use glam::{Vec2, Vec3, Vec4};
pub use lifecycle::{Lifecycle, LifecycleStep};
pub use palette::{ColorIndex, Palette, PaletteEntry, PaletteSampler};
pub use particle::{mass_from_scale, Particle};
pub use render::{instances, write_instances, ParticleInstance, ParticleSnapshot};
pub use spawn::SpawnContext;
pub use viewer::Viewer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use backdrop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bounds::Bounds;
    pub use crate::config::{FieldConfig, Physics, Placement, Span};
    pub use crate::error::{ConfigError, ViewerError};
    pub use crate::field::{ParticleField, TickReport};
    pub use crate::lifecycle::Lifecycle;
    pub use crate::palette::{ColorIndex, Palette, PaletteEntry};
    pub use crate::particle::Particle;
    pub use crate::render::{ParticleInstance, ParticleSnapshot};
    pub use crate::viewer::Viewer;
    pub use crate::{Vec2, Vec3, Vec4};
}
