//! # Two Bodies
//!
//! Two equal particles at rest, two units apart, with no damping. They fall
//! toward each other with equal and opposite velocities.
//!
//! Run with: `cargo run --example two_body`

use backdrop::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let physics = Physics {
        g: 0.001,
        damping: 1.0,
        min_distance: 0.01,
        ..Physics::default()
    };

    // Lifecycles long enough that nothing respawns during the demo.
    let lifecycle = Lifecycle::new()
        .scale_range(1.0, 1.0)
        .shrink_rate(1e-6, 1e-6);

    let config = FieldConfig::default()
        .with_physics(physics)
        .with_lifecycle(lifecycle);

    let particles = vec![
        Particle::at(Vec3::new(-1.0, 0.0, 0.0)).with_shrink_rate(1e-6),
        Particle::at(Vec3::new(1.0, 0.0, 0.0)).with_shrink_rate(1e-6),
    ];

    let mut field = ParticleField::from_particles(config, particles, SmallRng::seed_from_u64(0))?;

    for tick in 1..=400 {
        field.tick(0.0);
        if tick % 40 == 0 {
            let [a, b] = [field.particles()[0], field.particles()[1]];
            println!(
                "tick {:>3}: x = {:+.4} / {:+.4}   vx = {:+.6} / {:+.6}",
                tick, a.position.x, b.position.x, a.velocity.x, b.velocity.x
            );
        }
    }

    Ok(())
}
