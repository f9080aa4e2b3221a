//! Pairwise gravity and integration.
//!
//! Every particle attracts every other with an inverse-square force:
//!
//! ```text
//! F = G * m_i * m_j / r²    along (x_j - x_i) / r
//! ```
//!
//! # Scaling
//!
//! The sum is all-pairs, O(n²), with no spatial partitioning. That is fine
//! for the dozen or two particles a page background uses. Growing the count
//! into the hundreds needs a tree or grid (Barnes–Hut or a spatial hash).

use crate::config::Physics;
use crate::particle::Particle;
use glam::Vec3;

/// Accumulate the total gravitational force on each particle into `forces`.
///
/// `forces` is overwritten and must have the same length as `particles`.
/// Each unordered pair is visited once and its force applied with opposite
/// signs, so the pair contributions cancel exactly. Pairs closer than
/// `min_distance` contribute nothing.
pub fn accumulate_gravity(particles: &[Particle], physics: &Physics, forces: &mut [Vec3]) {
    debug_assert_eq!(particles.len(), forces.len());

    for f in forces.iter_mut() {
        *f = Vec3::ZERO;
    }

    let n = particles.len();
    for i in 0..n {
        let pi = &particles[i];
        for j in (i + 1)..n {
            let pj = &particles[j];

            let delta = pj.position - pi.position;
            let r = delta.length();
            if !(r >= physics.min_distance) {
                continue;
            }

            let magnitude = physics.g * pi.mass * pj.mass / (r * r);
            let force = delta * (magnitude / r);

            forces[i] += force;
            forces[j] -= force;
        }
    }
}

/// Apply one tick of semi-implicit Euler with velocity damping.
///
/// `v += F / m; v *= damping; x += v`
#[inline]
pub fn integrate(p: &mut Particle, force: Vec3, physics: &Physics) {
    let acceleration = force / p.mass;
    p.velocity += acceleration;
    p.velocity *= physics.damping;
    p.position += p.velocity;
}
