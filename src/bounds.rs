//! Field bounding box and toroidal wrapping.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned box centered at the field origin.
///
/// Sizes are full widths: a box with `x = 15.0` spans `-7.5..=7.5`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Full sizes as a vector.
    #[inline]
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Half sizes as a vector.
    #[inline]
    pub fn half(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Whether `p` lies inside the box (faces inclusive).
    pub fn contains(&self, p: Vec3) -> bool {
        let h = self.half();
        p.x.abs() <= h.x && p.y.abs() <= h.y && p.z.abs() <= h.z
    }

    /// Uniform random point: `random() * size - size / 2` per axis.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let size = self.size();
        Vec3::new(
            rng.gen::<f32>() * size.x - size.x / 2.0,
            rng.gen::<f32>() * size.y - size.y / 2.0,
            rng.gen::<f32>() * size.z - size.z / 2.0,
        )
    }

    /// Wrap a position around the box (toroidal topology).
    ///
    /// Crossing a face moves the particle onto the opposite face, so the
    /// result is always inside the box no matter how far it overshot.
    /// Returns `true` if any axis wrapped.
    pub fn wrap(&self, p: &mut Vec3) -> bool {
        let h = self.half();
        let x = wrap_axis(&mut p.x, h.x);
        let y = wrap_axis(&mut p.y, h.y);
        let z = wrap_axis(&mut p.z, h.z);
        x || y || z
    }
}

impl Default for Bounds {
    /// 15 x 10 x 4, wide enough to fill a landscape viewport behind page content.
    fn default() -> Self {
        Self::new(15.0, 10.0, 4.0)
    }
}

#[inline]
fn wrap_axis(v: &mut f32, half: f32) -> bool {
    if *v > half {
        *v = -half;
        true
    } else if *v < -half {
        *v = half;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_wrap_each_side() {
        let bounds = Bounds::new(2.0, 4.0, 6.0);

        let mut p = Vec3::new(1.5, 0.0, 0.0);
        assert!(bounds.wrap(&mut p));
        assert_eq!(p, Vec3::new(-1.0, 0.0, 0.0));

        let mut p = Vec3::new(0.0, -2.1, 0.0);
        assert!(bounds.wrap(&mut p));
        assert_eq!(p, Vec3::new(0.0, 2.0, 0.0));

        let mut p = Vec3::new(0.0, 0.0, 3.5);
        assert!(bounds.wrap(&mut p));
        assert_eq!(p, Vec3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn test_wrap_large_overshoot_stays_inside() {
        let bounds = Bounds::new(2.0, 2.0, 2.0);
        let mut p = Vec3::new(40.0, -40.0, 0.2);
        bounds.wrap(&mut p);
        assert!(bounds.contains(p));
    }

    #[test]
    fn test_on_face_does_not_wrap() {
        let bounds = Bounds::new(2.0, 2.0, 2.0);
        let mut p = Vec3::new(1.0, -1.0, 0.0);
        assert!(!bounds.wrap(&mut p));
        assert_eq!(p, Vec3::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn test_sample_within_bounds() {
        let bounds = Bounds::default();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(bounds.contains(bounds.sample(&mut rng)));
        }
    }
}
