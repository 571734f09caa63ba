//! Guarded vector operations on top of [`glam::Vec2`]
//!
//! The steering math must never leak NaN/Infinity into simulation state:
//! normalizing a zero vector and dividing by zero are absorbed as no-ops.
//! `normalize_or_zero` already covers the first; this module adds the rest.

use glam::Vec2;
use rand::Rng;

/// Extension ops used throughout the steering code
pub trait Vec2Ext {
    /// Clamp the magnitude to `max`. Compares squared magnitudes so the
    /// square root is only paid when clamping actually happens.
    fn limit(self, max: f32) -> Vec2;

    /// Rescale to the given length. Zero vectors stay zero.
    fn with_length(self, len: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn limit(self, max: f32) -> Vec2 {
        let mag_sq = self.length_squared();
        if mag_sq > max * max {
            (self / mag_sq.sqrt()) * max
        } else {
            self
        }
    }

    #[inline]
    fn with_length(self, len: f32) -> Vec2 {
        self.normalize_or_zero() * len
    }
}

/// Unit vector with uniformly random direction in [0, 2π)
pub fn random_unit<R: Rng>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}
