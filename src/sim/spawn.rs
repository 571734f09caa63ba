//! Initial particle placement
//!
//! Rejection sampling with a bounded attempt budget: each particle tries to
//! land at least `MIN_SPAWN_DISTANCE` from everything already placed, and
//! falls back to its last sample when the budget runs out rather than
//! looping forever on a crowded canvas.

use glam::Vec2;
use rand::Rng;

use super::particle::{ColorTag, Particle};
use crate::consts::*;
use crate::setup::GameSetup;

/// Sample a spawn position inset from the canvas edges
fn sample_position<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..(width - CANVAS_MARGIN).max(1.0)) + SPAWN_MARGIN,
        rng.random_range(0.0..(height - CANVAS_MARGIN).max(1.0)) + SPAWN_MARGIN,
    )
}

/// Spawn the round's population: `setup.particles_per_color()` particles of
/// each color, separated by at least `MIN_SPAWN_DISTANCE` on a best-effort
/// basis.
pub fn spawn_flock<R: Rng>(
    setup: &GameSetup,
    width: f32,
    height: f32,
    rng: &mut R,
) -> Vec<Particle> {
    let per_color = setup.particles_per_color();
    let mut particles = Vec::with_capacity((per_color * setup.color_count) as usize);

    for color_index in 0..setup.color_count {
        let color = ColorTag(color_index as u8);
        for _ in 0..per_color {
            let mut pos = sample_position(rng, width, height);
            let mut attempts = 0;

            while attempts < MAX_SPAWN_ATTEMPTS && too_close(pos, &particles) {
                pos = sample_position(rng, width, height);
                attempts += 1;
            }
            // Budget exhausted: keep the last sample anyway

            particles.push(Particle::new(pos, color, rng));
        }
    }

    particles
}

fn too_close(pos: Vec2, placed: &[Particle]) -> bool {
    placed
        .iter()
        .any(|p| pos.distance(p.position) < MIN_SPAWN_DISTANCE)
}
