//! Per-frame simulation tick and win condition
//!
//! A tick is two-phase: every steering force is computed against the
//! pre-tick population first, then every particle integrates. Forces for
//! frame N therefore read only frame N-1 state, so iteration order cannot
//! bias the flock.

use std::collections::HashMap;

use glam::Vec2;

use super::particle::{ColorTag, Particle};
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Host-provided inputs for a single tick. The pointer is sampled once so
/// every particle in the tick sees the same position.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Current pointer position in canvas coordinates
    pub pointer: Vec2,
    /// Canvas dimensions (resize takes effect this tick)
    pub width: f32,
    pub height: f32,
    /// Wall-clock seconds since the round started. Wall-clock rather than a
    /// tick count so the minimum-time gate survives irregular frame cadence.
    pub elapsed_secs: f32,
}

/// Emitted by [`tick`] at most once per round
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickEvent {
    /// Every color group is clustered; the round is over
    Finished { elapsed_secs: f32 },
}

/// Advance the simulation by one frame. No-op outside `Running`, so a
/// cancelled or finished loop can keep calling this harmlessly.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> Option<TickEvent> {
    if state.phase != GamePhase::Running {
        return None;
    }

    state.width = input.width;
    state.height = input.height;

    // Phase 1: all forces from the frame N-1 snapshot
    let forces: Vec<Vec2> = state
        .particles
        .iter()
        .map(|p| {
            p.flee(input.pointer, tuning.radii.flee) * tuning.weights.flee
                + p.cohesion(&state.particles, tuning.radii.cohesion) * tuning.weights.cohesion
                + p.separation(&state.particles, tuning.radii.separation)
                    * tuning.weights.separation
                + p.align(&state.particles, tuning.radii.align) * tuning.weights.align
        })
        .collect();

    // Phase 2: integrate everyone
    for (particle, force) in state.particles.iter_mut().zip(forces) {
        particle.apply_force(force);
        particle.integrate(tuning.friction);
        particle.handle_boundaries(state.width, state.height, tuning.edge_damping);
    }

    state.frame_count += 1;

    // Two independent gates: tick cadence and minimum wall-clock time
    let interval = tuning.win_check_interval.max(1);
    if state.frame_count % interval == 0
        && input.elapsed_secs > tuning.min_game_time_secs
        && check_win(&state.particles, tuning.group_radius)
    {
        state.phase = GamePhase::Finished;
        log::info!("Round won in {:.2}s", input.elapsed_secs);
        return Some(TickEvent::Finished {
            elapsed_secs: input.elapsed_secs,
        });
    }

    None
}

/// Color-aware clustering test: true iff every particle lies within
/// `group_radius` of its own color group's centroid.
pub fn check_win(particles: &[Particle], group_radius: f32) -> bool {
    let mut groups: HashMap<ColorTag, (Vec2, u32)> = HashMap::new();
    for p in particles {
        let entry = groups.entry(p.color).or_insert((Vec2::ZERO, 0));
        entry.0 += p.position;
        entry.1 += 1;
    }

    particles.iter().all(|p| {
        let (sum, count) = groups[&p.color];
        let centroid = sum / count as f32;
        p.position.distance(centroid) <= group_radius
    })
}
