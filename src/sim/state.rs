//! Round state and lifecycle
//!
//! The authoritative per-frame state is the particle population plus the
//! canvas dimensions. The pointer is not stored here: the host hands one
//! consistent snapshot to every tick via `TickInput`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particle::Particle;
use super::spawn::spawn_flock;
use crate::setup::GameSetup;

/// Round lifecycle. `Finished` is terminal until an external restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No population yet; waiting for the host to start a round
    Idle,
    /// Simulation advancing every tick
    Running,
    /// Win condition met; ticks are no-ops
    Finished,
}

/// Complete simulation state for one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The particle population (empty while `Idle`)
    pub particles: Vec<Particle>,
    /// Canvas dimensions, refreshed from `TickInput` (resize applies next tick)
    pub width: f32,
    pub height: f32,
    /// Ticks since the round started, drives the win-check cadence
    pub frame_count: u32,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            frame_count: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn the population and enter `Running`. Callable from `Idle` or,
    /// for an external restart, from `Finished`.
    pub fn start(&mut self, setup: &GameSetup, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.frame_count = 0;
        self.particles = spawn_flock(setup, width, height, &mut self.rng);
        self.phase = GamePhase::Running;
        log::info!(
            "Round started: {} particles, {} colors, {width}x{height}",
            setup.particle_count,
            setup.color_count
        );
    }

    /// Discard the round and return to `Idle` with a fresh seed
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(seed);
        log::info!("Round reset, new seed {seed}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = GameState::new(123);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_start_spawns_and_runs() {
        let mut state = GameState::new(123);
        state.start(&GameSetup::new(10, 2).unwrap(), 800.0, 600.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.particles.len(), 10);
        assert_eq!(state.frame_count, 0);
    }

    #[test]
    fn test_restart_after_finish() {
        let mut state = GameState::new(123);
        state.start(&GameSetup::new(4, 2).unwrap(), 800.0, 600.0);
        state.phase = GamePhase::Finished;

        state.reset(456);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.particles.is_empty());

        state.start(&GameSetup::new(4, 2).unwrap(), 800.0, 600.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.particles.len(), 4);
    }
}
