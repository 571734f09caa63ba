//! Data-driven game balance
//!
//! Every steering radius and weight is a plain field so balance passes never
//! touch simulation code. The defaults are the shipped tuning; a JSON blob
//! with the same shape can override any of it.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Weights applied to each steering force before accumulation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteeringWeights {
    pub flee: f32,
    pub cohesion: f32,
    pub separation: f32,
    /// Zero in the shipped tuning: groups should not synchronize velocity
    pub align: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            flee: FLEE_WEIGHT,
            cohesion: COHESION_WEIGHT,
            separation: SEPARATION_WEIGHT,
            align: ALIGN_WEIGHT,
        }
    }
}

/// Neighbor/influence radii for each steering behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteeringRadii {
    pub flee: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub align: f32,
}

impl Default for SteeringRadii {
    fn default() -> Self {
        Self {
            flee: FLEE_RADIUS,
            cohesion: COHESION_RADIUS,
            separation: SEPARATION_RADIUS,
            align: ALIGN_RADIUS,
        }
    }
}

/// Complete balance table for a round
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    pub weights: SteeringWeights,
    pub radii: SteeringRadii,
    /// Velocity damping per tick, < 1
    pub friction: f32,
    /// Velocity scale on edge bounce, < 1
    pub edge_damping: f32,
    /// Win-check group radius
    pub group_radius: f32,
    /// Win condition evaluated every N ticks
    pub win_check_interval: u32,
    /// Minimum wall-clock seconds before a win can be declared
    pub min_game_time_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            weights: SteeringWeights::default(),
            radii: SteeringRadii::default(),
            friction: PHYSICS_FRICTION,
            edge_damping: EDGE_BOUNCE_DAMPING,
            group_radius: GROUP_RADIUS,
            win_check_interval: WIN_CHECK_INTERVAL_FRAMES,
            min_game_time_secs: MIN_GAME_TIME_SECS,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON, falling back to defaults on any
    /// parse failure (bad overrides should never brick the game)
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("Ignoring malformed tuning override: {err}");
                Self::default()
            }
        }
    }
}
