//! Round configuration and input validation
//!
//! The simulation core assumes valid input; everything a player can type is
//! checked here, before a round starts, and violations are rendered as
//! user-facing messages by the setup screen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::COLORS;

/// Validated round configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    /// Total number of particles
    pub particle_count: u32,
    /// Number of color groups
    pub color_count: u32,
}

/// Why a proposed setup was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// Counts must be at least 1
    NonPositiveCount,
    /// More colors requested than the palette has
    TooManyColors { requested: u32, available: u32 },
    /// Particle count must divide evenly into color groups
    NotDivisible { particles: u32, colors: u32 },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NonPositiveCount => {
                write!(f, "particle and color counts must be at least 1")
            }
            SetupError::TooManyColors {
                requested,
                available,
            } => write!(
                f,
                "{requested} colors requested but only {available} are available"
            ),
            SetupError::NotDivisible { particles, colors } => write!(
                f,
                "{particles} particles cannot be split evenly into {colors} colors"
            ),
        }
    }
}

impl std::error::Error for SetupError {}

impl GameSetup {
    /// Validate and build a setup. All preconditions the core relies on are
    /// enforced here.
    pub fn new(particle_count: u32, color_count: u32) -> Result<Self, SetupError> {
        if particle_count == 0 || color_count == 0 {
            return Err(SetupError::NonPositiveCount);
        }
        if color_count as usize > COLORS.len() {
            return Err(SetupError::TooManyColors {
                requested: color_count,
                available: COLORS.len() as u32,
            });
        }
        if !particle_count.is_multiple_of(color_count) {
            return Err(SetupError::NotDivisible {
                particles: particle_count,
                colors: color_count,
            });
        }
        Ok(Self {
            particle_count,
            color_count,
        })
    }

    /// Particles in each color group (exact by construction)
    pub fn particles_per_color(&self) -> u32 {
        self.particle_count / self.color_count
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            particle_count: 10,
            color_count: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_setup() {
        let setup = GameSetup::new(12, 3).unwrap();
        assert_eq!(setup.particles_per_color(), 4);
    }

    #[test]
    fn test_zero_counts_rejected() {
        assert_eq!(GameSetup::new(0, 2), Err(SetupError::NonPositiveCount));
        assert_eq!(GameSetup::new(10, 0), Err(SetupError::NonPositiveCount));
    }

    #[test]
    fn test_too_many_colors_rejected() {
        let err = GameSetup::new(12, 6).unwrap_err();
        assert!(matches!(err, SetupError::TooManyColors { requested: 6, .. }));
    }

    #[test]
    fn test_uneven_split_rejected() {
        let err = GameSetup::new(10, 3).unwrap_err();
        assert_eq!(
            err,
            SetupError::NotDivisible {
                particles: 10,
                colors: 3
            }
        );
        // Messages are shown to the player, so they must render
        assert!(err.to_string().contains("evenly"));
    }

    #[test]
    fn test_default_is_valid() {
        let d = GameSetup::default();
        assert!(GameSetup::new(d.particle_count, d.color_count).is_ok());
    }
}
