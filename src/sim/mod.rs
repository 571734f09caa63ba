//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Two-phase ticks (compute all forces, then integrate all particles)
//! - No rendering or platform dependencies

pub mod particle;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod vec;

pub use particle::{ColorTag, Particle};
pub use spawn::spawn_flock;
pub use state::{GamePhase, GameState};
pub use tick::{TickEvent, TickInput, check_win, tick};
pub use vec::{Vec2Ext, random_unit};
