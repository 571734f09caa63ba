//! Flock Sort - herd colored particles into same-color clusters
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering behaviors, physics, win check)
//! - `setup`: Round configuration and input validation
//! - `tuning`: Data-driven game balance
//! - `bestscore`: Local best-time persistence

pub mod bestscore;
pub mod setup;
pub mod sim;
pub mod tuning;

pub use bestscore::BestScore;
pub use setup::GameSetup;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Particle visual/collision radius
    pub const PARTICLE_RADIUS: f32 = 10.0;
    /// Hard cap on particle speed (pixels per tick)
    pub const PARTICLE_MAX_SPEED: f32 = 7.5;
    /// Hard cap on any single steering force
    pub const PARTICLE_MAX_FORCE: f32 = 0.1;
    /// Initial speed is a random fraction of this multiplier
    pub const PARTICLE_INITIAL_VELOCITY_MULTIPLIER: f32 = 1.5;

    /// Velocity damping applied every tick before the speed clamp
    pub const PHYSICS_FRICTION: f32 = 0.88;
    /// Velocity multiplier when bouncing off a canvas edge (inelastic)
    pub const EDGE_BOUNCE_DAMPING: f32 = 0.8;

    /// Pointer repulsion radius
    pub const FLEE_RADIUS: f32 = 150.0;
    /// Neighbor radius for cohesion
    pub const COHESION_RADIUS: f32 = 80.0;
    /// Neighbor radius for separation
    pub const SEPARATION_RADIUS: f32 = 50.0;
    /// Neighbor radius for alignment
    pub const ALIGN_RADIUS: f32 = 50.0;

    /// Behavior weights. Separation dominates so clusters stay loose;
    /// alignment is disabled so groups never synchronize velocity.
    pub const FLEE_WEIGHT: f32 = 1.5;
    pub const COHESION_WEIGHT: f32 = 0.1;
    pub const SEPARATION_WEIGHT: f32 = 2.5;
    pub const ALIGN_WEIGHT: f32 = 0.0;

    /// A color group counts as sorted when every member is within this
    /// distance of the group centroid
    pub const GROUP_RADIUS: f32 = 80.0;
    /// Win condition is evaluated every N ticks, not every tick
    pub const WIN_CHECK_INTERVAL_FRAMES: u32 = 60;
    /// Wall-clock seconds that must elapse before a win can be declared
    pub const MIN_GAME_TIME_SECS: f32 = 1.0;

    /// Spawn inset from each canvas edge
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Total horizontal/vertical span removed from the spawn area
    pub const CANVAS_MARGIN: f32 = 40.0;
    /// Minimum pairwise distance between freshly spawned particles
    pub const MIN_SPAWN_DISTANCE: f32 = 60.0;
    /// Rejection-sampling attempt cap per particle
    pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

    /// Particle color palette (CSS colors, indexed by `ColorTag`)
    pub const COLORS: [&str; 5] = [
        "#00FFFF", // Cyan
        "#FF00FF", // Magenta
        "#FFFF00", // Yellow
        "#00FF00", // Green
        "#FF6B00", // Orange
    ];
}
