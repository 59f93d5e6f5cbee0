//! Pipe Dash - simulation core for a side-scrolling obstacle-dodging widget
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, obstacles, game state)
//! - `clock`: Timestamp to clamped timestep conversion
//! - `platform`: Tick scheduling abstraction (native and browser)
//! - `persistence`: Best-score storage seam
//! - `tuning`: Data-driven game balance
//! - `game`: Host-facing driver wiring the pieces together

pub mod clock;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FrameClock;
pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults `Tuning` is built from. Velocities are in field
/// units per frame; gravity is scaled by `PHYSICS_SCALE` and the real
/// timestep so the fall rate does not depend on the host refresh rate.
pub mod consts {
    /// Gravity added to the fall velocity per second, before scaling
    pub const GRAVITY: f32 = 0.45;
    pub const PHYSICS_SCALE: f32 = 35.0;
    /// Velocity set by a jump impulse (negative is up)
    pub const JUMP_VELOCITY: f32 = -7.5;
    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 12.0;
    /// Applied to upward velocity every step to soften the arc peak
    pub const ASCENT_DAMPING: f32 = 0.96;
    /// Largest timestep a single tick may advance (seconds)
    pub const MAX_DT: f32 = 1.0 / 30.0;
    /// Obstacle speed is expressed per frame at this rate
    pub const FRAME_NORMALIZATION: f32 = 60.0;

    /// Play field defaults
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Fraction of the viewport height the field may occupy
    pub const FIELD_VIEWPORT_FRACTION: f32 = 0.6;
    /// Tolerance before touching the ceiling or floor ends the run
    pub const BOUNDARY_MARGIN: f32 = 2.0;

    /// Body geometry (left edge is fixed)
    pub const BODY_X: f32 = 100.0;
    pub const BODY_WIDTH: f32 = 35.0;
    pub const BODY_HEIGHT: f32 = 25.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const MIN_BARRIER_HEIGHT: f32 = 50.0;
    /// Hitbox inset on both axes, keeps collisions slightly forgiving
    pub const COLLISION_BUFFER: f32 = 2.0;
    /// Extra distance past the left edge before an obstacle is retired
    pub const RETIRE_MARGIN: f32 = 10.0;

    /// Difficulty curve
    pub const INITIAL_SPEED: f32 = 2.5;
    pub const SPEED_STEP: f32 = 0.3;
    pub const SPEED_EVERY: u32 = 10;
    pub const SPEED_CAP: f32 = 6.0;
    pub const INITIAL_GAP: f32 = 150.0;
    pub const GAP_STEP: f32 = 5.0;
    pub const GAP_EVERY: u32 = 15;
    pub const GAP_FLOOR: f32 = 110.0;
    pub const INITIAL_INTERVAL_MS: f32 = 1800.0;
    pub const INTERVAL_STEP_MS: f32 = 100.0;
    pub const INTERVAL_EVERY: u32 = 20;
    pub const INTERVAL_FLOOR_MS: f32 = 1000.0;
}
