//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in as an argument, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Aabb, BoundaryHit, Collision};
pub use difficulty::Difficulty;
pub use state::{Body, GamePhase, GameSession, Obstacle, Snapshot};
pub use tick::{GameEvent, Step, TickInput, tick};
