//! Session state and core simulation types
//!
//! A `GameSession` owns everything one run needs. Nothing outside `tick`
//! mutates it; hosts read it through `Snapshot`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first jump
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended by a collision, waiting for a reset
    Ended,
}

/// The controlled body. Only its vertical state moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top edge, measured down from the top of the field
    pub y: f32,
    /// Field units per frame, negative is up
    pub velocity: f32,
}

impl Body {
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            y: tuning.field.height / 2.0,
            velocity: 0.0,
        }
    }

    /// Nose angle in degrees for the presentation layer
    pub fn tilt_degrees(&self) -> f32 {
        (self.velocity * 3.0).clamp(-30.0, 90.0)
    }
}

/// A top/bottom barrier pair separated by a gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub top_height: f32,
    pub bottom_height: f32,
    /// Set once the obstacle has been passed and scored
    pub cleared: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Lower lip of the gap, measured from the top of the field
    #[inline]
    pub fn gap_bottom(&self, field_height: f32) -> f32 {
        field_height - self.bottom_height
    }

    /// Vertical size of the opening
    #[inline]
    pub fn gap(&self, field_height: f32) -> f32 {
        field_height - self.top_height - self.bottom_height
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the obstacle RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub body: Body,
    /// Active obstacles in spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub best_score: u32,
    /// Whether the ended run beat the previous best
    pub new_record: bool,
    pub difficulty: Difficulty,
    /// Simulated milliseconds since the last spawn
    pub since_spawn_ms: f32,
    /// Playing steps taken this run
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Create a fresh session that has not started yet
    pub fn new(seed: u64, tuning: Tuning, best_score: u32) -> Self {
        let difficulty = Difficulty::initial(&tuning.difficulty);
        Self {
            seed,
            tuning,
            phase: GamePhase::NotStarted,
            body: Body::centered(&tuning),
            obstacles: Vec::new(),
            score: 0,
            best_score,
            new_record: false,
            difficulty,
            // The first playing step spawns right away
            since_spawn_ms: difficulty.spawn_interval_ms,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fresh session for the next run. Keeps tuning and best score; the new
    /// seed is drawn from this session's stream without advancing it, so
    /// resetting the same session twice gives the same result.
    pub fn reset(&self) -> Self {
        let seed = self.rng.clone().random::<u64>();
        Self::new(seed, self.tuning, self.best_score)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        let tilt = match self.phase {
            GamePhase::NotStarted => 0.0,
            _ => self.body.tilt_degrees(),
        };
        Snapshot {
            phase: self.phase,
            body_y: self.body.y,
            tilt,
            obstacles: self.obstacles.clone(),
            score: self.score,
            best_score: self.best_score,
            new_record: self.new_record,
        }
    }
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub body_y: f32,
    /// Degrees, positive is nose down
    pub tilt: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub best_score: u32,
    pub new_record: bool,
}
