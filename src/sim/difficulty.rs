//! Difficulty curve
//!
//! Obstacle speed, gap and spawn interval tighten as the score climbs. The
//! curve is re-evaluated once per scoring event against the new score; the
//! three thresholds are independent, so a score that is a multiple of all
//! of them advances all three at once.

use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Field units per frame
    pub obstacle_speed: f32,
    pub obstacle_gap: f32,
    pub spawn_interval_ms: f32,
}

impl Difficulty {
    pub fn initial(tuning: &DifficultyTuning) -> Self {
        Self {
            obstacle_speed: tuning.initial_speed,
            obstacle_gap: tuning.initial_gap,
            spawn_interval_ms: tuning.initial_interval_ms,
        }
    }

    /// Apply the thresholds reached by `score`. Never loosens any value.
    pub fn on_score(self, score: u32, tuning: &DifficultyTuning) -> Self {
        if score == 0 {
            return self;
        }
        let mut next = self;
        if score.is_multiple_of(tuning.speed_every) {
            next.obstacle_speed = (next.obstacle_speed + tuning.speed_step).min(tuning.speed_cap);
        }
        if score.is_multiple_of(tuning.gap_every) {
            next.obstacle_gap = (next.obstacle_gap - tuning.gap_step).max(tuning.gap_floor);
        }
        if score.is_multiple_of(tuning.interval_every) {
            next.spawn_interval_ms =
                (next.spawn_interval_ms - tuning.interval_step_ms).max(tuning.interval_floor_ms);
        }
        next
    }

    /// Curve value after scoring every point from 1 to `score` in order
    pub fn for_score(score: u32, tuning: &DifficultyTuning) -> Self {
        (1..=score).fold(Self::initial(tuning), |d, s| d.on_score(s, tuning))
    }
}
