//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a host can reshape the
//! field or soften the curve from a JSON file without touching code. Missing
//! keys fall back to the defaults in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning json")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Play field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub width: f32,
    pub height: f32,
    pub boundary_margin: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            boundary_margin: BOUNDARY_MARGIN,
        }
    }
}

/// The controlled body's fixed horizontal placement and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            x: BODY_X,
            width: BODY_WIDTH,
            height: BODY_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub scale: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    pub ascent_damping: f32,
    pub max_dt: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            scale: PHYSICS_SCALE,
            jump_velocity: JUMP_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            ascent_damping: ASCENT_DAMPING,
            max_dt: MAX_DT,
        }
    }
}

/// Starting values, step sizes, score thresholds and limits of the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub initial_speed: f32,
    pub speed_step: f32,
    pub speed_every: u32,
    pub speed_cap: f32,
    pub initial_gap: f32,
    pub gap_step: f32,
    pub gap_every: u32,
    pub gap_floor: f32,
    pub initial_interval_ms: f32,
    pub interval_step_ms: f32,
    pub interval_every: u32,
    pub interval_floor_ms: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            speed_every: SPEED_EVERY,
            speed_cap: SPEED_CAP,
            initial_gap: INITIAL_GAP,
            gap_step: GAP_STEP,
            gap_every: GAP_EVERY,
            gap_floor: GAP_FLOOR,
            initial_interval_ms: INITIAL_INTERVAL_MS,
            interval_step_ms: INTERVAL_STEP_MS,
            interval_every: INTERVAL_EVERY,
            interval_floor_ms: INTERVAL_FLOOR_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub width: f32,
    pub min_barrier_height: f32,
    pub collision_buffer: f32,
    pub retire_margin: f32,
    pub frame_normalization: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            width: OBSTACLE_WIDTH,
            min_barrier_height: MIN_BARRIER_HEIGHT,
            collision_buffer: COLLISION_BUFFER,
            retire_margin: RETIRE_MARGIN,
            frame_normalization: FRAME_NORMALIZATION,
        }
    }
}

/// Complete balance sheet for one session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field: FieldTuning,
    pub body: BodyTuning,
    pub physics: PhysicsTuning,
    pub difficulty: DifficultyTuning,
    pub obstacles: ObstacleTuning,
}

impl Tuning {
    /// Size the field to a host viewport: full width, at most 400 units tall
    /// and never more than 60% of the viewport height. On short fields the
    /// gap shrinks so both barriers keep their minimum height; a viewport
    /// too small to leave a passable gap is rejected.
    pub fn for_viewport(width: f32, height: f32) -> Result<Self, TuningError> {
        let mut tuning = Self::default();
        tuning.field.width = width;
        tuning.field.height = FIELD_HEIGHT.min(height * FIELD_VIEWPORT_FRACTION);

        let room = tuning.field.height - 2.0 * tuning.obstacles.min_barrier_height;
        let d = &mut tuning.difficulty;
        if room < d.initial_gap {
            d.initial_gap = room;
            d.gap_floor = d.gap_floor.min(room);
            log::info!("Field {}u tall, gap narrowed to {}", tuning.field.height, room);
        }
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject balance sheets the simulation cannot honour, such as a field
    /// too short to fit the widest gap between two minimum-height barriers.
    pub fn validate(&self) -> Result<(), TuningError> {
        let d = &self.difficulty;
        let o = &self.obstacles;
        let p = &self.physics;

        let needed = d.initial_gap + 2.0 * o.min_barrier_height;
        if self.field.height + 1e-3 < needed {
            return Err(TuningError::Invalid(format!(
                "field height {} cannot fit a {} gap between {} barriers",
                self.field.height, d.initial_gap, o.min_barrier_height
            )));
        }
        if self.body.height + 2.0 * self.field.boundary_margin >= self.field.height {
            return Err(TuningError::Invalid("body does not fit in the field".into()));
        }
        if d.gap_floor <= self.body.height + 2.0 * o.collision_buffer {
            return Err(TuningError::Invalid(format!(
                "gap floor {} is too narrow for a {} tall body",
                d.gap_floor, self.body.height
            )));
        }
        if d.speed_every == 0 || d.gap_every == 0 || d.interval_every == 0 {
            return Err(TuningError::Invalid("difficulty thresholds must be non-zero".into()));
        }
        if d.gap_floor > d.initial_gap || d.interval_floor_ms > d.initial_interval_ms {
            return Err(TuningError::Invalid("difficulty floors exceed initial values".into()));
        }
        if d.speed_cap < d.initial_speed {
            return Err(TuningError::Invalid("speed cap below initial speed".into()));
        }
        if !(p.ascent_damping > 0.0 && p.ascent_damping <= 1.0) {
            return Err(TuningError::Invalid("ascent damping must be in (0, 1]".into()));
        }
        if !(p.max_dt > 0.0) || p.jump_velocity >= 0.0 || p.max_fall_speed <= 0.0 {
            return Err(TuningError::Invalid("physics constants out of range".into()));
        }
        Ok(())
    }
}
