//! Boundary and obstacle collision detection
//!
//! Hitboxes are axis-aligned rectangles in field space (y grows downward).
//! Obstacle hitboxes are inset by the collision buffer so grazing a barrier
//! is forgiven.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink horizontally by `margin` on each side
    pub fn inset_x(&self, margin: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x + margin, self.min.y),
            max: Vec2::new(self.max.x - margin, self.max.y),
        }
    }

    /// Strict overlap on the x axis; touching edges do not count
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }
}

/// Which edge of the field the body hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryHit {
    Ceiling,
    Floor,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Boundary(BoundaryHit),
    /// Index into the active obstacle set
    Obstacle { index: usize },
}

/// Hitbox of the body with its top edge at `y`
pub fn body_box(y: f32, tuning: &Tuning) -> Aabb {
    let b = &tuning.body;
    Aabb::new(Vec2::new(b.x, y), Vec2::new(b.width, b.height))
}

/// Lowest legal top-edge position for the body
#[inline]
pub fn floor_limit(tuning: &Tuning) -> f32 {
    tuning.field.height - tuning.body.height - tuning.field.boundary_margin
}

/// Highest legal top-edge position for the body
#[inline]
pub fn ceiling_limit(tuning: &Tuning) -> f32 {
    tuning.field.boundary_margin
}

/// Check a candidate position against the top and bottom of the field
pub fn check_boundary(y: f32, tuning: &Tuning) -> Option<BoundaryHit> {
    if y > floor_limit(tuning) {
        Some(BoundaryHit::Floor)
    } else if y < ceiling_limit(tuning) {
        Some(BoundaryHit::Ceiling)
    } else {
        None
    }
}

/// Pin a position to the legal band (used for the final frame of a run).
/// If the band is empty the floor wins.
#[inline]
pub fn clamp_to_field(y: f32, tuning: &Tuning) -> f32 {
    y.max(ceiling_limit(tuning)).min(floor_limit(tuning))
}

/// Does the body at `y` touch this obstacle?
pub fn hits_obstacle(y: f32, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let buffer = tuning.obstacles.collision_buffer;
    let field_height = tuning.field.height;
    let body = body_box(y, tuning);
    let column = Aabb::new(
        Vec2::new(obstacle.x, 0.0),
        Vec2::new(tuning.obstacles.width, field_height),
    )
    .inset_x(buffer);

    if !body.overlaps_x(&column) {
        return false;
    }

    body.min.y < obstacle.top_height - buffer
        || body.max.y > obstacle.gap_bottom(field_height) + buffer
}

/// First obstacle, in spawn order, the body at `y` collides with
pub fn first_obstacle_hit(y: f32, obstacles: &[Obstacle], tuning: &Tuning) -> Option<usize> {
    obstacles.iter().position(|o| hits_obstacle(y, o, tuning))
}

/// Full per-step check: boundaries first, then obstacles
pub fn detect(y: f32, obstacles: &[Obstacle], tuning: &Tuning) -> Option<Collision> {
    check_boundary(y, tuning).map(Collision::Boundary).or_else(|| {
        first_obstacle_hit(y, obstacles, tuning).map(|index| Collision::Obstacle { index })
    })
}
