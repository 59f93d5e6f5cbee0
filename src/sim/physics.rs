//! Vertical motion of the body
//!
//! Velocity is in field units per frame and is added to the position once
//! per step; gravity is scaled by the real timestep so the fall rate is the
//! same at any refresh rate.

use super::state::Body;
use crate::tuning::PhysicsTuning;

/// Clamp a raw timestep into `[0, max_dt]`. Stalled or reversed clocks and
/// non-finite values never reach the integrator.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

/// Advance the body by one step. The returned position is a candidate;
/// the step function decides whether it is legal.
pub fn integrate(body: Body, dt: f32, physics: &PhysicsTuning) -> Body {
    let dt = clamp_dt(dt, physics.max_dt);

    let mut velocity =
        (body.velocity + physics.gravity * dt * physics.scale).min(physics.max_fall_speed);
    // Softer arc peak while rising
    if velocity < 0.0 {
        velocity *= physics.ascent_damping;
    }

    Body {
        y: body.y + velocity,
        velocity,
    }
}

/// A jump replaces the velocity outright, impulses never stack
#[inline]
pub fn apply_jump(body: Body, physics: &PhysicsTuning) -> Body {
    Body {
        velocity: physics.jump_velocity,
        ..body
    }
}
