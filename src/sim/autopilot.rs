//! Simple hands-off player used by the headless demo
//!
//! Aims for the lower half of the next gap and flaps whenever the body is
//! about to sink below it.

use super::state::{GamePhase, GameSession};

/// How far above the gap's lower lip the body tries to stay
const LIP_CLEARANCE: f32 = 12.0;

/// Whether a jump should be sent before the next step
pub fn wants_jump(session: &GameSession) -> bool {
    let tuning = &session.tuning;
    match session.phase {
        GamePhase::NotStarted => return true,
        GamePhase::Ended => return false,
        GamePhase::Playing => {}
    }

    // Still rising, let the arc finish
    if session.body.velocity < 0.0 {
        return false;
    }

    let floor = session
        .obstacles
        .iter()
        .find(|o| o.right(tuning.obstacles.width) >= tuning.body.x)
        .map(|o| o.gap_bottom(tuning.field.height))
        .unwrap_or(tuning.field.height * 0.75);

    let next_bottom = session.body.y + tuning.body.height + session.body.velocity;
    next_bottom >= floor - LIP_CLEARANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;

    #[test]
    fn test_starts_and_stops() {
        let mut session = GameSession::new(1, Tuning::default(), 0);
        assert!(wants_jump(&session));
        session.phase = GamePhase::Ended;
        assert!(!wants_jump(&session));
    }

    #[test]
    fn test_flaps_near_lip() {
        let mut session = GameSession::new(1, Tuning::default(), 0);
        session.phase = GamePhase::Playing;
        session.obstacles.push(Obstacle {
            x: 300.0,
            top_height: 100.0,
            bottom_height: 150.0,
            cleared: false,
        });

        session.body.y = 120.0;
        session.body.velocity = 1.0;
        assert!(!wants_jump(&session));

        session.body.y = 220.0;
        assert!(wants_jump(&session));

        session.body.velocity = -3.0;
        assert!(!wants_jump(&session));
    }
}
