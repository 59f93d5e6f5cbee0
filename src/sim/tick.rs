//! Simulation step
//!
//! `tick` takes the previous committed session, the inputs gathered since
//! then and the elapsed time, and returns the next session together with
//! the events that happened. It never captures state from anywhere else.

use serde::{Deserialize, Serialize};

use super::collision::{self, Collision};
use super::obstacles;
use super::physics;
use super::state::{GamePhase, GameSession};

/// Inputs delivered for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump impulse (key press, click or tap)
    pub jump: bool,
    /// Restart command; only honoured once the run has ended
    pub reset: bool,
}

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session reinitialised after a run ended
    Reset,
    /// First jump of a run
    Started,
    Spawned { top_height: f32 },
    Scored { score: u32 },
    Crashed { collision: Collision },
    /// The run that just ended beat the stored best; persist it
    NewBest { score: u32 },
}

/// Result of one step
#[derive(Debug, Clone)]
pub struct Step {
    pub session: GameSession,
    pub events: Vec<GameEvent>,
}

/// Advance the game by one step
pub fn tick(prev: &GameSession, input: &TickInput, dt: f32) -> Step {
    let mut events = Vec::new();

    let mut session = if input.reset && prev.phase == GamePhase::Ended {
        events.push(GameEvent::Reset);
        prev.reset()
    } else {
        prev.clone()
    };

    match session.phase {
        GamePhase::NotStarted => {
            if input.jump {
                session.body = physics::apply_jump(session.body, &session.tuning.physics);
                session.phase = GamePhase::Playing;
                events.push(GameEvent::Started);
                log::info!("Run started (seed {})", session.seed);
            }
        }
        GamePhase::Playing => step_playing(&mut session, input.jump, dt, &mut events),
        // Frozen until reset; jumps are ignored
        GamePhase::Ended => {}
    }

    Step { session, events }
}

fn step_playing(session: &mut GameSession, jump: bool, dt: f32, events: &mut Vec<GameEvent>) {
    let tuning = session.tuning;
    let dt = physics::clamp_dt(dt, tuning.physics.max_dt);
    session.time_ticks += 1;

    // Body
    let mut body = session.body;
    if jump {
        body = physics::apply_jump(body, &tuning.physics);
    }
    let mut body = physics::integrate(body, dt, &tuning.physics);

    // Obstacles: move, retire, then spawn at the right edge
    let distance = obstacles::travel(&session.difficulty, dt, &tuning);
    let mut active: Vec<_> = session
        .obstacles
        .iter()
        .map(|o| obstacles::advanced(o, distance))
        .filter(|o| !obstacles::is_retired(o, &tuning))
        .collect();

    session.since_spawn_ms += dt * 1000.0;
    if obstacles::spawn_due(session.since_spawn_ms, &session.difficulty) {
        let obstacle = obstacles::spawn(&mut session.rng, &session.difficulty, &tuning);
        log::debug!(
            "Spawned obstacle top={:.1} gap={:.1}",
            obstacle.top_height,
            session.difficulty.obstacle_gap
        );
        events.push(GameEvent::Spawned {
            top_height: obstacle.top_height,
        });
        active.push(obstacle);
        session.since_spawn_ms = 0.0;
    }

    // Collisions against post-move geometry
    let collision = collision::detect(body.y, &active, &tuning);

    // Clearances
    for obstacle in active.iter_mut() {
        if obstacles::passes_body(obstacle, &tuning) {
            obstacle.cleared = true;
            session.score += 1;
            session.difficulty = session.difficulty.on_score(session.score, &tuning.difficulty);
            log::debug!("Score {} -> {:?}", session.score, session.difficulty);
            events.push(GameEvent::Scored {
                score: session.score,
            });
        }
    }

    if let Some(collision) = collision {
        body.y = collision::clamp_to_field(body.y, &tuning);
        session.body = body;
        session.obstacles = active;
        end_run(session, collision, events);
        return;
    }

    session.body = body;
    session.obstacles = active;
}

fn end_run(session: &mut GameSession, collision: Collision, events: &mut Vec<GameEvent>) {
    session.phase = GamePhase::Ended;
    events.push(GameEvent::Crashed { collision });
    log::info!(
        "Run ended with score {} after {} steps ({:?})",
        session.score,
        session.time_ticks,
        collision
    );

    if session.score > session.best_score {
        session.best_score = session.score;
        session.new_record = true;
        events.push(GameEvent::NewBest {
            score: session.score,
        });
        log::info!("New best score: {}", session.score);
    }
}
