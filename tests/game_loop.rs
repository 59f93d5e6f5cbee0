//! Driver tests: scheduling, warm-up, teardown and best-score persistence

use std::cell::RefCell;
use std::rc::Rc;

use pipe_dash::Game;
use pipe_dash::Tuning;
use pipe_dash::persistence::{BEST_SCORE_KEY, MemoryStore, ScoreStore, StoreError};
use pipe_dash::platform::ManualScheduler;
use pipe_dash::sim::{GamePhase, GameSession};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn new_game(best: u64) -> Game<ManualScheduler, MemoryStore> {
    Game::new(
        Tuning::default(),
        1234,
        ManualScheduler::new(),
        MemoryStore::with_value(BEST_SCORE_KEY, best),
    )
}

/// Deliver every pending tick at `now`
fn pump<St: ScoreStore>(game: &mut Game<ManualScheduler, St>, now: f64) {
    for request in game.scheduler_mut().take_pending() {
        game.on_tick(request, now);
    }
}

/// Run frames until the body hits the floor
fn crash<St: ScoreStore>(game: &mut Game<ManualScheduler, St>, mut now: f64) -> f64 {
    for _ in 0..600 {
        if game.session().phase == GamePhase::Ended {
            return now;
        }
        now += FRAME_MS;
        pump(game, now);
    }
    panic!("body never crashed");
}

#[test]
fn test_requests_first_tick_and_loads_best() {
    let game = new_game(7);
    assert!(game.pending_tick().is_some());
    assert_eq!(game.scheduler().pending().len(), 1);
    assert_eq!(game.snapshot().best_score, 7);
    assert_eq!(game.snapshot().phase, GamePhase::NotStarted);
}

#[test]
fn test_warm_up_tick_has_no_effect() {
    let mut game = new_game(0);
    game.jump();
    pump(&mut game, 10_000.0);
    // Input stays queued through the warm-up tick
    assert_eq!(game.session().phase, GamePhase::NotStarted);

    pump(&mut game, 10_000.0 + FRAME_MS);
    assert_eq!(game.session().phase, GamePhase::Playing);
}

#[test]
fn test_each_tick_requests_the_next() {
    let mut game = new_game(0);
    for i in 0..5 {
        pump(&mut game, i as f64 * FRAME_MS);
        assert_eq!(game.scheduler().pending().len(), 1);
    }
}

#[test]
fn test_crash_without_points_keeps_best() {
    let mut game = new_game(3);
    let mut now = 0.0;
    pump(&mut game, now);
    game.jump();
    now += FRAME_MS;
    pump(&mut game, now);
    assert_eq!(game.session().phase, GamePhase::Playing);

    crash(&mut game, now);
    assert_eq!(game.session().score, 0);
    assert_eq!(game.snapshot().best_score, 3);
    assert!(!game.snapshot().new_record);
    assert_eq!(game.scores().store().get(BEST_SCORE_KEY), Some(3));
}

/// Session already playing with `score` points and about to hit the floor
fn doomed_session(score: u32) -> GameSession {
    let mut session = GameSession::new(77, Tuning::default(), 0);
    session.phase = GamePhase::Playing;
    session.score = score;
    session.body.y = 500.0;
    session
}

#[test]
fn test_new_best_is_persisted() {
    let mut game = Game::with_session(
        doomed_session(9),
        ManualScheduler::new(),
        MemoryStore::with_value(BEST_SCORE_KEY, 4),
    );
    assert_eq!(game.snapshot().best_score, 4);
    pump(&mut game, 0.0);
    pump(&mut game, FRAME_MS);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, GamePhase::Ended);
    assert_eq!(snapshot.best_score, 9);
    assert!(snapshot.new_record);
    assert_eq!(game.scores().store().get(BEST_SCORE_KEY), Some(9));
}

#[test]
fn test_restart_reenters_play_and_rewarms_clock() {
    let mut game = new_game(0);
    let mut now = 0.0;
    pump(&mut game, now);
    game.jump();
    now += FRAME_MS;
    pump(&mut game, now);
    now = crash(&mut game, now);

    // Jumps after a crash do nothing
    game.jump();
    now += FRAME_MS;
    pump(&mut game, now);
    assert_eq!(game.session().phase, GamePhase::Ended);

    game.restart(true);
    now += FRAME_MS;
    pump(&mut game, now);
    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, GamePhase::Playing);
    assert_eq!(snapshot.score, 0);
    assert!(snapshot.obstacles.is_empty());

    // First tick of the new run is a warm-up
    let before = game.snapshot();
    now += 5_000.0;
    pump(&mut game, now);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_restart_ignored_while_playing() {
    let mut game = new_game(0);
    pump(&mut game, 0.0);
    game.jump();
    pump(&mut game, FRAME_MS);
    game.restart(false);
    pump(&mut game, 2.0 * FRAME_MS);
    assert_eq!(game.session().phase, GamePhase::Playing);
    assert!(game.session().time_ticks > 0);
}

#[test]
fn test_teardown_cancels_pending() {
    let mut game = new_game(0);
    let request = game.pending_tick().unwrap();
    game.teardown();
    assert!(game.pending_tick().is_none());
    assert!(game.scheduler().pending().is_empty());

    // A late delivery of the cancelled request is ignored
    let before = game.snapshot();
    game.on_tick(request, 1.0);
    assert!(game.pending_tick().is_none());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_new_session_ignores_predecessor_ticks() {
    let shared = Rc::new(RefCell::new(ManualScheduler::new()));

    let mut first = Game::new(Tuning::default(), 1, shared.clone(), MemoryStore::new());
    let stale = first.pending_tick().unwrap();
    drop(first);
    assert!(shared.borrow().pending().is_empty());

    let mut second = Game::new(Tuning::default(), 2, shared.clone(), MemoryStore::new());
    let live = second.pending_tick().unwrap();
    assert_ne!(stale, live);

    second.on_tick(stale, 0.0);
    assert_eq!(second.pending_tick(), Some(live));
    assert!(!second.session().is_playing());
}

#[test]
fn test_suspend_freezes_and_resume_rewarms() {
    let mut game = new_game(0);
    pump(&mut game, 0.0);
    game.jump();
    pump(&mut game, FRAME_MS);
    pump(&mut game, 2.0 * FRAME_MS);

    game.suspend();
    let frozen = game.snapshot();
    assert!(game.scheduler().pending().is_empty());

    game.resume();
    // Long gap while hidden: the first tick back does nothing
    pump(&mut game, 60_000.0);
    assert_eq!(game.snapshot(), frozen);

    pump(&mut game, 60_000.0 + FRAME_MS);
    assert_ne!(game.snapshot(), frozen);
    assert_eq!(game.session().phase, GamePhase::Playing);
}

struct FailingStore;

impl ScoreStore for FailingStore {
    fn get(&self, _key: &str) -> Option<u64> {
        Some(2)
    }

    fn set(&mut self, _key: &str, _value: u64) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

#[test]
fn test_failed_save_does_not_disturb_play() {
    let mut game = Game::with_session(doomed_session(6), ManualScheduler::new(), FailingStore);
    // Stored best is picked up by the session
    assert_eq!(game.snapshot().best_score, 2);
    let mut now = 0.0;
    pump(&mut game, now);
    now += FRAME_MS;
    pump(&mut game, now);

    assert_eq!(game.session().phase, GamePhase::Ended);
    assert_eq!(game.snapshot().best_score, 6);
    assert_eq!(game.scores().failed_writes, 1);

    // Not retried on its own
    for _ in 0..10 {
        now += FRAME_MS;
        pump(&mut game, now);
    }
    assert_eq!(game.scores().failed_writes, 1);

    game.restart(true);
    now += FRAME_MS;
    pump(&mut game, now);
    assert_eq!(game.session().phase, GamePhase::Playing);
    assert_eq!(game.snapshot().best_score, 6);
}
