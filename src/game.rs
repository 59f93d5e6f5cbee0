//! Host-facing driver
//!
//! `Game` owns the committed session and wires it to a tick scheduler and a
//! best-score store. Inputs arriving between ticks are queued and handed to
//! the next real step, so every mutation still goes through `sim::tick`.

use crate::clock::FrameClock;
use crate::persistence::{BestScoreBridge, ScoreStore};
use crate::platform::{Scheduler, TickRequest};
use crate::sim::{GameEvent, GamePhase, GameSession, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game<S: Scheduler, St: ScoreStore> {
    session: GameSession,
    clock: FrameClock,
    scheduler: S,
    scores: BestScoreBridge<St>,
    input: TickInput,
    pending: Option<TickRequest>,
}

impl<S: Scheduler, St: ScoreStore> Game<S, St> {
    /// Load the stored best, build a fresh session and request the first tick
    pub fn new(tuning: Tuning, seed: u64, scheduler: S, store: St) -> Self {
        Self::with_session(GameSession::new(seed, tuning, 0), scheduler, store)
    }

    /// Drive an existing session. The stored best wins if it is higher.
    pub fn with_session(mut session: GameSession, scheduler: S, store: St) -> Self {
        let scores = BestScoreBridge::new(store);
        session.best_score = session.best_score.max(scores.load_best());
        log::info!("Game ready (seed {}, best {})", session.seed, session.best_score);

        let mut game = Self {
            clock: FrameClock::new(session.tuning.physics.max_dt),
            session,
            scheduler,
            scores,
            input: TickInput::default(),
            pending: None,
        };
        game.resume();
        game
    }

    /// Queue a jump for the next step
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    /// Queue a restart. Ignored unless the run has ended. With `auto_start`
    /// the new run begins playing on the same step.
    pub fn restart(&mut self, auto_start: bool) {
        if self.session.phase != GamePhase::Ended {
            log::debug!("Restart ignored while {:?}", self.session.phase);
            return;
        }
        self.input.reset = true;
        self.input.jump = auto_start;
    }

    /// Handle a delivered tick. Ticks that are not the one currently
    /// requested (cancelled or left over from an earlier session) are dropped.
    pub fn on_tick(&mut self, request: TickRequest, timestamp_ms: f64) {
        if self.pending != Some(request) {
            log::debug!("Dropping stale tick {:?}", request);
            return;
        }
        self.pending = None;

        if let Some(dt) = self.clock.advance(timestamp_ms) {
            let input = std::mem::take(&mut self.input);
            let step = tick(&self.session, &input, dt);
            self.session = step.session;
            for event in &step.events {
                self.handle_event(event);
            }
        }

        self.pending = Some(self.scheduler.request_tick());
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::NewBest { score } => self.scores.persist(*score),
            // A fresh run measures time from its own first tick
            GameEvent::Reset => self.clock.reset(),
            _ => {}
        }
    }

    /// Stop ticking (tab hidden, widget unmounted). State is left untouched.
    pub fn suspend(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel(request);
        }
        self.clock.reset();
    }

    /// Start ticking again; the first tick back is a warm-up
    pub fn resume(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_tick());
        }
    }

    /// Cancel any outstanding tick for good
    pub fn teardown(&mut self) {
        self.suspend();
        log::info!(
            "Game torn down at score {} ({} ticks capped)",
            self.session.score,
            self.clock.clamped_steps
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn pending_tick(&self) -> Option<TickRequest> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn scores(&self) -> &BestScoreBridge<St> {
        &self.scores
    }
}

impl<S: Scheduler, St: ScoreStore> Drop for Game<S, St> {
    fn drop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel(request);
        }
    }
}
