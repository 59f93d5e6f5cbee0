//! Pipe Dash headless runner
//!
//! Plays the simulation with the autopilot at a simulated 60 Hz and prints
//! the final snapshot as JSON. The browser build is driven from `web.rs`.
//!
//! Usage: `pipe-dash [tuning.json]`
//! - `PIPE_DASH_SEED`: RNG seed (default: current time)
//! - `PIPE_DASH_SECONDS`: simulated seconds to run (default: 60)
//! - `PIPE_DASH_STORE`: best-score file (default: `pipe_dash_scores.json`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pipe Dash (headless) starting...");

    if let Err(err) = native::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `pipe_dash::web::wasm_start`
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pipe_dash::persistence::JsonFileStore;
    use pipe_dash::platform::ManualScheduler;
    use pipe_dash::sim::{GamePhase, autopilot};
    use pipe_dash::{Game, Tuning, TuningError};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    pub fn run() -> Result<(), TuningError> {
        let tuning = match std::env::args().nth(1) {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let now_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let seed = env_or("PIPE_DASH_SEED", now_seed);
        let seconds = env_or("PIPE_DASH_SECONDS", 60.0f64);
        let store_path = env_or("PIPE_DASH_STORE", String::from("pipe_dash_scores.json"));

        let store = JsonFileStore::new(store_path);
        let mut game = Game::new(tuning, seed, ManualScheduler::new(), store);

        let frames = (seconds * 1000.0 / FRAME_MS) as u64;
        let mut runs = 0u32;
        let mut now = 0.0;
        for _ in 0..frames {
            now += FRAME_MS;

            let phase = game.session().phase;
            match phase {
                GamePhase::Ended => {
                    runs += 1;
                    log::info!("Run {} over at {}", runs, game.session().score);
                    game.restart(true);
                }
                _ if autopilot::wants_jump(game.session()) => game.jump(),
                _ => {}
            }

            for request in game.scheduler_mut().take_pending() {
                game.on_tick(request, now);
            }
        }

        game.teardown();
        let snapshot = game.snapshot();
        log::info!(
            "Finished {} runs in {:.0}s, best {}",
            runs,
            seconds,
            snapshot.best_score
        );
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(err) => log::warn!("Could not encode snapshot: {}", err),
        }
        Ok(())
    }
}
