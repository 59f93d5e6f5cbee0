//! Browser bindings
//!
//! The page owns rendering and input. It creates a `WebGame`, forwards
//! jump/restart actions, and reads a JSON snapshot each frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::web::LocalStorageStore;
use crate::platform::web::RafScheduler;
use crate::tuning::Tuning;

type BrowserGame = Game<RafScheduler, LocalStorageStore>;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

#[wasm_bindgen]
pub struct WebGame {
    inner: Rc<RefCell<BrowserGame>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game sized to the viewport and start its frame loop
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Result<WebGame, JsValue> {
        let tuning = Tuning::for_viewport(viewport_width, viewport_height)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let scheduler = RafScheduler::new(window);
        let sink = scheduler.sink();

        let seed = js_sys::Date::now() as u64;
        let inner = Rc::new(RefCell::new(Game::new(
            tuning,
            seed,
            scheduler,
            LocalStorageStore,
        )));

        let weak = Rc::downgrade(&inner);
        *sink.borrow_mut() = Some(Box::new(move |request, timestamp| {
            if let Some(game) = weak.upgrade() {
                game.borrow_mut().on_tick(request, timestamp);
            }
        }));

        Ok(WebGame { inner })
    }

    pub fn jump(&self) {
        self.inner.borrow_mut().jump();
    }

    /// Play again after a crash, straight into a new run
    pub fn restart(&self) {
        self.inner.borrow_mut().restart(true);
    }

    pub fn suspend(&self) {
        self.inner.borrow_mut().suspend();
    }

    pub fn resume(&self) {
        self.inner.borrow_mut().resume();
    }

    pub fn teardown(&self) {
        self.inner.borrow_mut().teardown();
    }

    /// Current snapshot as JSON for the presentation layer
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.inner.borrow().snapshot()).unwrap_or_default()
    }
}
