//! Gacha Box core crate.
//!
//! A capsule-toy machine for the browser: take coins, drag them into the
//! slot, crank the handle three full turns and double-tap the capsule that
//! drops out. Game rules live in plain modules (`coins`, `crank`, `picker`,
//! `session`, ...) so they run and test natively; `ui` is the wasm/DOM glue
//! exposed through `start_game()`.

use wasm_bindgen::prelude::*;

pub mod capsule;
pub mod coins;
pub mod config;
pub mod crank;
pub mod error;
pub mod picker;
pub mod prize;
pub mod session;
pub mod settings;
pub mod stats;
pub mod storage;

mod ui;

pub use config::GameConfig;
pub use error::GachaError;
pub use prize::{Prize, PrizeTable, Rarity};
pub use session::{DrawnPrize, GachaSession};
pub use stats::Stats;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    ui::start(GameConfig::default())
}

/// Start with a JSON config override, e.g. `{"price_choices":[3,4,5]}`.
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    let cfg = GameConfig::from_json(config_json)?;
    ui::start(cfg)
}

/// Milliseconds since page load; 0 outside a browser.
pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
