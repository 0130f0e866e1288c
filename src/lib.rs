//! Mole Dash core crate.
//!
//! A whack-a-mole reflex game. The timing / state engine is platform free:
//! [`GameEngine`] owns phase, countdown, score and the single active hole, and
//! reports everything through [`GameObserver`] callbacks. On `wasm32` the `web`
//! module mounts it on a canvas and exposes `start_game()` to JS.

mod clock;
mod config;
mod engine;
mod error;
mod input;
mod layout;
mod scheduler;
mod score;
mod tasks;
#[cfg(target_arch = "wasm32")]
mod web;

pub use clock::{Clock, TimeLeft};
pub use config::{GameConfig, TOGGLE_KEY};
pub use engine::{Command, EventLog, GameEngine, GameObserver, GamePhase, RenderEvent, ScoreIndicator};
pub use error::ConfigError;
pub use input::{InputEvent, InputRouter};
pub use layout::GridLayout;
pub use scheduler::{Activation, Slot, TargetScheduler};
pub use score::ScoreTracker;
#[cfg(target_arch = "wasm32")]
pub use web::start_game;
#[cfg(all(target_arch = "wasm32", feature = "serde_json"))]
pub use web::start_game_with_config;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;
