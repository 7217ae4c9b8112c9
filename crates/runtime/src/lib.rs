//! Runtime glue - drives the session's periodic trigger from tokio
//!
//! The core only knows the [`RepeatingTimer`](blockfall_core::RepeatingTimer)
//! capability. This crate provides a tokio-backed implementation that emits
//! ticks over a channel, so the game loop stays single-threaded:
//!
//! ```no_run
//! use blockfall_core::GameState;
//! use blockfall_runtime::TickRuntime;
//!
//! # fn main() -> anyhow::Result<()> {
//! let (mut ticks, timer) = TickRuntime::start()?;
//! let mut game = GameState::new(timer, 1);
//! game.start_game();
//!
//! loop {
//!     while ticks.try_recv().is_some() {
//!         game.tick();
//!     }
//!     # break;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! It also reads runner configuration from the environment (see [`config`]).

pub mod config;
pub mod timer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::RunConfig;
pub use timer::{Tick, TickRuntime, TokioTimer};
