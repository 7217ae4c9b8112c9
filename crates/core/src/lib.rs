//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the rules engine: the playfield, piece geometry and rotation,
//! collision detection, wall kicks, the lock / line-clear cycle, scoring and
//! the session state machine. It has no dependencies on UI, timers or I/O,
//! making it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: time is injected through [`RepeatingTimer`]
//! - **Portable**: runs in a terminal, a GUI, or headless
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shape matrices, spawn rule, and the [`Piece`] value
//! - [`rotation`]: 90° clockwise matrix rotation
//! - [`board`]: 10x20 grid with collision detection, locking, line clearing and ghost projection
//! - [`kicks`]: wall kick tables and resolver
//! - [`rng`]: uniform piece sampling from a seeded LCG
//! - [`timer`]: the repeating-timer capability and a manual fake
//! - [`game_state`]: the session, scoring and leveling
//! - [`snapshot`]: observable state for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, ManualTimer, RepeatingTimer};
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(ManualTimer::new(), 12345);
//! game.start_game();
//! assert!(game.timer().is_armed());
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.grid().filled_count(), 4);
//!
//! // One second of game time is one gravity step.
//! let y = game.current_piece().position.y;
//! game.advance_time(1000);
//! assert_eq!(game.current_piece().position.y, y + 1);
//! ```

pub mod board;
pub mod game_state;
pub mod kicks;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod snapshot;
pub mod timer;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{clear_lines, get_ghost_position, has_collision, lock_piece, Board};
pub use game_state::{level_for_score, line_clear_score, GameState, SessionConfig};
pub use kicks::{kick_table, try_wall_kick};
pub use pieces::{shape, spawn_position, Matrix, Piece};
pub use rng::{PieceSampler, SimpleRng};
pub use rotation::{rotate_cw, rotated};
pub use snapshot::GameSnapshot;
pub use timer::{ManualTimer, RepeatingTimer};
