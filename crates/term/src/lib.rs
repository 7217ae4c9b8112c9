//! Terminal presentation layer.
//!
//! Renders a [`GameSnapshot`](crate::core::GameSnapshot) into a character
//! framebuffer and flushes it through crossterm. Rendering is split so the
//! view stays pure:
//!
//! - [`fb`]: styled character grid
//! - [`game_view`]: snapshot → framebuffer (no I/O, unit-testable)
//! - [`renderer`]: framebuffer → terminal, redrawing only changed rows

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
