//! Plain-data copy of everything a renderer or external tool may observe.

use serde::Serialize;

use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, Position, EMPTY, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub current: Piece,
    pub next: Piece,
    pub ghost: Position,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Running and accepting input
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// The current piece moved to its landing row
    pub fn ghost_piece(&self) -> Piece {
        self.current.with_position(self.ghost)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[EMPTY; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            current: Piece::spawn(PieceKind::I),
            next: Piece::spawn(PieceKind::I),
            ghost: Position::default(),
            score: 0,
            level: 1,
            lines: 0,
            started: false,
            paused: false,
            game_over: false,
        }
    }
}
