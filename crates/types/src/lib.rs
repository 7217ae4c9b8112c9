//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the rules engine, the terminal
//! front end and tests alike.
//!
//! # Playfield Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top / spawn side)
//!
//! # Rules Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 1000 | Interval of the periodic advance trigger |
//! | `POINTS_PER_LINE` | 100 | Points per cleared row (multiplied by level) |
//! | `LINES_PER_LEVEL` | 10 | Lines worth of points needed per level-up |
//! | `SPEED_INCREASE` | 0.85 | Interval factor per level (opt-in speed-up) |
//! | `MIN_SPEED_MS` | 100 | Floor for the scaled interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Rotation, GRID_HEIGHT, GRID_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), "#a000f0");
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Playfield width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Playfield height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Base interval of the periodic advance trigger (1000ms = one row per second)
pub const INITIAL_SPEED_MS: u32 = 1000;

/// Interval multiplier applied per level when level speed-up is enabled
pub const SPEED_INCREASE: f64 = 0.85;

/// The scaled interval never drops below this
pub const MIN_SPEED_MS: u32 = 100;

/// Points for one cleared row at level 1
pub const POINTS_PER_LINE: u32 = 100;

/// Rows worth of points per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// A cell on the playfield: 0 = empty, 1 = filled
pub type Cell = u8;

/// Value of an empty cell
pub const EMPTY: Cell = 0;

/// Value of a filled cell
pub const FILLED: Cell = 1;

/// The seven tetromino piece kinds
///
/// Each piece has a fixed shape and a display color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in canonical order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Display color token (`#rrggbb`)
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00f0f0",
            PieceKind::O => "#f0f000",
            PieceKind::T => "#a000f0",
            PieceKind::S => "#00f000",
            PieceKind::Z => "#f00000",
            PieceKind::J => "#0000f0",
            PieceKind::L => "#f0a000",
        }
    }
}

/// Quarter-turn orientation of a piece
///
/// - **North**: Spawn orientation (0 quarter turns)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 270° clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Number of clockwise quarter turns from spawn orientation (0..=3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from a quarter-turn count, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Grid coordinate of a piece's top-left anchor
///
/// `y` may be negative while a piece pokes above the visible playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Game actions that can be applied to a session
///
/// Keyboard input, scripted harnesses and the periodic timer all funnel
/// through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift the piece one column left
    MoveLeft,
    /// Shift the piece one column right
    MoveRight,
    /// Shift the piece one row down, locking it if blocked
    MoveDown,
    /// Rotate 90° clockwise, with wall kicks
    Rotate,
    /// Drop to the landing row and lock immediately
    HardDrop,
    /// Suspend the periodic advance trigger
    Pause,
    /// Re-arm the periodic advance trigger
    Resume,
    /// Pause when running, resume when paused
    TogglePause,
    /// Start (or restart) a session
    Start,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("startGame"), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" | "pausegame" => Some(GameAction::Pause),
            "resume" | "resumegame" => Some(GameAction::Resume),
            "togglepause" => Some(GameAction::TogglePause),
            "start" | "startgame" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::TogglePause => "togglePause",
            GameAction::Start => "start",
        }
    }
}

/// Record of the most recent lock, kept for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    pub level_up: bool,
    pub game_over: bool,
}
