//! Board module - the playfield grid, collision checks, locking, line clears
//!
//! The board is a 10x20 grid of binary cells stored in a flat array for cache
//! locality and zero allocation. Coordinates: (x, y) where x ranges 0..9 (left
//! to right), y ranges 0..19 (top to bottom). Row 0 is the spawn side.
//!
//! Transitions are value-in, value-out: [`Board::lock_piece`] and
//! [`Board::clear_lines`] return a new board and leave the receiver untouched.
//! `Board` is `Copy`, so a snapshot is just a copy.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, Position, EMPTY, FILLED, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Row indices removed by a clear, top to bottom
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Board with every cell filled
    pub fn filled() -> Self {
        Self {
            cells: [FILLED; BOARD_SIZE],
        }
    }

    /// Build from rows (row 0 first). Any non-zero value counts as filled.
    pub fn from_rows(rows: &[[Cell; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                board.cells[y * WIDTH + x] = if cell != EMPTY { FILLED } else { EMPTY };
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    #[inline(always)]
    fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y); `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(FILLED))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|&cell| cell == FILLED)
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == FILLED).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a row-major 2D array
    pub fn to_rows(&self) -> [[Cell; WIDTH]; HEIGHT] {
        let mut out = [[EMPTY; WIDTH]; HEIGHT];
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        out
    }

    /// Whether `piece`, anchored at `position` (or its own position), overlaps
    /// a wall, the floor, or a filled cell.
    ///
    /// Cells above row 0 are exempt from the filled-cell test but not from the
    /// side walls, so pieces may spawn partly above the playfield.
    pub fn has_collision(&self, piece: &Piece, position: Option<Position>) -> bool {
        let position = position.unwrap_or(piece.position);
        piece.cells_at(position).iter().any(|cell| {
            if cell.x < 0 || cell.x >= GRID_WIDTH as i8 || cell.y >= GRID_HEIGHT as i8 {
                return true;
            }
            cell.y >= 0 && self.is_filled(cell.x, cell.y)
        })
    }

    /// Every cell of `piece` lies inside the grid
    pub fn contains(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|c| Self::in_bounds(c.x, c.y))
    }

    /// Stamp `piece` onto a copy of the board. Cells outside the grid are clipped.
    pub fn lock_piece(&self, piece: &Piece) -> Board {
        let mut out = *self;
        for cell in piece.cells() {
            out.set(cell.x, cell.y, FILLED);
        }
        out
    }

    /// Copy of the board with full rows removed and empty rows added on top.
    /// Returns the new board and the number of rows cleared.
    pub fn clear_lines(&self) -> (Board, usize) {
        let mut out = *self;
        let cleared = out.clear_full_rows();
        (out, cleared.len())
    }

    /// Remove all full rows in place, compacting the rest downwards.
    /// Returns the original indices of the cleared rows, top to bottom.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * WIDTH].fill(EMPTY);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Landing position of `piece` if it were dropped straight down.
    ///
    /// Terminates because the floor always collides.
    pub fn ghost_position(&self, piece: &Piece) -> Position {
        let mut ghost = piece.position;
        while !self.has_collision(piece, Some(ghost.offset(0, 1))) {
            ghost.y += 1;
        }
        ghost
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-function form of [`Board::has_collision`]
pub fn has_collision(grid: &Board, piece: &Piece, position: Option<Position>) -> bool {
    grid.has_collision(piece, position)
}

/// Free-function form of [`Board::lock_piece`]
pub fn lock_piece(grid: &Board, piece: &Piece) -> Board {
    grid.lock_piece(piece)
}

/// Free-function form of [`Board::clear_lines`]
pub fn clear_lines(grid: &Board) -> (Board, usize) {
    grid.clear_lines()
}

/// Free-function form of [`Board::ghost_position`]
pub fn get_ghost_position(grid: &Board, piece: &Piece) -> Position {
    grid.ghost_position(piece)
}
