//! Wall kick module - positional corrections for blocked rotations
//!
//! Each table has one row per *current* rotation (the transition being
//! attempted is always clockwise), each row holding 5 `(dx, dy)` offsets tried
//! in order. The first entry is `(0, 0)`, the in-place attempt. The I piece has
//! its own table; every other kind (O included) shares the JLSTZ table.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{PieceKind, Position, Rotation};

/// Offsets to try, indexed by `[current_rotation][attempt]`
pub type KickTable = [[(i8, i8); 5]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z and O)
const JLSTZ_KICKS: KickTable = [
    // 0 -> 1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1 -> 2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2 -> 3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3 -> 0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0 -> 1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1 -> 2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2 -> 3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3 -> 0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Kick table for a piece kind
pub fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// Find the first kicked position at which `piece`, turned to `new_rotation`,
/// fits. Returns `None` when all five candidates collide.
pub fn try_wall_kick(grid: &Board, piece: &Piece, new_rotation: Rotation) -> Option<Position> {
    let turned = piece.with_rotation(new_rotation);
    kick_table(piece.kind)[piece.rotation.index()]
        .iter()
        .map(|&(dx, dy)| piece.position.offset(dx, dy))
        .find(|&candidate| !grid.has_collision(&turned, Some(candidate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FILLED;

    #[test]
    fn tables_start_in_place() {
        for kind in PieceKind::ALL {
            for row in kick_table(kind) {
                assert_eq!(row[0], (0, 0));
            }
        }
    }

    #[test]
    fn o_shares_general_table() {
        assert_eq!(kick_table(PieceKind::O), kick_table(PieceKind::T));
        assert_ne!(kick_table(PieceKind::I), kick_table(PieceKind::T));
    }

    #[test]
    fn free_rotation_uses_first_offset() {
        let grid = Board::new();
        let piece = Piece::spawn(PieceKind::T).with_position(Position::new(4, 5));
        assert_eq!(
            try_wall_kick(&grid, &piece, Rotation::East),
            Some(Position::new(4, 5))
        );
    }

    #[test]
    fn kicks_off_the_right_wall() {
        // J facing west occupies matrix columns 0-1, so it can sit at x = 8.
        // Turning to north needs three columns: in place collides, (-1, 0) fits.
        let grid = Board::new();
        let piece = Piece {
            kind: PieceKind::J,
            position: Position::new(8, 5),
            rotation: Rotation::West,
        };
        assert!(!grid.has_collision(&piece, None));
        assert!(grid.has_collision(&piece.with_rotation(Rotation::North), None));

        assert_eq!(
            try_wall_kick(&grid, &piece, Rotation::North),
            Some(Position::new(7, 5))
        );
    }

    #[test]
    fn kicks_off_the_left_wall() {
        let grid = Board::new();
        let piece = Piece {
            kind: PieceKind::J,
            position: Position::new(-1, 5),
            rotation: Rotation::East,
        };
        assert!(!grid.has_collision(&piece, None));
        assert_eq!(
            try_wall_kick(&grid, &piece, Rotation::South),
            Some(Position::new(0, 5))
        );
    }

    #[test]
    fn all_candidates_blocked() {
        let mut grid = Board::new();
        // Fill everything except the T's own cells at rotation 0.
        let piece = Piece::spawn(PieceKind::T).with_position(Position::new(4, 10));
        for y in 0..20 {
            for x in 0..10 {
                grid.set(x, y, FILLED);
            }
        }
        for cell in piece.cells() {
            grid.set(cell.x, cell.y, 0);
        }
        assert!(try_wall_kick(&grid, &piece, Rotation::East).is_none());
    }
}
