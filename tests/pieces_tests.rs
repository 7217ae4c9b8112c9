//! Piece tests: shapes, spawn positions, rotation and wall kicks

use blockfall::core::{kick_table, rotate_cw, rotated, shape, spawn_position, try_wall_kick};
use blockfall::core::{Board, Piece};
use blockfall::types::{PieceKind, Position, Rotation, FILLED};

#[test]
fn test_every_orientation_has_four_minos() {
    for kind in PieceKind::ALL {
        for r in 0..4 {
            let piece = Piece::spawn(kind).with_rotation(Rotation::from_index(r));
            assert_eq!(piece.cells().len(), 4, "{kind:?} rotation {r}");
        }
    }
}

#[test]
fn test_shape_sizes() {
    assert_eq!(shape(PieceKind::I).size(), 4);
    assert_eq!(shape(PieceKind::O).size(), 2);
    for kind in [
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ] {
        assert_eq!(shape(kind).size(), 3);
    }
}

#[test]
fn test_spawn_positions_are_centered() {
    assert_eq!(spawn_position(PieceKind::I), Position::new(3, 0));
    assert_eq!(spawn_position(PieceKind::O), Position::new(4, 0));
    assert_eq!(spawn_position(PieceKind::T), Position::new(4, 0));

    let piece = Piece::spawn(PieceKind::L);
    assert_eq!(piece.rotation, Rotation::North);
    assert_eq!(piece.position, Position::new(4, 0));
}

#[test]
fn test_rotation_cycle() {
    let mut r = Rotation::North;
    for expected in [
        Rotation::East,
        Rotation::South,
        Rotation::West,
        Rotation::North,
    ] {
        r = r.rotate_cw();
        assert_eq!(r, expected);
    }
}

#[test]
fn test_rotated_matches_repeated_rotate_cw() {
    for kind in PieceKind::ALL {
        let mut m = *shape(kind);
        for r in 0..4 {
            assert_eq!(rotated(kind, Rotation::from_index(r)), m);
            m = rotate_cw(&m);
        }
    }
}

#[test]
fn test_s_rotates_clockwise() {
    let east = rotated(PieceKind::S, Rotation::East);
    assert_eq!(east.row(0), &[0, 1, 0]);
    assert_eq!(east.row(1), &[0, 1, 1]);
    assert_eq!(east.row(2), &[0, 0, 1]);
}

#[test]
fn test_kick_tables_have_five_offsets_per_rotation() {
    for kind in PieceKind::ALL {
        let table = kick_table(kind);
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|row| row.len() == 5 && row[0] == (0, 0)));
    }
}

#[test]
fn test_i_piece_kicks_off_right_wall() {
    // Vertical I on the left column of its matrix, at board column 7.
    let grid = Board::new();
    let piece = Piece {
        kind: PieceKind::I,
        position: Position::new(7, 5),
        rotation: Rotation::West,
    };
    assert!(!grid.has_collision(&piece, None));

    // In place would need columns 7..=10; (1, 0) is worse; (-2, 0) fits.
    assert_eq!(
        try_wall_kick(&grid, &piece, Rotation::North),
        Some(Position::new(5, 5))
    );
}

#[test]
fn test_kick_skips_blocked_candidates() {
    // T at rotation 0 turning east: in place blocked by a filled cell, so the
    // second offset (-1, 0) is used.
    let mut grid = Board::new();
    let piece = Piece::spawn(PieceKind::T).with_position(Position::new(4, 10));
    // East T occupies matrix column 1 rows 0..=2 and (2, 1); block (5, 12).
    grid.set(5, 12, FILLED);
    let turned = piece.with_rotation(Rotation::East);
    assert!(grid.has_collision(&turned, None));

    assert_eq!(
        try_wall_kick(&grid, &piece, Rotation::East),
        Some(Position::new(3, 10))
    );
}
