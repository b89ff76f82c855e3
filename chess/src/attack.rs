//! Attack detection
//!
//! All the queries walk backwards from the target square: for each kind of attacker, we look
//! where such a piece would have to stand to hit the target, and check whether it is there.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::types::{Cell, Color, Coord, Piece};

pub(crate) const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(crate) const DIAG_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) const LINE_DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Returns the first occupied square along the ray from `coord` (exclusive) in direction `dir`
#[inline]
pub(crate) fn ray_hit(b: &Board, coord: Coord, dir: (isize, isize)) -> Option<(Coord, Cell)> {
    let mut cur = coord;
    while let Some(next) = cur.try_shift(dir.0, dir.1) {
        let cell = b.get(next);
        if cell.is_occupied() {
            return Some((next, cell));
        }
        cur = next;
    }
    None
}

#[inline]
fn is_slider(cell: Cell, color: Color, diag: bool) -> bool {
    let line_piece = if diag { Piece::Bishop } else { Piece::Rook };
    match cell.parts() {
        Some((c, p)) if c == color => p == Piece::Queen || p == line_piece,
        _ => false,
    }
}

/// Visits every square holding a piece of color `color` that attacks `coord`
///
/// Stops early and returns `true` as soon as `f` returns `true`.
fn visit_attackers(
    b: &Board,
    coord: Coord,
    color: Color,
    mut f: impl FnMut(Coord) -> bool,
) -> bool {
    // A pawn of `color` stands one rank behind the target, from its own point of view
    let back = -geometry::pawn_forward_delta(color);
    let pawn = Cell::from_parts(color, Piece::Pawn);
    for df in [-1, 1] {
        if let Some(src) = coord.try_shift(df, back) {
            if b.get(src) == pawn && f(src) {
                return true;
            }
        }
    }

    let knight = Cell::from_parts(color, Piece::Knight);
    for (df, dr) in KNIGHT_DELTAS {
        if let Some(src) = coord.try_shift(df, dr) {
            if b.get(src) == knight && f(src) {
                return true;
            }
        }
    }

    let king = Cell::from_parts(color, Piece::King);
    for (df, dr) in KING_DELTAS {
        if let Some(src) = coord.try_shift(df, dr) {
            if b.get(src) == king && f(src) {
                return true;
            }
        }
    }

    for (dirs, diag) in [(&DIAG_DIRS, true), (&LINE_DIRS, false)] {
        for &dir in dirs {
            if let Some((src, cell)) = ray_hit(b, coord, dir) {
                if is_slider(cell, color, diag) && f(src) {
                    return true;
                }
            }
        }
    }

    false
}

/// Returns `true` if the square `coord` is attacked by any piece of color `color`
///
/// The contents of `coord` itself don't matter, so this can be used both for captures and
/// for checking empty squares the king wants to cross.
pub fn is_cell_attacked(b: &Board, coord: Coord, color: Color) -> bool {
    visit_attackers(b, coord, color, |_| true)
}

/// Returns all the pieces of color `color` attacking the square `coord`
pub fn cell_attackers(b: &Board, coord: Coord, color: Color) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    visit_attackers(b, coord, color, |src| {
        res.set(src);
        false
    });
    res
}

/// Returns `true` if the king of color `color` is attacked by the opponent
pub fn is_check(b: &Board, color: Color) -> bool {
    is_cell_attacked(b, b.king_pos(color), color.inv())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    fn coord(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_attackers() {
        let b = Board::from_fen_cells("3R3B/8/3R4/1NP1Q3/3p4/1N2b3/8/B2R1K1k").unwrap();
        let d4 = coord("d4");

        assert!(is_cell_attacked(&b, d4, Color::White));
        let attackers = Bitboard::EMPTY
            .with(coord("b3"))
            .with(coord("b5"))
            .with(coord("d6"))
            .with(coord("e5"))
            .with(coord("d1"))
            .with(coord("a1"));
        assert_eq!(cell_attackers(&b, d4, Color::White), attackers);

        // d8 stands behind d6
        assert!(!cell_attackers(&b, d4, Color::White).has(coord("d8")));
        // The bishop on h8 is blocked by the queen
        assert!(!cell_attackers(&b, d4, Color::White).has(coord("h8")));

        assert_eq!(
            cell_attackers(&b, coord("d4"), Color::Black),
            Bitboard::from_coord(coord("e3"))
        );
        assert!(!is_cell_attacked(&b, coord("a8"), Color::Black));
    }

    #[test]
    fn test_pawns() {
        let b = Board::from_fen_cells("8/8/8/3p4/8/8/3P4/8").unwrap();
        assert!(is_cell_attacked(&b, coord("c3"), Color::White));
        assert!(is_cell_attacked(&b, coord("e3"), Color::White));
        assert!(!is_cell_attacked(&b, coord("d3"), Color::White));
        assert!(!is_cell_attacked(&b, coord("c1"), Color::White));

        assert!(is_cell_attacked(&b, coord("c4"), Color::Black));
        assert!(is_cell_attacked(&b, coord("e4"), Color::Black));
        assert!(!is_cell_attacked(&b, coord("c6"), Color::Black));
    }

    #[test]
    fn test_kings() {
        let b = Board::from_fen_cells("8/8/8/2KPk3/8/8/8/8").unwrap();
        let d5 = Coord::from_parts(File::D, Rank::R5);
        assert_eq!(
            cell_attackers(&b, d5, Color::White),
            Bitboard::from_coord(Coord::from_parts(File::C, Rank::R5)),
        );
        assert_eq!(
            cell_attackers(&b, d5, Color::Black),
            Bitboard::from_coord(Coord::from_parts(File::E, Rank::R5)),
        );
    }

    #[test]
    fn test_check() {
        let b = Board::initial();
        assert!(!is_check(&b, Color::White));
        assert!(!is_check(&b, Color::Black));

        let b = Board::from_fen_cells("4k3/8/8/8/8/8/8/4K2r").unwrap();
        assert!(is_check(&b, Color::White));
        assert!(!is_check(&b, Color::Black));

        let b = Board::from_fen_cells("4k3/8/8/8/8/8/8/4KN1r").unwrap();
        assert!(!is_check(&b, Color::White));

        let b = Board::from_fen_cells("4k3/8/3N4/8/8/8/8/4K3").unwrap();
        assert!(is_check(&b, Color::Black));
    }
}
