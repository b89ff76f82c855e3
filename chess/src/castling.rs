//! Castling geometry and rights bookkeeping

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::types::{CastlingRights, CastlingSide, Cell, Color, Coord, File, Piece};

#[inline]
const fn for_color(c: Color, x: u64) -> Bitboard {
    Bitboard::from_raw(match c {
        Color::White => x << 56,
        Color::Black => x,
    })
}

/// Squares between the king and the rook, which must be empty
#[inline]
pub const fn pass(c: Color, s: CastlingSide) -> Bitboard {
    for_color(
        c,
        match s {
            CastlingSide::King => 0x60,
            CastlingSide::Queen => 0x0e,
        },
    )
}

/// Squares the king crosses or lands on, which must not be attacked
#[inline]
pub const fn transit(c: Color, s: CastlingSide) -> Bitboard {
    for_color(
        c,
        match s {
            CastlingSide::King => 0x60,
            CastlingSide::Queen => 0x0c,
        },
    )
}

/// Home squares of the king and the rook participating in castling
#[inline]
pub const fn srcs(c: Color, s: CastlingSide) -> Bitboard {
    for_color(
        c,
        match s {
            CastlingSide::King => 0x90,
            CastlingSide::Queen => 0x11,
        },
    )
}

pub const ALL_SRCS: Bitboard = Bitboard::from_raw(0x91 | (0x91 << 56));

#[inline]
pub const fn king_src(c: Color) -> Coord {
    Coord::from_parts(File::E, geometry::castling_rank(c))
}

#[inline]
pub const fn king_dst(c: Color, s: CastlingSide) -> Coord {
    let file = match s {
        CastlingSide::King => File::G,
        CastlingSide::Queen => File::C,
    };
    Coord::from_parts(file, geometry::castling_rank(c))
}

/// Returns the source and the destination of the rook
#[inline]
pub const fn rook_squares(c: Color, s: CastlingSide) -> (Coord, Coord) {
    let rank = geometry::castling_rank(c);
    match s {
        CastlingSide::King => (
            Coord::from_parts(File::H, rank),
            Coord::from_parts(File::F, rank),
        ),
        CastlingSide::Queen => (
            Coord::from_parts(File::A, rank),
            Coord::from_parts(File::D, rank),
        ),
    }
}

/// Clears the rights affected by a move touching the squares in `change`
///
/// A right is lost as soon as anything leaves or lands on the king's or the rook's home
/// square, so moving the king, moving the rook and capturing the rook are all covered.
pub fn update_rights(mut rights: CastlingRights, change: Bitboard) -> CastlingRights {
    if (change & ALL_SRCS).is_empty() {
        return rights;
    }
    for c in [Color::White, Color::Black] {
        for s in [CastlingSide::Queen, CastlingSide::King] {
            if (change & srcs(c, s)).is_nonempty() {
                rights.unset(c, s);
            }
        }
    }
    rights
}

/// Drops the rights whose king or rook is not on its home square
pub fn normalize_rights(mut rights: CastlingRights, b: &Board) -> CastlingRights {
    for c in [Color::White, Color::Black] {
        for s in [CastlingSide::Queen, CastlingSide::King] {
            let (rook, _) = rook_squares(c, s);
            if b.get(king_src(c)) != Cell::from_parts(c, Piece::King)
                || b.get(rook) != Cell::from_parts(c, Piece::Rook)
            {
                rights.unset(c, s);
            }
        }
    }
    rights
}
