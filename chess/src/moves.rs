//! Moves and their application to the board

use crate::board::Board;
use crate::castling;
use crate::types::{CastlingSide, Cell, Color, Coord, Piece};

use std::fmt;

use thiserror::Error;

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl PromotePiece {
    /// All the promotion targets, in the order in which the move generator emits them
    pub const ALL: [PromotePiece; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    pub fn as_char(&self) -> char {
        Piece::from(*self).as_char().to_ascii_lowercase()
    }
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

impl TryFrom<Piece> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: Piece) -> Result<Self, Self::Error> {
        match p {
            Piece::Knight => Ok(PromotePiece::Knight),
            Piece::Bishop => Ok(PromotePiece::Bishop),
            Piece::Rook => Ok(PromotePiece::Rook),
            Piece::Queen => Ok(PromotePiece::Queen),
            _ => Err(()),
        }
    }
}

/// Move kind
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Non-castling king move, piece move or single pawn step (either non-capture or capture)
    Simple,
    /// Double pawn move from the initial rank
    PawnDouble,
    /// Castling; the king moves two squares and the rook jumps over it
    Castling(CastlingSide),
    /// Pawn move to the last rank (either non-capture or capture)
    Promote(PromotePiece),
}

impl MoveKind {
    #[inline]
    pub fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Self::Castling(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the promotion piece if this is a promotion
    #[inline]
    pub fn promote(self) -> Option<Piece> {
        match self {
            Self::Promote(p) => Some(p.into()),
            _ => None,
        }
    }
}

/// Chess move
///
/// A move remembers the piece it moves and the piece it captures, so it can be shown,
/// compared and applied without looking at the board again.
///
/// Moves are only created by the move generator, which guarantees that they are at least
/// pseudo-legal in the position they were generated for. Use [`Position::find_move()`]
/// or the move lists returned by [`Game`] to obtain them.
///
/// [`Position::find_move()`]: crate::position::Position::find_move
/// [`Game`]: crate::game::Game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Coord,
    dst: Coord,
    cell: Cell,
    captured: Cell,
}

/// Error indicating that the move cannot be applied in the current position
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
#[error("illegal move {0}")]
pub struct IllegalMove(pub Move);

impl Move {
    #[inline]
    pub(crate) fn new(kind: MoveKind, src: Coord, dst: Coord, cell: Cell, captured: Cell) -> Move {
        debug_assert!(cell.is_occupied());
        Move {
            kind,
            src,
            dst,
            cell,
            captured,
        }
    }

    /// Creates a castling move for `color` in the direction `side`
    ///
    /// The move is well-formed, but may be illegal in a concrete position.
    pub fn from_castling(color: Color, side: CastlingSide) -> Move {
        Move {
            kind: MoveKind::Castling(side),
            src: castling::king_src(color),
            dst: castling::king_dst(color, side),
            cell: Cell::from_parts(color, Piece::King),
            captured: Cell::EMPTY,
        }
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub fn dst(&self) -> Coord {
        self.dst
    }

    /// Returns the moving piece as it stood on the source square
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Returns the side which makes this move
    #[inline]
    pub fn side(&self) -> Color {
        match self.cell.color() {
            Some(c) => c,
            None => unreachable!("move without a piece"),
        }
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        match self.cell.piece() {
            Some(p) => p,
            None => unreachable!("move without a piece"),
        }
    }

    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured.piece()
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_occupied()
    }

    #[inline]
    pub fn promote(&self) -> Option<Piece> {
        self.kind.promote()
    }

    /// Returns the contents of the destination square after the move
    #[inline]
    pub fn dst_cell(&self) -> Cell {
        match self.kind {
            MoveKind::Promote(p) => Cell::from_parts(self.side(), p.into()),
            _ => self.cell,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.src, self.dst)?;
        if let MoveKind::Promote(p) = self.kind {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl Board {
    /// Applies the move to the board in place
    ///
    /// Only piece placement is updated. The move must have been generated for this board,
    /// otherwise the resulting placement is meaningless.
    pub fn make_move(&mut self, mv: Move) {
        self.remove(mv.src);
        self.put(mv.dst, mv.dst_cell());
        if let MoveKind::Castling(side) = mv.kind {
            let (rook_src, rook_dst) = castling::rook_squares(mv.side(), side);
            let rook = self.remove(rook_src);
            self.put(rook_dst, rook);
        }
    }

    /// Returns a copy of the board with the move applied
    #[inline]
    pub fn with_move(&self, mv: Move) -> Board {
        let mut res = *self;
        res.make_move(mv);
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    fn coord(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_simple() {
        let b = Board::initial();
        let mv = Move::new(
            MoveKind::PawnDouble,
            coord("e2"),
            coord("e4"),
            b.get(coord("e2")),
            Cell::EMPTY,
        );
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(mv.side(), Color::White);
        assert_eq!(mv.piece(), Piece::Pawn);
        assert!(!mv.is_capture());

        let b2 = b.with_move(mv);
        assert_eq!(b2.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
        assert_eq!(b.to_string(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }

    #[test]
    fn test_castling() {
        let mut b = Board::from_fen_cells("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let mv = Move::from_castling(Color::White, CastlingSide::King);
        assert_eq!(mv.to_string(), "e1g1");
        b.make_move(mv);
        assert_eq!(b.to_string(), "r3k2r/8/8/8/8/8/8/R4RK1");

        let mv = Move::from_castling(Color::Black, CastlingSide::Queen);
        assert_eq!(mv.to_string(), "e8c8");
        b.make_move(mv);
        assert_eq!(b.to_string(), "2kr3r/8/8/8/8/8/8/R4RK1");
    }

    #[test]
    fn test_promote() {
        let mut b = Board::from_fen_cells("1n2k3/P7/8/8/8/8/8/4K3").unwrap();
        let mv = Move::new(
            MoveKind::Promote(PromotePiece::Knight),
            coord("a7"),
            coord("b8"),
            b.get(coord("a7")),
            b.get(coord("b8")),
        );
        assert_eq!(mv.to_string(), "a7b8n");
        assert_eq!(mv.captured(), Some(Piece::Knight));
        assert_eq!(mv.promote(), Some(Piece::Knight));
        assert_eq!(
            mv.dst_cell(),
            Cell::from_parts(Color::White, Piece::Knight)
        );
        b.make_move(mv);
        assert_eq!(
            b.piece_at(Coord::from_parts(File::B, Rank::R8)),
            Some((Color::White, Piece::Knight))
        );
        assert!(b.is_empty(coord("a7")));
    }

    #[test]
    fn test_promote_piece() {
        for p in PromotePiece::ALL {
            assert_eq!(PromotePiece::try_from(Piece::from(p)), Ok(p));
        }
        assert_eq!(PromotePiece::try_from(Piece::King), Err(()));
        assert_eq!(PromotePiece::try_from(Piece::Pawn), Err(()));
    }
}
