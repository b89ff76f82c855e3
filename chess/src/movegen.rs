//! Move generation
//!
//! Moves are produced in two stages. The [`semilegal`] generator follows how the pieces move,
//! but ignores whether the mover's king is left under attack. The [`legal`] generator plays
//! each such move on a scratch copy of the board and keeps only those after which the king is
//! safe.

use crate::attack::{self, DIAG_DIRS, KING_DELTAS, KNIGHT_DELTAS, LINE_DIRS};
use crate::board::Board;
use crate::castling;
use crate::geometry;
use crate::moves::{Move, MoveKind, PromotePiece};
use crate::position::Position;
use crate::types::{CastlingSide, Cell, Color, Coord, Piece};

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

trait MaybeMovePush {
    type Err;

    fn push(&mut self, m: Move) -> Result<(), Self::Err>;
}

/// List of moves
///
/// No chess position has more than 218 legal moves, so the list never needs to grow past
/// its inline capacity.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, 256>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Sink for generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        Vec::push(self, m);
    }
}

impl<T: MovePush> MaybeMovePush for T {
    type Err = Infallible;

    fn push(&mut self, m: Move) -> Result<(), Self::Err> {
        <Self as MovePush>::push(self, m);
        Ok(())
    }
}

/// Stops the generation on the first move pushed
struct StopOnFirst;

impl MaybeMovePush for StopOnFirst {
    type Err = ();

    fn push(&mut self, _m: Move) -> Result<(), Self::Err> {
        Err(())
    }
}

struct LegalFilter<'a, P> {
    board: &'a Board,
    inner: &'a mut P,
}

impl<'a, P: MaybeMovePush> MaybeMovePush for LegalFilter<'a, P> {
    type Err = P::Err;

    fn push(&mut self, mv: Move) -> Result<(), Self::Err> {
        match is_legal_on(self.board, mv) {
            true => self.inner.push(mv),
            false => Ok(()),
        }
    }
}

#[inline]
fn is_legal_on(b: &Board, mv: Move) -> bool {
    !attack::is_check(&b.with_move(mv), mv.side())
}

struct MoveGen<'a, P> {
    pos: &'a Position,
    dst: &'a mut P,
}

impl<'a, P: MaybeMovePush> MoveGen<'a, P> {
    fn new(pos: &'a Position, dst: &'a mut P) -> Self {
        MoveGen { pos, dst }
    }

    #[inline]
    fn board(&self) -> &'a Board {
        self.pos.board()
    }

    fn add(&mut self, kind: MoveKind, src: Coord, dst: Coord) -> Result<(), P::Err> {
        let b = self.board();
        self.dst
            .push(Move::new(kind, src, dst, b.get(src), b.get(dst)))
    }

    fn add_pawn(&mut self, src: Coord, dst: Coord, color: Color) -> Result<(), P::Err> {
        if dst.rank() == geometry::promote_dst_rank(color) {
            for p in PromotePiece::ALL {
                self.add(MoveKind::Promote(p), src, dst)?;
            }
            return Ok(());
        }
        self.add(MoveKind::Simple, src, dst)
    }

    fn gen_pawn(&mut self, src: Coord, color: Color) -> Result<(), P::Err> {
        let b = self.board();
        let fwd = geometry::pawn_forward_delta(color);

        if let Some(dst) = src.try_shift(0, fwd) {
            if b.is_empty(dst) {
                self.add_pawn(src, dst, color)?;
                if src.rank() == geometry::double_move_src_rank(color) {
                    if let Some(dst2) = dst.try_shift(0, fwd) {
                        if b.is_empty(dst2) {
                            self.add(MoveKind::PawnDouble, src, dst2)?;
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(dst) = src.try_shift(df, fwd) {
                if b.is_occupied_by(dst, color.inv()) {
                    self.add_pawn(src, dst, color)?;
                }
            }
        }
        Ok(())
    }

    fn gen_leaper(
        &mut self,
        src: Coord,
        color: Color,
        deltas: &[(isize, isize)],
    ) -> Result<(), P::Err> {
        let b = self.board();
        for &(df, dr) in deltas {
            if let Some(dst) = src.try_shift(df, dr) {
                if !b.is_occupied_by(dst, color) {
                    self.add(MoveKind::Simple, src, dst)?;
                }
            }
        }
        Ok(())
    }

    fn gen_slider(
        &mut self,
        src: Coord,
        color: Color,
        dirs: &[(isize, isize)],
    ) -> Result<(), P::Err> {
        let b = self.board();
        for &(df, dr) in dirs {
            let mut cur = src;
            while let Some(dst) = cur.try_shift(df, dr) {
                let cell = b.get(dst);
                if cell.color() == Some(color) {
                    break;
                }
                self.add(MoveKind::Simple, src, dst)?;
                if cell.is_occupied() {
                    break;
                }
                cur = dst;
            }
        }
        Ok(())
    }

    fn gen_castling(&mut self, src: Coord, color: Color) -> Result<(), P::Err> {
        if src != castling::king_src(color) {
            return Ok(());
        }
        let b = self.board();
        let enemy = color.inv();
        for side in [CastlingSide::King, CastlingSide::Queen] {
            if !self.pos.castling().has(color, side) {
                continue;
            }
            let (rook_src, _) = castling::rook_squares(color, side);
            if b.get(rook_src) != Cell::from_parts(color, Piece::Rook) {
                continue;
            }
            if (castling::pass(color, side) & b.occupied()).is_nonempty() {
                continue;
            }
            if attack::is_cell_attacked(b, src, enemy) {
                continue;
            }
            if castling::transit(color, side)
                .into_iter()
                .any(|c| attack::is_cell_attacked(b, c, enemy))
            {
                continue;
            }
            self.add(
                MoveKind::Castling(side),
                src,
                castling::king_dst(color, side),
            )?;
        }
        Ok(())
    }

    fn gen_from(&mut self, src: Coord) -> Result<(), P::Err> {
        let (color, piece) = match self.board().piece_at(src) {
            Some(parts) => parts,
            None => return Ok(()),
        };
        if color != self.pos.side() {
            return Ok(());
        }
        match piece {
            Piece::Pawn => self.gen_pawn(src, color),
            Piece::Knight => self.gen_leaper(src, color, &KNIGHT_DELTAS),
            Piece::King => {
                self.gen_leaper(src, color, &KING_DELTAS)?;
                self.gen_castling(src, color)
            }
            Piece::Bishop => self.gen_slider(src, color, &DIAG_DIRS),
            Piece::Rook => self.gen_slider(src, color, &LINE_DIRS),
            Piece::Queen => {
                self.gen_slider(src, color, &DIAG_DIRS)?;
                self.gen_slider(src, color, &LINE_DIRS)
            }
        }
    }

    fn gen_all(&mut self) -> Result<(), P::Err> {
        for src in self.board().color(self.pos.side()) {
            self.gen_from(src)?;
        }
        Ok(())
    }
}

/// Returns `true` if the semi-legal move `mv` doesn't leave the mover's king under attack
///
/// The move is tried on a copy of the board, the position itself stays untouched.
pub fn is_legal(pos: &Position, mv: Move) -> bool {
    is_legal_on(pos.board(), mv)
}

/// Returns `true` if the side to move has at least one legal move
pub fn has_legal_moves(pos: &Position) -> bool {
    let mut p = StopOnFirst;
    let mut filter = LegalFilter {
        board: pos.board(),
        inner: &mut p,
    };
    MoveGen::new(pos, &mut filter).gen_all().is_err()
}

pub mod semilegal {
    use super::*;

    /// Generates the moves of the piece on `src`, ignoring king safety
    ///
    /// Returns nothing if `src` is empty or holds a piece of the side not to move.
    pub fn gen_from_into(pos: &Position, src: Coord, dst: &mut impl MovePush) {
        let _ = MoveGen::new(pos, dst).gen_from(src);
    }

    /// Generates all the moves of the side to move, ignoring king safety
    pub fn gen_all_into(pos: &Position, dst: &mut impl MovePush) {
        let _ = MoveGen::new(pos, dst).gen_all();
    }

    pub fn gen_from(pos: &Position, src: Coord) -> MoveList {
        let mut res = MoveList::new();
        gen_from_into(pos, src, &mut res);
        res
    }

    pub fn gen_all(pos: &Position) -> MoveList {
        let mut res = MoveList::new();
        gen_all_into(pos, &mut res);
        res
    }
}

pub mod legal {
    use super::*;

    /// Generates the legal moves of the piece on `src`
    ///
    /// Returns nothing if `src` is empty or holds a piece of the side not to move.
    pub fn gen_from_into(pos: &Position, src: Coord, dst: &mut impl MovePush) {
        let mut filter = LegalFilter {
            board: pos.board(),
            inner: dst,
        };
        let _ = MoveGen::new(pos, &mut filter).gen_from(src);
    }

    /// Generates all the legal moves of the side to move
    pub fn gen_all_into(pos: &Position, dst: &mut impl MovePush) {
        let mut filter = LegalFilter {
            board: pos.board(),
            inner: dst,
        };
        let _ = MoveGen::new(pos, &mut filter).gen_all();
    }

    pub fn gen_from(pos: &Position, src: Coord) -> MoveList {
        let mut res = MoveList::new();
        gen_from_into(pos, src, &mut res);
        res
    }

    pub fn gen_all(pos: &Position) -> MoveList {
        let mut res = MoveList::new();
        gen_all_into(pos, &mut res);
        res
    }
}
