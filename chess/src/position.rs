//! Position, i.e. everything needed to decide which moves are legal

use crate::bitboard::Bitboard;
use crate::board::{Board, CellsParseError, Pretty, PrettyStyle, ValidateError};
use crate::moves::{IllegalMove, Move, PromotePiece};
use crate::movegen::{self, MoveList};
use crate::types::{
    CastlingRights, CastlingRightsParseError, Color, ColorParseError, Coord, Outcome, Piece,
};
use crate::{attack, castling};

use std::fmt;
use std::str::FromStr;

use log::trace;
use thiserror::Error;

/// Error parsing a position from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// FEN contains non-ASCII characters
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// Board is not specified
    #[error("board not specified")]
    NoBoard,
    /// Bad piece placement
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    /// Side to move is not specified
    #[error("no move side")]
    NoMoveSide,
    /// Bad side to move
    #[error("bad move side: {0}")]
    MoveSide(#[from] ColorParseError),
    /// Castling rights are not specified
    #[error("no castling rights")]
    NoCastling,
    /// Bad castling rights
    #[error("bad castling rights: {0}")]
    Castling(#[from] CastlingRightsParseError),
    /// Extra data after the last FEN field
    #[error("extra data in FEN")]
    ExtraData,
    /// The parsed position is invalid
    #[error("invalid position: {0}")]
    Invalid(#[from] ValidateError),
}

/// Chess position
///
/// Holds the board together with the side to move, the castling rights and the last move
/// made. Positions are immutable values: applying a move returns a new position.
///
/// A position is always valid, i.e. each side has exactly one king, no pawns stand on
/// the outer ranks, the side which has just moved is not in check, and the castling rights
/// only mention kings and rooks that are on their home squares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side: Color,
    castling: CastlingRights,
    last_move: Option<Move>,
}

impl Position {
    /// Returns the initial position, White to move
    pub fn initial() -> Position {
        Position {
            board: Board::initial(),
            side: Color::White,
            castling: CastlingRights::FULL,
            last_move: None,
        }
    }

    /// Creates a position from its parts
    ///
    /// Castling rights which are not backed by the pieces on their home squares are dropped.
    pub fn new(
        board: Board,
        side: Color,
        castling: CastlingRights,
    ) -> Result<Position, ValidateError> {
        board.validate()?;
        if attack::is_check(&board, side.inv()) {
            return Err(ValidateError::OpponentKingAttacked);
        }
        Ok(Position {
            castling: castling::normalize_rights(castling, &board),
            board,
            side,
            last_move: None,
        })
    }

    /// Parses the position from FEN
    ///
    /// The en passant field and the move counters are optional and are not interpreted.
    ///
    /// # Example
    ///
    /// ```
    /// # use rookery::{Color, Position};
    /// #
    /// let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    /// assert_eq!(pos.side(), Color::White);
    /// // Black has no rooks, so its castling rights are gone
    /// assert_eq!(pos.as_fen(), "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    /// ```
    pub fn from_fen(fen: &str) -> Result<Position, FenParseError> {
        if !fen.is_ascii() {
            return Err(FenParseError::NonAscii);
        }
        let mut iter = fen.split(' ').filter(|s| !s.is_empty()).fuse();
        let board = Board::from_str(iter.next().ok_or(FenParseError::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(FenParseError::NoMoveSide)?)?;
        let castling = CastlingRights::from_str(iter.next().ok_or(FenParseError::NoCastling)?)?;
        // En passant square, halfmove clock and fullmove number
        let _ = (iter.next(), iter.next(), iter.next());
        if iter.next().is_some() {
            return Err(FenParseError::ExtraData);
        }
        Ok(Position::new(board, side, castling)?)
    }

    /// Formats the position as FEN
    ///
    /// En passant and the move counters are not tracked, so they are always written as
    /// `- 0 1`.
    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        attack::is_check(&self.board, self.side)
    }

    /// Returns the pieces giving check to the side to move
    pub fn checkers(&self) -> Bitboard {
        attack::cell_attackers(
            &self.board,
            self.board.king_pos(self.side),
            self.side.inv(),
        )
    }

    pub fn legal_moves(&self) -> MoveList {
        movegen::legal::gen_all(self)
    }

    pub fn legal_moves_from(&self, src: Coord) -> MoveList {
        movegen::legal::gen_from(self, src)
    }

    #[inline]
    pub fn has_legal_moves(&self) -> bool {
        movegen::has_legal_moves(self)
    }

    /// Finds the legal move from `src` to `dst`
    ///
    /// For pawn moves to the last rank, `promote` selects the piece and must be present.
    /// For other moves it must be `None`.
    pub fn find_move(
        &self,
        src: Coord,
        dst: Coord,
        promote: Option<PromotePiece>,
    ) -> Option<Move> {
        let want = promote.map(Piece::from);
        self.legal_moves_from(src)
            .into_iter()
            .find(|mv| mv.dst() == dst && mv.promote() == want)
    }

    /// Evaluates the outcome for the side to move
    pub fn calc_outcome(&self) -> Outcome {
        let check = self.is_check();
        let has_moves = self.has_legal_moves();
        trace!(
            "outcome for {}: check = {}, has moves = {}",
            self.side.name(),
            check,
            has_moves
        );
        match (check, has_moves) {
            (true, true) => Outcome::Check(self.side),
            (true, false) => Outcome::Checkmate(self.side),
            (false, true) => Outcome::InProgress,
            (false, false) => Outcome::Stalemate,
        }
    }

    /// Applies the legal move `mv` and returns the resulting position
    ///
    /// If `mv` is not legal in this position, returns [`IllegalMove`] and leaves the
    /// position intact.
    pub fn make_move(&self, mv: Move) -> Result<Position, IllegalMove> {
        if !self.legal_moves_from(mv.src()).contains(&mv) {
            return Err(IllegalMove(mv));
        }
        Ok(self.make_move_unchecked(mv))
    }

    /// Applies the move without checking that it is legal
    ///
    /// Passing a move which was not generated for this position yields a meaningless result.
    pub fn make_move_unchecked(&self, mv: Move) -> Position {
        let change = Bitboard::from_coord(mv.src()) | Bitboard::from_coord(mv.dst());
        let mut castling = castling::update_rights(self.castling, change);
        if mv.kind().castling_side().is_some() {
            castling.unset_color(mv.side());
        }
        Position {
            board: self.board.with_move(mv),
            side: self.side.inv(),
            castling,
            last_move: Some(mv),
        }
    }

    /// Wraps the position to allow pretty-printing
    ///
    /// Same as [`Board::pretty()`], with the side to move shown in the corner.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.board.pretty_with_side(self.side, style)
    }
}

impl Default for Position {
    #[inline]
    fn default() -> Position {
        Position::initial()
    }
}

impl FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Position, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} - 0 1", self.board, self.side, self.castling)
    }
}
