//! Turn-by-turn game driver

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{Move, PromotePiece};
use crate::movegen::MoveList;
use crate::position::Position;
use crate::types::{Color, Coord, Outcome};

use log::{debug, info, trace};

pub use crate::moves::IllegalMove;

/// Chess game
///
/// Owns the current [`Position`] and its [`Outcome`], and is the only way to advance the
/// game. Every move passed to [`Game::apply_move()`] is checked against the set of legal
/// moves first, so a game can never reach an illegal position.
///
/// # Example
///
/// ```
/// # use rookery::{Color, Coord, Game, Outcome};
/// #
/// let mut game = Game::initial();
/// for (src, dst) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
///     let src: Coord = src.parse().unwrap();
///     let dst: Coord = dst.parse().unwrap();
///     let mv = game.find_move(src, dst, None).unwrap();
///     game.apply_move(mv).unwrap();
/// }
/// assert_eq!(game.outcome(), Outcome::Checkmate(Color::White));
/// assert_eq!(game.outcome().winner(), Some(Color::Black));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pos: Position,
    outcome: Outcome,
    ply: usize,
}

impl Game {
    /// Starts a new game from the initial position
    pub fn initial() -> Game {
        Game::new(Position::initial())
    }

    /// Starts a new game from the given position
    pub fn new(pos: Position) -> Game {
        let outcome = pos.calc_outcome();
        Game {
            pos,
            outcome,
            ply: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.pos
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.pos.board()
    }

    /// Returns the side to move
    ///
    /// After the game is finished, this is the side which has no legal moves.
    #[inline]
    pub fn side(&self) -> Color {
        self.pos.side()
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.pos.last_move()
    }

    /// Returns the number of moves applied since the game started
    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Returns all the legal moves for the side to move
    ///
    /// The list is empty if and only if the game is finished.
    pub fn legal_moves(&self) -> MoveList {
        let res = self.pos.legal_moves();
        trace!("{} legal moves for {}", res.len(), self.side().name());
        res
    }

    /// Returns the legal moves of the piece on `src`
    ///
    /// Returns an empty list if `src` is empty or holds a piece of the side not to move.
    pub fn legal_moves_from(&self, src: Coord) -> MoveList {
        self.pos.legal_moves_from(src)
    }

    /// Returns the destination squares of the legal moves from `src`
    pub fn legal_dests_from(&self, src: Coord) -> Bitboard {
        self.legal_moves_from(src)
            .iter()
            .map(|mv| mv.dst())
            .collect()
    }

    /// Finds the legal move from `src` to `dst`
    ///
    /// See [`Position::find_move()`] for details.
    #[inline]
    pub fn find_move(
        &self,
        src: Coord,
        dst: Coord,
        promote: Option<PromotePiece>,
    ) -> Option<Move> {
        self.pos.find_move(src, dst, promote)
    }

    /// Applies the move for the side to move and returns the new outcome
    ///
    /// Fails with [`IllegalMove`] if the move is not legal in the current position. In this
    /// case, the game is left unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<Outcome, IllegalMove> {
        let pos = match self.pos.make_move(mv) {
            Ok(pos) => pos,
            Err(e) => {
                debug!("rejected {} for {}", mv, self.side().name());
                return Err(e);
            }
        };
        debug!("{} plays {}", self.side().name(), mv);

        self.pos = pos;
        self.ply += 1;
        self.outcome = self.pos.calc_outcome();

        #[cfg(feature = "selftest")]
        self.selftest();

        if self.outcome.is_terminal() {
            info!("game over after {} plies: {}", self.ply, self.outcome);
        }
        Ok(self.outcome)
    }

    #[cfg(feature = "selftest")]
    fn selftest(&self) {
        if let Err(e) = self.pos.board().validate() {
            panic!("invalid board after {} plies: {}", self.ply, e);
        }
        assert!(
            !crate::attack::is_check(self.pos.board(), self.side().inv()),
            "side which has just moved is in check"
        );
        assert_eq!(self.outcome, self.pos.calc_outcome());
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Game {
        Game::initial()
    }
}
