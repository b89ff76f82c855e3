//! Chess rules engine
//!
//! The crate knows how the pieces move, when a king is in check, and when the game is over
//! by checkmate or stalemate. It does not draw anything and does not choose moves: a front
//! end asks [`Game`] for the legal moves, picks one and applies it.
//!
//! En passant and draws by repetition or by the fifty-move rule are not implemented.
//!
//! # Features
//!
//! - `selftest`: after every [`Game::apply_move`], re-validate the resulting position and
//!   panic on any inconsistency. Useful for fuzzing and random playouts. Run the test suite
//!   with it as `cargo test --features selftest`.
//!
//! # Example
//!
//! ```
//! # use rookery::{Coord, Game, Outcome};
//! #
//! let mut game = Game::initial();
//! let e2: Coord = "e2".parse().unwrap();
//! let e4: Coord = "e4".parse().unwrap();
//!
//! assert_eq!(game.legal_moves().len(), 20);
//! assert!(game.legal_dests_from(e2).has(e4));
//!
//! let mv = game.find_move(e2, e4, None).unwrap();
//! assert_eq!(game.apply_move(mv), Ok(Outcome::InProgress));
//! assert_eq!(
//!     game.position().as_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
//! );
//! ```

pub mod attack;
pub mod board;
pub mod castling;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod position;

pub use rookery_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::Board;
pub use game::{Game, IllegalMove};
pub use movegen::MoveList;
pub use moves::{Move, MoveKind, PromotePiece};
pub use position::Position;
pub use types::{CastlingRights, CastlingSide, Cell, Color, Coord, File, Outcome, Piece, Rank};
