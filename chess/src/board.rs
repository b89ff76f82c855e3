//! Board and related things

use crate::bitboard::Bitboard;
use crate::types::{Cell, Color, Coord, File, Piece, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on the 1th or on the 8th rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Coord),
    /// The king of the side which has just moved is under attack
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
}

/// Error parsing the first part of FEN (i.e. the positions of pieces on the board)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess board
///
/// The board is a plain 8×8 grid of [`Cell`]s and knows nothing about whose turn it is or
/// which castlings are still available; see [`Position`](crate::position::Position) for that.
///
/// Accessors do not validate anything beyond what [`Coord`] already guarantees: every `Coord`
/// is a square on the board.
///
/// # Example
///
/// ```
/// # use rookery::{Board, Cell, Color, File, Piece, Rank};
/// #
/// let mut b = Board::empty();
/// b.put2(File::B, Rank::R2, Cell::from_parts(Color::White, Piece::King));
/// b.put2(File::D, Rank::R5, Cell::from_parts(Color::Black, Piece::King));
///
/// assert!(b.validate().is_ok());
/// assert_eq!(b.to_string(), "8/8/8/3k4/8/8/1K6/8");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; 64],
}

impl Board {
    /// Returns an empty board
    ///
    /// Does the same as [`Board::default()`], except that this function is `const`.
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Parses the piece placement field of FEN
    ///
    /// Does the same as [`Board::from_str`].
    #[inline]
    pub fn from_fen_cells(s: &str) -> Result<Board, CellsParseError> {
        Board::from_str(s)
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Returns the color and the kind of the piece on `c`, or `None` if the square is empty
    #[inline]
    pub fn piece_at(&self, c: Coord) -> Option<(Color, Piece)> {
        self.get(c).parts()
    }

    /// Puts `cell` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Places a piece of color `color` and kind `piece` on `c`, replacing whatever was there
    #[inline]
    pub fn place(&mut self, c: Coord, color: Color, piece: Piece) {
        self.put(c, Cell::from_parts(color, piece));
    }

    /// Clears the square `c` and returns its previous contents
    #[inline]
    pub fn remove(&mut self, c: Coord) -> Cell {
        let cell = self.get(c);
        self.put(c, Cell::EMPTY);
        cell
    }

    #[inline]
    pub fn is_empty(&self, c: Coord) -> bool {
        self.get(c).is_free()
    }

    #[inline]
    pub fn is_occupied_by(&self, c: Coord, color: Color) -> bool {
        self.get(c).color() == Some(color)
    }

    /// Returns all the occupied squares
    pub fn occupied(&self) -> Bitboard {
        self.squares(|cell| cell.is_occupied())
    }

    /// Returns all the squares occupied by pieces of color `c`
    pub fn color(&self, c: Color) -> Bitboard {
        self.squares(|cell| cell.color() == Some(c))
    }

    /// Returns all the squares containing `cell`
    ///
    /// **Note**: when `cell` is an empty cell, the function just returns an empty bitboard,
    /// not the bitboard over all the empty cells.
    pub fn piece(&self, cell: Cell) -> Bitboard {
        if cell.is_free() {
            return Bitboard::EMPTY;
        }
        self.squares(|c| c == cell)
    }

    /// Returns all the squares containing pieces of color `c` and kind `p`
    #[inline]
    pub fn piece2(&self, c: Color, p: Piece) -> Bitboard {
        self.piece(Cell::from_parts(c, p))
    }

    fn squares(&self, pred: impl Fn(Cell) -> bool) -> Bitboard {
        Coord::iter().filter(|&c| pred(self.get(c))).collect()
    }

    /// Returns the position of the king of color `c`
    ///
    /// # Panics
    ///
    /// Panics if there is no such king. Boards used for play always have one king per color,
    /// see [`Board::validate()`].
    pub fn king_pos(&self, c: Color) -> Coord {
        let king = Cell::from_parts(c, Piece::King);
        match Coord::iter().find(|&p| self.get(p) == king) {
            Some(p) => p,
            None => panic!("no king of color {:?} on the board", c),
        }
    }

    /// Verifies that the board can be used for play
    ///
    /// Each side must have exactly one king, and no pawns may stand on the first or the last
    /// rank.
    pub fn validate(&self) -> Result<(), ValidateError> {
        for color in [Color::White, Color::Black] {
            match self.piece2(color, Piece::King).len() {
                0 => return Err(ValidateError::NoKing(color)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(color)),
            }
        }

        let pawns = self.piece2(Color::White, Piece::Pawn) | self.piece2(Color::Black, Piece::Pawn);
        const BAD_PAWN_POSES: Bitboard = Bitboard::from_raw(0xff000000000000ff);
        if let Some(p) = (pawns & BAD_PAWN_POSES).first() {
            return Err(ValidateError::InvalidPawn(p));
        }

        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use rookery::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty {
            board: self,
            side: None,
            style,
        }
    }

    #[inline]
    pub(crate) fn pretty_with_side(&self, side: Color, style: PrettyStyle) -> Pretty<'_> {
        Pretty {
            board: self,
            side: Some(side),
            style,
        }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    side: Option<Color>,
    style: PrettyStyle,
}

impl FromStr for Board {
    type Err = CellsParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = CellsParseError;

        let mut file = 0_usize;
        let mut rank = 0_usize;
        let mut pos = 0_usize;
        let mut cells = [Cell::EMPTY; 64];
        for b in s.bytes() {
            match b {
                b'1'..=b'8' => {
                    let add = (b - b'0') as usize;
                    if file + add > 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    file += add;
                    pos += add;
                }
                b'/' => {
                    if file < 8 {
                        return Err(Error::RankUnderflow(Rank::from_index(rank)));
                    }
                    rank += 1;
                    file = 0;
                    if rank >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    cells[pos] =
                        Cell::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                    file += 1;
                    pos += 1;
                }
            };
        }

        if file < 8 {
            return Err(Error::RankUnderflow(Rank::from_index(rank)));
        }
        if rank < 7 {
            return Err(Error::Underflow);
        }

        Ok(Board { cells })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let cell = self.get2(file, rank);
                if cell.is_free() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn cell(c: Cell) -> char;

    fn indicator(c: Option<Color>) -> char {
        match c {
            Some(Color::White) => Self::WHITE_INDICATOR,
            Some(Color::Black) => Self::BLACK_INDICATOR,
            None => ' ',
        }
    }

    fn fmt(b: &Board, side: Option<Color>, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, self.side, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, self.side, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI_CELLS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(b.to_string(), INI_CELLS);
        assert_eq!(Board::from_fen_cells(INI_CELLS), Ok(b));
        assert_eq!(b.validate(), Ok(()));

        let back = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for coord in Coord::iter() {
            let file = coord.file().index();
            let expected = match coord.rank() {
                Rank::R1 => Some((Color::White, back[file])),
                Rank::R2 => Some((Color::White, Piece::Pawn)),
                Rank::R7 => Some((Color::Black, Piece::Pawn)),
                Rank::R8 => Some((Color::Black, back[file])),
                _ => None,
            };
            assert_eq!(b.piece_at(coord), expected, "mismatch on {}", coord);
        }
    }

    #[test]
    fn test_accessors() {
        let mut b = Board::initial();
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let e4 = Coord::from_parts(File::E, Rank::R4);

        assert!(b.is_occupied_by(e2, Color::White));
        assert!(!b.is_occupied_by(e2, Color::Black));
        assert!(b.is_empty(e4));

        let cell = b.remove(e2);
        assert_eq!(cell, Cell::from_parts(Color::White, Piece::Pawn));
        assert!(b.is_empty(e2));
        b.place(e4, Color::White, Piece::Pawn);
        assert_eq!(b.piece_at(e4), Some((Color::White, Piece::Pawn)));
        assert_eq!(b.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");

        assert_eq!(b.occupied().len(), 32);
        assert_eq!(b.color(Color::White).len(), 16);
        assert_eq!(b.piece2(Color::Black, Piece::Pawn).len(), 8);
        assert_eq!(b.piece(Cell::EMPTY), Bitboard::EMPTY);
        assert_eq!(
            b.king_pos(Color::Black),
            Coord::from_parts(File::E, Rank::R8)
        );
    }

    #[test]
    fn test_validate() {
        let b = Board::from_fen_cells("8/8/8/3k4/8/8/1K6/8").unwrap();
        assert_eq!(b.validate(), Ok(()));

        let b = Board::from_fen_cells("8/8/8/3k4/8/8/8/8").unwrap();
        assert_eq!(b.validate(), Err(ValidateError::NoKing(Color::White)));

        let b = Board::from_fen_cells("8/8/8/3k4/8/8/1K6/7K").unwrap();
        assert_eq!(b.validate(), Err(ValidateError::TooManyKings(Color::White)));

        let b = Board::from_fen_cells("P7/8/8/3k4/8/8/1K6/8").unwrap();
        assert_eq!(
            b.validate(),
            Err(ValidateError::InvalidPawn(Coord::from_parts(
                File::A,
                Rank::R8
            )))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Board::from_fen_cells("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(CellsParseError::UnexpectedChar('9'))
        );
        assert_eq!(
            Board::from_fen_cells("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(CellsParseError::RankOverflow(Rank::R7))
        );
        assert_eq!(
            Board::from_fen_cells("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(CellsParseError::RankUnderflow(Rank::R7))
        );
        assert_eq!(
            Board::from_fen_cells("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"),
            Err(CellsParseError::Underflow)
        );
        assert_eq!(
            Board::from_fen_cells("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8"),
            Err(CellsParseError::Overflow)
        );
        assert_eq!(
            Board::from_fen_cells("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNx"),
            Err(CellsParseError::UnexpectedChar('x'))
        );
    }

    #[test]
    fn test_pretty() {
        let b = Board::from_fen_cells("8/8/8/3k4/8/8/1K6/8").unwrap();
        let res = r#"
8│........
7│........
6│........
5│...♚....
4│........
3│........
2│.♔......
1│........
─┼────────
●│abcdefgh
"#;
        assert_eq!(
            b.pretty_with_side(Color::Black, PrettyStyle::Utf8)
                .to_string()
                .trim(),
            res.trim()
        );
    }
}
