//! The 8×8 board grid.

use crate::{Color, ColoredPiece, Piece, Square};
use std::fmt;

/// Code rendered for an empty cell.
pub const EMPTY_CODE: &str = "--";

const BACK_ROW: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// An 8×8 grid of piece-or-empty cells.
///
/// Pure data: addressing only, no rules.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<ColoredPiece>; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, piece) in BACK_ROW.into_iter().enumerate() {
                board.cells[color.back_row() as usize][col] = Some(ColoredPiece::new(color, piece));
                board.cells[color.pawn_row() as usize][col] =
                    Some(ColoredPiece::new(color, Piece::Pawn));
            }
        }
        board
    }

    /// Returns the content of a cell.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<ColoredPiece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Overwrites a cell.
    #[inline]
    pub fn set(&mut self, sq: Square, cell: Option<ColoredPiece>) {
        self.cells[sq.row() as usize][sq.col() as usize] = cell;
    }

    /// Empties a cell, returning what was there.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<ColoredPiece> {
        self.cells[sq.row() as usize][sq.col() as usize].take()
    }

    /// Returns true if the cell holds no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Returns the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color)
    }

    /// Two-character code of a cell (`"wp"`, `"bK"`, or `"--"`).
    ///
    /// Out-of-range coordinates read as empty.
    pub fn cell_code(&self, row: u8, col: u8) -> String {
        match Square::new(row, col).and_then(|sq| self.get(sq)) {
            Some(piece) => piece.code(),
            None => EMPTY_CODE.to_string(),
        }
    }

    /// Iterates over occupied squares in row-major order (a8 first).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Finds the squares holding a king of the given color.
    pub fn kings(&self, color: Color) -> Vec<Square> {
        let king = ColoredPiece::new(color, Piece::King);
        self.pieces()
            .filter(|&(_, p)| p == king)
            .map(|(sq, _)| sq)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cell_code(row, col))?;
            }
            writeln!(f)?;
        }
        write!(f, "   a  b  c  d  e  f  g  h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}
