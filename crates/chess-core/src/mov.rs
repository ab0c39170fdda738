//! Move representation.

use crate::{Board, Color, ColoredPiece, Piece, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single ply: origin, destination, the piece moved and the piece captured,
/// plus the special-move flags.
///
/// Moves are immutable once built. Equality and hashing only look at the
/// geometry ([`Move::id`]), so a move built from two clicked squares compares
/// equal to the engine's fully-flagged move with the same origin and target.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    moved: ColoredPiece,
    captured: Option<ColoredPiece>,
    en_passant: bool,
    castle: bool,
    promotion: bool,
}

impl Move {
    /// Creates an ordinary move. Promotion is derived from the moved piece
    /// and the destination row.
    pub fn new(
        from: Square,
        to: Square,
        moved: ColoredPiece,
        captured: Option<ColoredPiece>,
    ) -> Self {
        let promotion = moved.is(Piece::Pawn) && to.row() == moved.color.promotion_row();
        Move {
            from,
            to,
            moved,
            captured,
            en_passant: false,
            castle: false,
            promotion,
        }
    }

    /// Creates a move by reading the moved and captured pieces off `board`.
    ///
    /// Returns `None` if the origin square is empty.
    pub fn from_board(from: Square, to: Square, board: &Board) -> Option<Self> {
        let moved = board.get(from)?;
        Some(Self::new(from, to, moved, board.get(to)))
    }

    /// Creates an en passant capture. The captured piece is the opposing pawn,
    /// which sits beside the origin rather than on the destination.
    pub fn en_passant(from: Square, to: Square, moved: ColoredPiece) -> Self {
        let victim = ColoredPiece::new(moved.color.opposite(), Piece::Pawn);
        Move {
            en_passant: true,
            ..Self::new(from, to, moved, Some(victim))
        }
    }

    /// Creates a castling move, described by the king's origin and destination.
    pub fn castle(from: Square, to: Square, king: ColoredPiece) -> Self {
        Move {
            castle: true,
            ..Self::new(from, to, king, None)
        }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub const fn piece_moved(&self) -> ColoredPiece {
        self.moved
    }

    #[inline]
    pub const fn piece_captured(&self) -> Option<ColoredPiece> {
        self.captured
    }

    /// Color of the side making the move.
    #[inline]
    pub const fn color(&self) -> Color {
        self.moved.color
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.castle
    }

    #[inline]
    pub const fn is_pawn_promotion(&self) -> bool {
        self.promotion
    }

    /// Returns true for a castle towards the h-file.
    #[inline]
    pub const fn is_kingside_castle(&self) -> bool {
        self.castle && self.to.col() > self.from.col()
    }

    /// Square of the pawn removed by an en passant capture: the destination
    /// column on the origin row.
    #[inline]
    pub fn en_passant_victim(&self) -> Option<Square> {
        if self.en_passant {
            Square::new(self.from.row(), self.to.col())
        } else {
            None
        }
    }

    /// Rook origin and destination for a castling move.
    ///
    /// Kingside: file h to file f. Queenside: file a to file d.
    pub fn castle_rook_squares(&self) -> Option<(Square, Square)> {
        if !self.castle {
            return None;
        }
        let row = self.from.row();
        if self.is_kingside_castle() {
            Some((Square::new(row, 7)?, Square::new(row, 5)?))
        } else {
            Some((Square::new(row, 0)?, Square::new(row, 3)?))
        }
    }

    /// Geometric identity: origin row/col and destination row/col packed into
    /// one ordinal.
    #[inline]
    pub const fn id(&self) -> u16 {
        self.from.row() as u16 * 1000
            + self.from.col() as u16 * 100
            + self.to.row() as u16 * 10
            + self.to.col() as u16
    }

    /// Origin and destination in file+rank form, e.g. `"e2e4"`.
    pub fn notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses `"e2e4"`-style notation into an origin/destination pair.
    pub fn parse_squares(s: &str) -> Option<(Square, Square)> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        Some((
            Square::from_algebraic(&s[0..2])?,
            Square::from_algebraic(&s[2..4])?,
        ))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.notation())
    }
}

/// Short move-log text: `0-0`, `0-0-0`, `e4`, `exd5`, `Nf3`, `Nxf3`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.castle {
            return f.write_str(if self.is_kingside_castle() { "0-0" } else { "0-0-0" });
        }
        let capture = if self.is_capture() { "x" } else { "" };
        if self.moved.is(Piece::Pawn) {
            if self.is_capture() {
                write!(f, "{}x{}", self.from.file_char(), self.to)
            } else {
                write!(f, "{}", self.to)
            }
        } else {
            write!(f, "{}{}{}", self.moved.piece.code(), capture, self.to)
        }
    }
}
