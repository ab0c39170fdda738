//! Castling rights.

use chess_core::{Color, Move, Piece, Square};

/// The four independent castling rights.
///
/// This is a `Copy` value: every history entry holds its own copy, so
/// changing the live rights can never rewrite an earlier snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    /// Builds rights from a FEN castling field ("KQkq", "Kq", "-", ...).
    pub fn from_fen_field(field: &str) -> Self {
        CastlingRights {
            white_kingside: field.contains('K'),
            white_queenside: field.contains('Q'),
            black_kingside: field.contains('k'),
            black_queenside: field.contains('q'),
        }
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Removes castling rights for a color.
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    pub fn remove_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    /// Removes queenside castling for a color.
    pub fn remove_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }

    /// Applies the rights lost by a move that was just made.
    ///
    /// Only three things revoke rights: the king moving, a rook leaving its
    /// home corner, and a rook being captured on its home corner.
    pub fn update(&mut self, m: &Move) {
        let mover = m.piece_moved();
        if mover.is(Piece::King) {
            self.remove_color(mover.color);
        } else if mover.is(Piece::Rook) {
            self.remove_corner(mover.color, m.from());
        }

        if let Some(captured) = m.piece_captured() {
            if captured.is(Piece::Rook) {
                self.remove_corner(captured.color, m.to());
            }
        }
    }

    fn remove_corner(&mut self, color: Color, sq: Square) {
        if sq.row() != color.back_row() {
            return;
        }
        match sq.col() {
            0 => self.remove_queenside(color),
            7 => self.remove_kingside(color),
            _ => {}
        }
    }

    /// Returns true if no right remains.
    #[inline]
    pub const fn is_empty(self) -> bool {
        !(self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside)
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}
