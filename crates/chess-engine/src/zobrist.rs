//! Zobrist keys for position identity.
//!
//! A position key XORs one random number per (piece, color, square), one for
//! Black to move, one per castling right held and one per en passant file.
//! The en passant file only counts when a pawn of the side to move stands
//! ready to capture; otherwise the position is the same as without a target.
//! Keys feed the repetition check in [`crate::draw`].

use crate::movegen::pawn_attacks;
use crate::CastlingRights;
use chess_core::{Board, Color, ColoredPiece, Piece, Square};

/// Zobrist hash keys, generated from a fixed seed.
pub struct ZobristKeys {
    /// Keys for pieces: [piece][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    /// White kingside, white queenside, black kingside, black queenside.
    castling: [u64; 4],
    en_passant: [u64; 8],
}

// xorshift64
const fn next_random(state: u64) -> u64 {
    let mut x = state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

impl ZobristKeys {
    const fn new() -> Self {
        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut i = 0;
        while i < 6 * 2 * 64 {
            state = next_random(state);
            pieces[i / 128][(i / 64) % 2][i % 64] = state;
            i += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    /// Computes the key of a full position from scratch.
    pub fn position_key(
        &self,
        board: &Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> u64 {
        let mut key = 0u64;
        for (sq, piece) in board.pieces() {
            key ^= self.pieces[piece.piece.index()][piece.color.index()][sq.index()];
        }
        if side_to_move == Color::Black {
            key ^= self.black_to_move;
        }
        let rights = [
            castling.white_kingside,
            castling.white_queenside,
            castling.black_kingside,
            castling.black_queenside,
        ];
        for (held, k) in rights.into_iter().zip(self.castling) {
            if held {
                key ^= k;
            }
        }
        if let Some(sq) = en_passant.filter(|&sq| can_capture_en_passant(board, side_to_move, sq)) {
            key ^= self.en_passant[sq.col() as usize];
        }
        key
    }
}

/// Returns true if a pawn of `side` attacks the en passant `target`.
///
/// Pins are ignored, so a pinned capturer still counts.
fn can_capture_en_passant(board: &Board, side: Color, target: Square) -> bool {
    let pawn = ColoredPiece::new(side, Piece::Pawn);
    // Squares a `side` pawn must stand on to attack `target`.
    pawn_attacks(target, side.opposite()).any(|from| board.get(from) == Some(pawn))
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
