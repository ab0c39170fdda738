//! Attacked-square detection.
//!
//! A square is attacked when some pseudo-legal move of the attacking side
//! lands on it. Pawns are the exception: they attack their two forward
//! diagonals whether or not anything stands there, and never attack with a
//! push. This only composes with the generators; nothing in the generators
//! calls back in here.

use super::piece_moves;
use chess_core::{Board, Color, Piece, Square};

/// The (up to two) squares a pawn of `color` on `from` attacks.
pub fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let dir = color.pawn_direction();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(dir, d_col))
}

/// Returns true if any piece of color `by` attacks `sq`.
pub fn square_under_attack(board: &Board, sq: Square, by: Color) -> bool {
    let mut moves = Vec::with_capacity(28);
    board
        .pieces()
        .filter(|(_, piece)| piece.color == by)
        .any(|(from, piece)| {
            if piece.is(Piece::Pawn) {
                return pawn_attacks(from, by).any(|target| target == sq);
            }
            moves.clear();
            piece_moves(board, from, piece, None, &mut moves);
            moves.iter().any(|m| m.to() == sq)
        })
}
