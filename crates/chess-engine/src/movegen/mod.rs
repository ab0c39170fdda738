//! Pseudo-legal move generation.
//!
//! Generators here follow piece movement rules and board occupancy only. They
//! do not care whether the mover's own king is left in check; filtering that
//! out is [`GameState::valid_moves`](crate::GameState::valid_moves)'s job.
//! Castling is generated separately by [`castling_moves`].

mod attacks;
pub mod perft;

use crate::CastlingRights;
use chess_core::{Board, Color, ColoredPiece, Move, Piece, Square};

pub use attacks::{pawn_attacks, square_under_attack};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Generates every pseudo-legal move for `side`, castling excluded.
///
/// Squares are scanned row by row from a8, so the order is stable for a
/// given board.
pub fn pseudo_legal_moves(board: &Board, side: Color, en_passant: Option<Square>) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for (from, piece) in board.pieces() {
        if piece.color == side {
            piece_moves(board, from, piece, en_passant, &mut moves);
        }
    }
    moves
}

/// Appends the pseudo-legal moves of the piece standing on `from`.
pub fn piece_moves(
    board: &Board,
    from: Square,
    piece: ColoredPiece,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    match piece.piece {
        Piece::Pawn => pawn_moves(board, from, piece, en_passant, moves),
        Piece::Knight => step_moves(board, from, piece, &KNIGHT_OFFSETS, moves),
        Piece::Bishop => slider_moves(board, from, piece, &BISHOP_DIRECTIONS, moves),
        Piece::Rook => slider_moves(board, from, piece, &ROOK_DIRECTIONS, moves),
        Piece::Queen => {
            slider_moves(board, from, piece, &ROOK_DIRECTIONS, moves);
            slider_moves(board, from, piece, &BISHOP_DIRECTIONS, moves);
        }
        Piece::King => step_moves(board, from, piece, &KING_OFFSETS, moves),
    }
}

/// Pawn pushes, double pushes from the start row, and diagonal captures
/// (including en passant onto the target square).
fn pawn_moves(
    board: &Board,
    from: Square,
    pawn: ColoredPiece,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let us = pawn.color;
    let dir = us.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
        moves.push(Move::new(from, one, pawn, None));
        if from.row() == us.pawn_row() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
                moves.push(Move::new(from, two, pawn, None));
            }
        }
    }

    for to in pawn_attacks(from, us) {
        match board.get(to) {
            Some(target) if target.color != us => moves.push(Move::new(from, to, pawn, Some(target))),
            None if en_passant == Some(to) => moves.push(Move::en_passant(from, to, pawn)),
            _ => {}
        }
    }
}

/// Single-step movers (knight, king): each offset is checked on its own.
fn step_moves(
    board: &Board,
    from: Square,
    piece: ColoredPiece,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        let target = board.get(to);
        if target.map_or(true, |t| t.color != piece.color) {
            moves.push(Move::new(from, to, piece, target));
        }
    }
}

/// Ray casting for rooks, bishops and queens. A ray stops at the first
/// occupied square, which is included only when it holds an enemy piece.
fn slider_moves(
    board: &Board,
    from: Square,
    piece: ColoredPiece,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(d_row, d_col) {
            match board.get(to) {
                None => moves.push(Move::new(from, to, piece, None)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::new(from, to, piece, Some(target)));
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}

/// Appends the castling moves available to `side` with its king on `king`.
///
/// A castle is offered when the right is held, the king stands on its home
/// square with the rook in its corner, the king is not in check, the squares
/// between king and rook are empty, and neither the square the king crosses
/// nor the one it lands on is attacked.
///
/// Rights are not trusted to match the board: a FEN may claim a right for a
/// king that has left e1/e8, and no castle is offered then.
pub fn castling_moves(
    board: &Board,
    side: Color,
    king: Square,
    rights: CastlingRights,
    moves: &mut Vec<Move>,
) {
    if Square::new(side.back_row(), 4) != Some(king) {
        return;
    }
    let Some(king_piece) = board.get(king).filter(|p| *p == ColoredPiece::new(side, Piece::King))
    else {
        return;
    };
    let them = side.opposite();
    if square_under_attack(board, king, them) {
        return;
    }

    let rook = ColoredPiece::new(side, Piece::Rook);
    let row = king.row();
    let rank_square = |col: u8| Square::new(row, col);

    if rights.kingside(side) {
        if let (Some(f), Some(g), Some(h)) = (rank_square(5), rank_square(6), rank_square(7)) {
            if board.get(h) == Some(rook)
                && board.is_empty(f)
                && board.is_empty(g)
                && !square_under_attack(board, f, them)
                && !square_under_attack(board, g, them)
            {
                moves.push(Move::castle(king, g, king_piece));
            }
        }
    }

    if rights.queenside(side) {
        if let (Some(a), Some(b), Some(c), Some(d)) =
            (rank_square(0), rank_square(1), rank_square(2), rank_square(3))
        {
            if board.get(a) == Some(rook)
                && board.is_empty(b)
                && board.is_empty(c)
                && board.is_empty(d)
                && !square_under_attack(board, d, them)
                && !square_under_attack(board, c, them)
            {
                moves.push(Move::castle(king, c, king_piece));
            }
        }
    }
}
