//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Every node goes through [`GameState::make_move`] and
//! [`GameState::undo_move`], so the counts exercise those as well.
//!
//! Promotions always produce a queen, so published counts only match at
//! depths where no promotion occurs.

use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
///
/// Every move made is undone, so the game ends where it started.
pub fn perft(game: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.valid_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        game.make_move(m);
        nodes += perft(game, depth - 1);
        game.undo_move();
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = game.valid_moves();
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        game.make_move(m);
        let nodes = if depth > 1 {
            perft(game, depth - 1)
        } else {
            1
        };
        game.undo_move();
        results.push((m.notation(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
