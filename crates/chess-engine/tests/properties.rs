//! Property tests over random legal playouts.

use chess_core::{Board, Color, Move, Square};
use chess_engine::{square_under_attack, CastlingRights, GameState};
use proptest::prelude::*;

/// Plays one legal move per choice (index taken modulo the move count),
/// stopping early at a terminal position.
fn playout(choices: &[u16]) -> GameState {
    let mut game = GameState::new();
    for &choice in choices {
        let moves = game.valid_moves();
        if moves.is_empty() {
            break;
        }
        game.make_move(moves[choice as usize % moves.len()]);
    }
    game
}

#[derive(Debug, Clone, PartialEq)]
struct Observed {
    board: Board,
    side_to_move: Color,
    white_king: Square,
    black_king: Square,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    position_key: u64,
    checkmate: bool,
    stalemate: bool,
    log_len: usize,
}

fn observe(game: &GameState) -> Observed {
    Observed {
        board: game.board().clone(),
        side_to_move: game.side_to_move(),
        white_king: game.king_square(Color::White),
        black_king: game.king_square(Color::Black),
        castling_rights: game.castling_rights(),
        en_passant: game.en_passant_target(),
        halfmove_clock: game.halfmove_clock(),
        position_key: game.position_key(),
        checkmate: game.in_checkmate(),
        stalemate: game.in_stalemate(),
        log_len: game.move_log().len(),
    }
}

fn rights_subset(later: CastlingRights, earlier: CastlingRights) -> bool {
    (!later.white_kingside || earlier.white_kingside)
        && (!later.white_queenside || earlier.white_queenside)
        && (!later.black_kingside || earlier.black_kingside)
        && (!later.black_queenside || earlier.black_queenside)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn make_then_undo_restores_everything(choices in prop::collection::vec(any::<u16>(), 0..40)) {
        let mut game = playout(&choices);
        let moves = game.valid_moves();
        let before = observe(&game);
        for m in moves {
            game.make_move(m);
            let undone = game.undo_move();
            prop_assert_eq!(undone, Some(m));
            prop_assert_eq!(observe(&game), before.clone());
        }
    }

    #[test]
    fn legal_moves_never_expose_own_king(choices in prop::collection::vec(any::<u16>(), 0..40)) {
        let mut game = playout(&choices);
        let mover = game.side_to_move();
        for m in game.valid_moves() {
            game.make_move(m);
            let king = game.king_square(mover);
            prop_assert!(
                !square_under_attack(game.board(), king, mover.opposite()),
                "{} leaves the {} king on {} attacked",
                m.notation(),
                mover,
                king
            );
            game.undo_move();
        }
    }

    #[test]
    fn terminal_flags_are_exclusive(choices in prop::collection::vec(any::<u16>(), 0..80)) {
        let mut game = playout(&choices);
        let moves = game.valid_moves();
        prop_assert!(!(game.in_checkmate() && game.in_stalemate()));
        prop_assert_eq!(moves.is_empty(), game.in_checkmate() || game.in_stalemate());
        prop_assert_eq!(game.in_checkmate(), moves.is_empty() && game.in_check());
    }

    #[test]
    fn castling_rights_only_shrink(choices in prop::collection::vec(any::<u16>(), 0..80)) {
        let game = playout(&choices);
        let log: Vec<CastlingRights> = game.castling_rights_log().collect();
        prop_assert_eq!(log.len(), game.move_log().len() + 1);
        for pair in log.windows(2) {
            prop_assert!(rights_subset(pair[1], pair[0]));
        }
    }

    #[test]
    fn undoing_everything_returns_to_start(choices in prop::collection::vec(any::<u16>(), 0..40)) {
        let mut game = playout(&choices);
        let fresh = GameState::new();
        while game.undo_move().is_some() {
            prop_assert_eq!(game.en_passant_log().len(), game.move_log().len() + 1);
        }
        prop_assert_eq!(observe(&game), observe(&fresh));
        prop_assert_eq!(game.undo_move(), None::<Move>);
    }
}
