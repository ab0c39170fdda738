//! Mutable game state with exact make/undo.
//!
//! [`GameState`] owns the board and everything needed to take a move back:
//! the move log plus one [`PlySnapshot`] per ply. The snapshot history always
//! holds exactly one more entry than the move log (the first entry is the
//! state before any move), which is what lets [`GameState::undo_move`]
//! restore castling rights and the en passant target without recomputing them.

use crate::config::EngineConfig;
use crate::draw::DrawReason;
use crate::movegen::{castling_moves, pseudo_legal_moves, square_under_attack};
use crate::zobrist::ZOBRIST;
use crate::CastlingRights;
use chess_core::{Board, Color, ColoredPiece, FenError, FenParser, Move, Piece, Square};
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for checked move input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The text is not a `"e2e4"`-style origin/destination pair.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
}

/// Where the game stands, as of the last [`GameState::valid_moves`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

/// Irreversible state recorded after each ply.
///
/// Entries are plain values; pushing one copies the live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlySnapshot {
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub key: u64,
}

/// Authoritative board state and move legality.
///
/// Single-owner and synchronous: every call runs to completion. To hand a
/// position to another thread, clone it.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    white_king: Square,
    black_king: Square,
    move_log: Vec<Move>,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    history: Vec<PlySnapshot>,
    checkmate: bool,
    stalemate: bool,
    draw: Option<DrawReason>,
    config: EngineConfig,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        Self::from_parts(
            Board::standard(),
            Color::White,
            Square::E1,
            Square::E8,
            CastlingRights::ALL,
            None,
            0,
        )
    }

    /// Creates a game from a FEN string.
    ///
    /// # Errors
    ///
    /// Any [`FenError`] from parsing, or [`FenError::KingCount`] if either
    /// side does not have exactly one king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let white_king = parsed.king_square(Color::White)?;
        let black_king = parsed.king_square(Color::Black)?;
        Ok(Self::from_parts(
            parsed.board,
            parsed.side_to_move,
            white_king,
            black_king,
            CastlingRights::from_fen_field(&parsed.castling),
            parsed.en_passant,
            parsed.halfmove_clock,
        ))
    }

    fn from_parts(
        board: Board,
        side_to_move: Color,
        white_king: Square,
        black_king: Square,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
    ) -> Self {
        let key = ZOBRIST.position_key(&board, side_to_move, castling_rights, en_passant);
        GameState {
            board,
            side_to_move,
            white_king,
            black_king,
            move_log: Vec::new(),
            castling_rights,
            en_passant,
            halfmove_clock,
            history: vec![PlySnapshot {
                castling_rights,
                en_passant,
                halfmove_clock,
                key,
            }],
            checkmate: false,
            stalemate: false,
            draw: None,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    /// Cached king location for `color`.
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Moves played so far, oldest first.
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Castling rights before any move and after each ply.
    pub fn castling_rights_log(&self) -> impl ExactSizeIterator<Item = CastlingRights> + '_ {
        self.history.iter().map(|s| s.castling_rights)
    }

    /// Square a pawn may capture onto en passant this ply, if any.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// En passant targets before any move and after each ply.
    pub fn en_passant_log(&self) -> impl ExactSizeIterator<Item = Option<Square>> + '_ {
        self.history.iter().map(|s| s.en_passant)
    }

    /// Per-ply snapshots, oldest first; always one longer than the move log.
    pub fn history(&self) -> &[PlySnapshot] {
        &self.history
    }

    /// Plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Zobrist key of the current position.
    pub fn position_key(&self) -> u64 {
        self.history.last().map_or(0, |s| s.key)
    }

    pub fn in_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn in_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Draw detected by the last [`valid_moves`](Self::valid_moves) call,
    /// if draw rules are enabled.
    pub fn draw(&self) -> Option<DrawReason> {
        self.draw
    }

    /// Terminal state as of the last [`valid_moves`](Self::valid_moves) call.
    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate {
                winner: self.side_to_move.opposite(),
            }
        } else if self.stalemate {
            GameStatus::Stalemate
        } else if let Some(reason) = self.draw {
            GameStatus::Draw(reason)
        } else {
            GameStatus::InProgress
        }
    }

    /// Applies a move without checking it.
    ///
    /// The move is expected to come from [`valid_moves`](Self::valid_moves).
    /// Anything else is written to the board as-is, which can leave the
    /// board, king squares and castling rights inconsistent.
    pub fn make_move(&mut self, m: Move) {
        let mover = m.piece_moved();
        let us = mover.color;

        self.board.take(m.from());
        self.board.set(m.to(), Some(mover));
        self.move_log.push(m);
        self.side_to_move = self.side_to_move.opposite();

        if mover.is(Piece::King) {
            self.set_king_square(us, m.to());
        }

        if m.is_pawn_promotion() {
            self.board
                .set(m.to(), Some(ColoredPiece::new(us, Piece::Queen)));
        }

        if let Some(victim) = m.en_passant_victim() {
            self.board.take(victim);
        }

        self.en_passant = if mover.is(Piece::Pawn) && m.from().row().abs_diff(m.to().row()) == 2 {
            Square::new((m.from().row() + m.to().row()) / 2, m.to().col())
        } else {
            None
        };

        if let Some((rook_from, rook_to)) = m.castle_rook_squares() {
            let rook = self.board.take(rook_from);
            self.board.set(rook_to, rook);
        }

        self.castling_rights.update(&m);

        self.halfmove_clock = if mover.is(Piece::Pawn) || m.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };

        let key = ZOBRIST.position_key(
            &self.board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant,
        );
        self.history.push(PlySnapshot {
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            key,
        });

        trace!(mv = %m.notation(), ply = self.move_log.len(), "make");
    }

    /// Takes back the last move, returning it; `None` if no move was made.
    ///
    /// Always leaves the game "in progress": checkmate, stalemate and draw
    /// flags are cleared.
    pub fn undo_move(&mut self) -> Option<Move> {
        let m = self.move_log.pop()?;
        let mover = m.piece_moved();

        self.board.set(m.from(), Some(mover));
        self.board.set(m.to(), m.piece_captured());
        self.side_to_move = self.side_to_move.opposite();

        if mover.is(Piece::King) {
            self.set_king_square(mover.color, m.from());
        }

        if let Some(victim) = m.en_passant_victim() {
            self.board.take(m.to());
            self.board.set(victim, m.piece_captured());
        }

        self.history.pop();
        if let Some(prev) = self.history.last() {
            self.castling_rights = prev.castling_rights;
            self.en_passant = prev.en_passant;
            self.halfmove_clock = prev.halfmove_clock;
        }

        if let Some((rook_from, rook_to)) = m.castle_rook_squares() {
            let rook = self.board.take(rook_to);
            self.board.set(rook_from, rook);
        }

        self.checkmate = false;
        self.stalemate = false;
        self.draw = None;

        trace!(mv = %m.notation(), ply = self.move_log.len(), "undo");
        Some(m)
    }

    /// Returns every legal move for the side to move.
    ///
    /// Each pseudo-legal candidate is made, tested for leaving the mover's
    /// king attacked, and undone. Castling moves are appended afterwards with
    /// their own checks. As a side effect the checkmate, stalemate and draw
    /// flags are recomputed. En passant target and castling rights are the
    /// same after the call as before it.
    pub fn valid_moves(&mut self) -> Vec<Move> {
        let saved_en_passant = self.en_passant;
        let saved_rights = self.castling_rights;
        let us = self.side_to_move;

        let mut moves = pseudo_legal_moves(&self.board, us, self.en_passant);

        // Backwards, so removals don't shift the indices still to visit.
        for i in (0..moves.len()).rev() {
            self.make_move(moves[i]);
            let exposed = self.king_attacked(us);
            self.undo_move();
            if exposed {
                moves.remove(i);
            }
        }

        castling_moves(
            &self.board,
            us,
            self.king_square(us),
            self.castling_rights,
            &mut moves,
        );

        let in_check = self.in_check();
        self.checkmate = moves.is_empty() && in_check;
        self.stalemate = moves.is_empty() && !in_check;
        self.draw = if moves.is_empty() {
            None
        } else {
            self.detect_draw()
        };

        if self.checkmate {
            debug!(winner = %us.opposite(), ply = self.move_log.len(), "checkmate");
        } else if self.stalemate {
            debug!(ply = self.move_log.len(), "stalemate");
        } else if let Some(reason) = self.draw {
            debug!(%reason, ply = self.move_log.len(), "draw");
        }

        self.en_passant = saved_en_passant;
        self.castling_rights = saved_rights;
        moves
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.king_attacked(self.side_to_move)
    }

    /// Returns true if the opponent of the side to move attacks `sq`.
    pub fn square_under_attack(&self, sq: Square) -> bool {
        square_under_attack(&self.board, sq, self.side_to_move.opposite())
    }

    /// Looks up the legal move going from `from` to `to`.
    ///
    /// This is how a caller holding only two squares (say, two clicks)
    /// obtains the fully flagged move to pass to [`make_move`](Self::make_move).
    pub fn find_move(&mut self, from: Square, to: Square) -> Option<Move> {
        let probe = Move::from_board(from, to, &self.board)?;
        self.valid_moves().into_iter().find(|m| *m == probe)
    }

    /// Parses `"e2e4"` notation, checks it against the legal moves and plays it.
    ///
    /// # Errors
    ///
    /// Checked in this order, first failure wins:
    ///
    /// 1. [`GameError::GameOver`] if the game has ended, whatever the text is.
    /// 2. [`GameError::InvalidNotation`] if the text is not two squares.
    /// 3. [`GameError::IllegalMove`] if no legal move matches.
    ///
    /// The state is left untouched on error.
    pub fn play(&mut self, notation: &str) -> Result<Move, GameError> {
        let moves = self.valid_moves();
        if self.status() != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }

        let (from, to) = Move::parse_squares(notation)
            .ok_or_else(|| GameError::InvalidNotation(notation.to_string()))?;
        let m = moves
            .into_iter()
            .find(|m| m.from() == from && m.to() == to)
            .ok_or_else(|| GameError::IllegalMove(notation.trim().to_string()))?;

        self.make_move(m);
        Ok(m)
    }

    fn king_attacked(&self, color: Color) -> bool {
        square_under_attack(&self.board, self.king_square(color), color.opposite())
    }

    fn set_king_square(&mut self, color: Color, sq: Square) {
        match color {
            Color::White => self.white_king = sq,
            Color::Black => self.black_king = sq,
        }
    }

    fn detect_draw(&self) -> Option<DrawReason> {
        let rules = self.config.draws;
        if !rules.any() {
            return None;
        }
        let keys: Vec<u64> = self.history.iter().map(|s| s.key).collect();
        rules.detect(self.halfmove_clock, &keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawRules;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play_all(game: &mut GameState, moves: &[&str]) {
        for m in moves {
            game.play(m).unwrap();
        }
    }

    #[test]
    fn new_game() {
        let mut game = GameState::new();
        assert!(game.white_to_move());
        assert!(game.move_log().is_empty());
        assert_eq!(game.king_square(Color::White), Square::E1);
        assert_eq!(game.king_square(Color::Black), Square::E8);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        assert_eq!(game.en_passant_target(), None);
        assert!(!game.in_check());
        assert_eq!(game.valid_moves().len(), 20);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn e4_e5_scenario() {
        let mut game = GameState::new();
        game.make_move(Move::from_board(sq("e2"), sq("e4"), game.board()).unwrap());
        game.make_move(Move::from_board(sq("e7"), sq("e5"), game.board()).unwrap());

        let board = game.board();
        assert_eq!(board.cell_code(4, 4), "wp");
        assert_eq!(board.cell_code(3, 4), "bp");
        assert_eq!(board.cell_code(6, 4), "--");
        assert_eq!(board.cell_code(1, 4), "--");
        assert!(game.white_to_move());
        assert_eq!(game.move_log().len(), 2);
    }

    #[test]
    fn logs_stay_one_longer_than_move_log() {
        let mut game = GameState::new();
        assert_eq!(game.castling_rights_log().len(), 1);
        play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(game.castling_rights_log().len(), 4);
        assert_eq!(game.en_passant_log().len(), 4);
        game.undo_move();
        assert_eq!(game.castling_rights_log().len(), 3);
        assert_eq!(game.en_passant_log().len(), game.move_log().len() + 1);
    }

    #[test]
    fn undo_on_empty_log_is_noop() {
        let mut game = GameState::new();
        assert_eq!(game.undo_move(), None);
        assert_eq!(game.board(), &Board::standard());
        assert!(game.white_to_move());
    }

    #[test]
    fn en_passant_target_lifecycle() {
        let mut game = GameState::new();
        game.play("e2e4").unwrap();
        assert_eq!(game.en_passant_target(), Some(sq("e3")));
        game.play("g8f6").unwrap();
        assert_eq!(game.en_passant_target(), None);
        game.undo_move();
        assert_eq!(game.en_passant_target(), Some(sq("e3")));
    }

    #[test]
    fn en_passant_capture_and_undo() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(game.en_passant_target(), Some(sq("d6")));

        let before = game.board().clone();
        let m = game.play("e5d6").unwrap();
        assert!(m.is_en_passant());
        assert_eq!(game.board().cell_code(2, 3), "wp");
        assert_eq!(game.board().cell_code(3, 3), "--");
        assert_eq!(game.board().cell_code(3, 4), "--");

        game.undo_move();
        assert_eq!(game.board(), &before);
        assert_eq!(game.en_passant_target(), Some(sq("d6")));
    }

    #[test]
    fn promotion_is_always_a_queen() {
        let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let m = game.play("a7a8").unwrap();
        assert!(m.is_pawn_promotion());
        assert_eq!(game.board().cell_code(0, 0), "wQ");
        game.undo_move();
        assert_eq!(game.board().cell_code(1, 0), "wp");
        assert_eq!(game.board().cell_code(0, 0), "--");
    }

    #[test]
    fn castling_moves_the_rook_and_back() {
        let mut game =
            GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let m = game.play("e1g1").unwrap();
        assert!(m.is_castle());
        assert_eq!(game.board().cell_code(7, 6), "wK");
        assert_eq!(game.board().cell_code(7, 5), "wR");
        assert_eq!(game.board().cell_code(7, 7), "--");
        assert_eq!(game.king_square(Color::White), Square::G1);
        assert!(!game.castling_rights().white_kingside);
        assert!(!game.castling_rights().white_queenside);

        let m = game.play("e8c8").unwrap();
        assert_eq!(m.to_string(), "0-0-0");
        assert_eq!(game.board().cell_code(0, 2), "bK");
        assert_eq!(game.board().cell_code(0, 3), "bR");
        assert_eq!(game.board().cell_code(0, 0), "--");

        game.undo_move();
        game.undo_move();
        assert_eq!(game.board().cell_code(7, 7), "wR");
        assert_eq!(game.board().cell_code(0, 0), "bR");
        assert_eq!(game.king_square(Color::White), Square::E1);
        assert_eq!(game.king_square(Color::Black), Square::E8);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
    }

    #[test]
    fn rook_capture_revokes_right() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1").unwrap();
        game.play("g2h1").unwrap();
        assert!(!game.castling_rights().white_kingside);
        assert!(game.castling_rights().white_queenside);
        game.undo_move();
        assert!(game.castling_rights().white_kingside);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // Knight on e2 is pinned by the rook on e8.
        let mut game = GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = game.valid_moves();
        assert!(moves.iter().all(|m| m.from() != sq("e2")));
    }

    #[test]
    fn valid_moves_restores_state() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "d7d5"]);
        let board = game.board().clone();
        let ep = game.en_passant_target();
        let rights = game.castling_rights();
        let log_len = game.move_log().len();

        game.valid_moves();
        assert_eq!(game.board(), &board);
        assert_eq!(game.en_passant_target(), ep);
        assert_eq!(game.castling_rights(), rights);
        assert_eq!(game.move_log().len(), log_len);
        assert_eq!(game.history().len(), log_len + 1);
    }

    #[test]
    fn fools_mate() {
        let mut game = GameState::new();
        play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.in_check());
        assert!(game.valid_moves().is_empty());
        assert!(game.in_checkmate());
        assert!(!game.in_stalemate());
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(game.play("e2e4"), Err(GameError::GameOver));

        game.undo_move();
        assert!(!game.in_checkmate());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn stalemate() {
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.valid_moves().is_empty());
        assert!(game.in_stalemate());
        assert!(!game.in_checkmate());
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn play_rejects_bad_input_without_mutation() {
        let mut game = GameState::new();
        assert!(matches!(game.play("e2e5"), Err(GameError::IllegalMove(_))));
        assert!(matches!(game.play("zz"), Err(GameError::InvalidNotation(_))));
        assert!(matches!(game.play("e4e5"), Err(GameError::IllegalMove(_))));
        assert!(game.move_log().is_empty());
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn find_move_matches_geometry() {
        let mut game = GameState::new();
        let m = game.find_move(sq("g1"), sq("f3")).unwrap();
        assert_eq!(m.piece_moved(), ColoredPiece::new(Color::White, Piece::Knight));
        assert!(game.find_move(sq("g1"), sq("g3")).is_none());
        assert!(game.find_move(sq("e4"), sq("e5")).is_none());
    }

    #[test]
    fn fen_requires_kings() {
        assert!(matches!(
            GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount {
                color: Color::Black,
                ..
            })
        ));
    }

    #[test]
    fn draws_are_off_by_default() {
        let mut game = GameState::new();
        for _ in 0..3 {
            play_all(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        }
        game.valid_moves();
        assert_eq!(game.draw(), None);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn threefold_repetition_when_enabled() {
        let config = EngineConfig {
            draws: DrawRules::ALL,
        };
        let mut game = GameState::new().with_config(config);
        play_all(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        game.valid_moves();
        assert_eq!(game.draw(), None);
        play_all(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        game.valid_moves();
        assert_eq!(game.draw(), Some(DrawReason::ThreefoldRepetition));
        assert_eq!(game.play("e2e4"), Err(GameError::GameOver));

        game.undo_move();
        assert_eq!(game.draw(), None);
    }

    #[test]
    fn fifty_move_rule_when_enabled() {
        let config = EngineConfig {
            draws: DrawRules {
                fifty_move_rule: true,
                threefold_repetition: false,
            },
        };
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80")
            .unwrap()
            .with_config(config);
        game.valid_moves();
        assert_eq!(game.draw(), None);
        game.play("a1a2").unwrap();
        assert_eq!(game.halfmove_clock(), 100);
        game.valid_moves();
        assert_eq!(game.draw(), Some(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn repetition_after_double_push_without_capturer() {
        let config = EngineConfig {
            draws: DrawRules::ALL,
        };
        let mut game = GameState::new().with_config(config);
        play_all(&mut game, &["e2e4"]);
        let after_push = game.position_key();
        assert_eq!(game.en_passant_target(), Some(sq("e3")));

        play_all(&mut game, &["g8f6", "g1f3", "f6g8", "f3g1"]);
        assert_eq!(game.en_passant_target(), None);
        assert_eq!(game.position_key(), after_push);
        game.valid_moves();
        assert_eq!(game.draw(), None);

        play_all(&mut game, &["g8f6", "g1f3", "f6g8", "f3g1"]);
        game.valid_moves();
        assert_eq!(game.draw(), Some(DrawReason::ThreefoldRepetition));
    }

    #[test]
    fn capturable_en_passant_target_is_a_different_position() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "g8f6", "e4e5", "d7d5"]);
        let with_target = game.position_key();
        play_all(&mut game, &["g1f3", "f6g8", "f3g1", "g8f6"]);
        assert_eq!(game.en_passant_target(), None);
        assert_ne!(game.position_key(), with_target);
    }

    #[test]
    fn displaced_king_cannot_castle() {
        let mut game = GameState::from_fen("4k3/8/8/8/4K2R/8/8/8 w K - 0 1").unwrap();
        assert!(game.valid_moves().iter().all(|m| !m.is_castle()));
        assert!(matches!(game.play("e4g4"), Err(GameError::IllegalMove(_))));
        assert_eq!(game.board().cell_code(4, 7), "wR");
        assert_eq!(game.board().cell_code(4, 5), "--");
    }

    #[test]
    fn game_over_takes_precedence_over_bad_notation() {
        let mut game = GameState::new();
        play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(game.play("zz"), Err(GameError::GameOver));
    }

    #[test]
    fn halfmove_clock_resets_on_pawn_moves_and_captures() {
        let mut game = GameState::new();
        game.play("g1f3").unwrap();
        assert_eq!(game.halfmove_clock(), 1);
        game.play("e7e5").unwrap();
        assert_eq!(game.halfmove_clock(), 0);
        game.play("f3e5").unwrap();
        assert_eq!(game.halfmove_clock(), 0);
        game.undo_move();
        assert_eq!(game.halfmove_clock(), 0);
        game.undo_move();
        assert_eq!(game.halfmove_clock(), 1);
    }
}
