//! Chess rules engine: legal moves, make/undo and game termination.
//!
//! This crate provides:
//! - [`GameState`] - the authoritative game: board, side to move, logs,
//!   exact make/undo, legal move generation and terminal-state detection
//! - [`CastlingRights`] - the four castling permissions and how moves revoke them
//! - [`movegen`] - pseudo-legal generators, castling and attacked-square tests
//! - [`EngineConfig`] - optional draw rules, loadable from TOML
//!
//! # Architecture
//!
//! The board is a plain 8×8 grid from [`chess_core`]. Legality is decided by
//! brute force: every pseudo-legal move is made, the mover's king is tested
//! for attack, and the move is undone. All history needed for undo lives in
//! the move log and a parallel stack of per-ply snapshots.
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//!
//! let mut game = GameState::new();
//! assert_eq!(game.valid_moves().len(), 20);
//!
//! game.play("e2e4").unwrap();
//! game.play("e7e5").unwrap();
//! assert_eq!(game.board().cell_code(4, 4), "wp");
//!
//! game.undo_move();
//! assert_eq!(game.move_log().len(), 1);
//! ```

mod castling;
pub mod config;
pub mod draw;
mod game;
pub mod movegen;
mod zobrist;

pub use castling::CastlingRights;
pub use config::{ConfigError, EngineConfig};
pub use draw::{DrawReason, DrawRules};
pub use game::{GameError, GameState, GameStatus, PlySnapshot};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{castling_moves, pseudo_legal_moves, square_under_attack};
