//! Core types for chess.
//!
//! This crate provides the fundamental types used by the rules engine:
//! - [`Piece`], [`ColoredPiece`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (row 0 = rank 8, column 0 = file a)
//! - [`Board`], the 8×8 grid of cells
//! - [`Move`] for single plies, with geometric equality
//! - FEN parsing for position setup

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::{Board, EMPTY_CODE};
pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::{ColoredPiece, Piece};
pub use square::Square;
