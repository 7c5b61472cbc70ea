//! Game logic and state management.
//!
//! This module orchestrates the core data structures into one state
//! transition per player move:
//!
//! - [`GameState`] - Full game snapshot (board, tray, score, terminal flag)
//! - [`BlockTray`] - The three offered blocks and their random generation
//! - [`TraySeed`] - Seed for deterministic block generation
//! - [`ScoreTracker`] - Score and combo-streak accounting
//!
//! # Game Flow
//!
//! 1. Initialize [`GameState`] (optionally with a [`TraySeed`])
//! 2. The presentation layer picks a tray slot and a board position
//! 3. [`GameState::apply_move`] validates, places, clears lines, scores,
//!    refills the consumed slot, and runs the terminal check
//! 4. Repeat until no offered block fits anywhere on the board
//!
//! Illegal moves are not errors: `apply_move` returns the state unchanged.
//!
//! # Example
//!
//! ```
//! use oxiblast_engine::{GameState, Position};
//!
//! let state = GameState::new();
//! let next = state.apply_move(0, Position::new(0, 0));
//!
//! // The first block always fits on an empty board.
//! assert!(next.score() > state.score());
//! ```

pub use self::{block_tray::*, game::*, scoring::*};

mod block_tray;
mod game;
mod scoring;
