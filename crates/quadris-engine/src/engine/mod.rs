//! The game state machine and its collaborators.
//!
//! - [`Game`] - the state machine: board, falling piece, score, over flag
//! - [`GameConfig`] - rule-variant switches (gravity folding, top-out rule)
//! - [`PieceGenerator`] - seedable uniform piece source
//! - [`GameStats`] - score and clear counters
//!
//! # Game Flow
//!
//! 1. Initialize [`Game`] (optionally with a [`Seed`])
//! 2. The driver feeds one [`Input`] per turn to [`Game::advance`]
//! 3. When the piece can no longer fall it locks, rows clear, and a new
//!    piece spawns
//! 4. Repeat until the top-out rule fires; the over flag is one-way
//!
//! # Example
//!
//! ```
//! use quadris_engine::{Game, GameConfig, Input};
//!
//! let mut game = Game::new(GameConfig::default());
//! game.advance(Input::Left);
//! game.advance(Input::Drop);
//! println!("score: {}", game.score());
//! ```

pub use self::{config::*, game::*, game_stats::*, piece_generator::*};

mod config;
mod game;
mod game_stats;
mod piece_generator;
