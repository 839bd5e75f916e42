//! Highscore persistence
//!
//! A JSON-file leaderboard for cleared runs.

pub mod leaderboard;

pub use leaderboard::{format_elapsed, medal_for_rank, Leaderboard, ScoreEntry, ScoreError};
