//! Error types for Baize foundation types.

use thiserror::Error;

/// Errors produced when constructing or validating foundation types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A player identifier must not be empty.
    #[error("player identifier is empty")]
    EmptyPlayerId,

    /// The two sides of a matchup must be distinct players.
    #[error("a player cannot play against themselves: {id}")]
    IdenticalPlayers { id: String },

    /// `balls_remaining` is the loser's remaining object balls, 0 through 8.
    #[error("balls remaining out of range: {value} (expected 0..=8)")]
    BallsOutOfRange { value: u8 },

    /// An unrecognized role name was supplied.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
