use thiserror::Error;

use baize_ledger::LedgerError;
use baize_types::{PlayerId, TypeError};

/// Errors surfaced at the service boundary.
///
/// The HTTP layer translates these to user-facing responses; ledger
/// failures pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The operation requires an authenticated actor.
    #[error("authentication required")]
    Unauthorized,

    /// The actor is authenticated but lacks the required role.
    #[error("access denied")]
    Forbidden,

    /// A submitted player identifier is not on the roster.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// The import batch exceeds the configured maximum.
    #[error("import batch of {rows} rows exceeds the configured maximum of {max}")]
    ImportTooLarge { rows: usize, max: usize },

    /// Malformed input rejected before reaching the ledger.
    #[error("invalid input: {0}")]
    Invalid(#[from] TypeError),

    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The roster backend failed.
    #[error("roster unavailable: {0}")]
    RosterUnavailable(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
