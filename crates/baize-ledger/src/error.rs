use baize_types::{CanonicalPair, MatchupId, PlayerId, TypeError};

/// Errors produced by ledger operations.
///
/// Every append either fully succeeds or reports one of these; the ledger
/// never logs-and-continues on a write failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The submitted outcome is malformed (equal players, out-of-range
    /// score input). Rejected before any write.
    #[error("invalid matchup: {0}")]
    InvalidMatchup(#[from] TypeError),

    /// An edit referenced a matchup with zero existing revisions.
    #[error("matchup not found: {matchup}")]
    MatchupNotFound { matchup: MatchupId },

    /// The submitted players do not match the keyed pair.
    #[error("player {player} is not a member of {pair}")]
    PlayerNotInMatchup {
        player: PlayerId,
        pair: CanonicalPair,
    },

    /// A concurrent writer raced the sequence-number assignment.
    /// Retried internally a bounded number of times before surfacing.
    #[error("sequence conflict on {matchup} at revision {revision_seq}")]
    SequenceConflict {
        matchup: MatchupId,
        revision_seq: u32,
    },

    /// A staged import row could not be numbered or applied.
    #[error("invalid import row {index}: {reason}")]
    InvalidImportRow { index: usize, reason: String },

    /// The underlying store failed. Propagated unchanged, never swallowed.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}
