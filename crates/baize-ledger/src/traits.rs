use baize_types::{CanonicalPair, MatchupId, PlayerId};

use crate::error::LedgerError;
use crate::records::{GameRevision, MatchOutcome};

/// Write boundary for ledger append operations.
///
/// Implementations must guarantee that sequence assignment is
/// collision-free under concurrency: either by running the
/// read-max-then-insert section inside a per-ledger (or per-matchup)
/// write scope, or by enforcing a uniqueness constraint on
/// `(pair, rematch_seq, revision_seq)` and retrying on conflict.
/// Rows are never mutated or deleted individually; `reset_all` is the
/// only deletion path.
pub trait RevisionWriter: Send + Sync {
    /// Append the first revision of a brand-new matchup.
    ///
    /// Canonicalizes the pair, assigns the next unused `rematch_seq` for
    /// it (0 when the pair has never played), and writes `revision_seq`
    /// 0 with a fresh insertion stamp.
    fn append_new_match(
        &self,
        outcome: &MatchOutcome,
        author: &PlayerId,
    ) -> Result<GameRevision, LedgerError>;

    /// Append an edit to an existing matchup.
    ///
    /// Fails with [`LedgerError::MatchupNotFound`] when the matchup has
    /// zero revisions; otherwise writes `revision_seq = max + 1`. The
    /// outcome's players must be the keyed pair.
    fn append_revision(
        &self,
        matchup: &MatchupId,
        outcome: &MatchOutcome,
        author: &PlayerId,
    ) -> Result<GameRevision, LedgerError>;

    /// Apply a batch of pre-numbered revisions from bulk ingestion.
    ///
    /// Each row's insert is individually atomic. A row whose sequence
    /// number was raced by an interactive append is renumbered and
    /// retried a bounded number of times before the batch fails with
    /// [`LedgerError::SequenceConflict`]. Returns the number of rows
    /// applied.
    fn apply_staged(&self, staged: Vec<GameRevision>) -> Result<u64, LedgerError>;

    /// Erase every revision. Irreversible; idempotent on an empty
    /// ledger. Returns the number of rows removed.
    fn reset_all(&self) -> Result<u64, LedgerError>;
}

/// Read boundary for ledger queries and projections.
///
/// Reads require no locking guarantees beyond snapshot semantics: a read
/// reflects all writes committed before it began.
pub trait RevisionReader: Send + Sync {
    /// All distinct matchup keys, in deterministic (pair, rematch) order.
    fn matchups(&self) -> Result<Vec<MatchupId>, LedgerError>;

    /// Full revision history of one matchup, ascending `revision_seq`.
    /// Empty when the matchup has never been logged.
    fn revisions(&self, matchup: &MatchupId) -> Result<Vec<GameRevision>, LedgerError>;

    /// Every stored revision, superseded rows included. Ordering is
    /// unspecified; projections sort.
    fn all_revisions(&self) -> Result<Vec<GameRevision>, LedgerError>;

    /// Total number of stored revisions.
    fn revision_count(&self) -> Result<u64, LedgerError>;

    /// Number of matchups logged for a pair (`max rematch_seq + 1`, or 0).
    fn rematch_count(&self, pair: &CanonicalPair) -> Result<u32, LedgerError>;
}
