use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use baize_types::{CanonicalPair, LedgerClock, MatchupId, PlayerId};

use crate::error::LedgerError;
use crate::records::{GameRevision, MatchOutcome, MAX_BALLS_REMAINING};
use crate::traits::{RevisionReader, RevisionWriter};

/// Bound on renumber-and-retry attempts when a staged row's sequence
/// number was raced by another writer.
pub const MAX_SEQUENCE_RETRIES: usize = 3;

/// In-memory ledger implementation for tests, local demos, and embedding.
///
/// All revisions live in per-matchup streams behind a `RwLock`; the
/// read-max-then-insert section of every append runs inside one write
/// scope, so sequence assignment is collision-free. The embedded
/// [`LedgerClock`] is advanced inside the same scope, which makes
/// `authored_at` strictly increasing in insertion order.
pub struct InMemoryLedger {
    clock: LedgerClock,
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    streams: HashMap<MatchupId, Vec<GameRevision>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            clock: LedgerClock::new(),
            inner: RwLock::new(LedgerState::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::StorageUnavailable("ledger read lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .write()
            .map_err(|_| LedgerError::StorageUnavailable("ledger write lock poisoned".into()))
    }

    /// Next unused rematch ordinal for a pair.
    fn next_rematch_seq(state: &LedgerState, pair: &CanonicalPair) -> u32 {
        state
            .streams
            .keys()
            .filter(|m| &m.pair == pair)
            .map(|m| m.rematch_seq + 1)
            .max()
            .unwrap_or(0)
    }

    /// Next revision sequence for a matchup group (0 when empty).
    fn next_revision_seq(state: &LedgerState, matchup: &MatchupId) -> u32 {
        state
            .streams
            .get(matchup)
            .and_then(|stream| stream.last())
            .map(|r| r.revision_seq + 1)
            .unwrap_or(0)
    }

    /// Insert one row, enforcing the per-group uniqueness/gaplessness
    /// constraint: the row's `revision_seq` must be exactly the next
    /// position in its stream.
    fn try_insert(state: &mut LedgerState, row: GameRevision) -> Result<(), LedgerError> {
        let matchup = row.matchup();
        let expected = state.streams.get(&matchup).map_or(0, |s| s.len() as u32);
        if row.revision_seq != expected {
            return Err(LedgerError::SequenceConflict {
                matchup,
                revision_seq: row.revision_seq,
            });
        }
        state.streams.entry(matchup).or_default().push(row);
        Ok(())
    }

    /// Boundary checks shared by the staged-apply path, which bypasses
    /// [`MatchOutcome::validate`].
    fn check_row(row: &GameRevision, index: usize) -> Result<(), LedgerError> {
        if !row.pair.contains(&row.winner) {
            return Err(LedgerError::PlayerNotInMatchup {
                player: row.winner.clone(),
                pair: row.pair.clone(),
            });
        }
        if row.balls_remaining > MAX_BALLS_REMAINING {
            return Err(LedgerError::InvalidImportRow {
                index,
                reason: format!("balls remaining out of range: {}", row.balls_remaining),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionWriter for InMemoryLedger {
    fn append_new_match(
        &self,
        outcome: &MatchOutcome,
        author: &PlayerId,
    ) -> Result<GameRevision, LedgerError> {
        outcome.validate()?;
        let pair = outcome.canonical_pair()?;

        let mut state = self.write()?;
        let rematch_seq = Self::next_rematch_seq(&state, &pair);
        let revision = GameRevision {
            pair,
            rematch_seq,
            revision_seq: 0,
            winner: outcome.winner.clone(),
            balls_remaining: outcome.balls_remaining,
            fouled_on_black: outcome.fouled_on_black,
            played_at: outcome.played_at,
            author: author.clone(),
            authored_at: self.clock.next(),
        };
        Self::try_insert(&mut state, revision.clone())?;

        debug!(matchup = %revision.matchup(), winner = %revision.winner, "logged new match");
        Ok(revision)
    }

    fn append_revision(
        &self,
        matchup: &MatchupId,
        outcome: &MatchOutcome,
        author: &PlayerId,
    ) -> Result<GameRevision, LedgerError> {
        outcome.validate()?;
        let pair = outcome.canonical_pair()?;
        if pair != matchup.pair {
            let player = if matchup.pair.contains(&outcome.winner) {
                outcome.loser.clone()
            } else {
                outcome.winner.clone()
            };
            return Err(LedgerError::PlayerNotInMatchup {
                player,
                pair: matchup.pair.clone(),
            });
        }

        let mut state = self.write()?;
        if state.streams.get(matchup).map_or(true, Vec::is_empty) {
            return Err(LedgerError::MatchupNotFound {
                matchup: matchup.clone(),
            });
        }

        let revision = GameRevision {
            pair,
            rematch_seq: matchup.rematch_seq,
            revision_seq: Self::next_revision_seq(&state, matchup),
            winner: outcome.winner.clone(),
            balls_remaining: outcome.balls_remaining,
            fouled_on_black: outcome.fouled_on_black,
            played_at: outcome.played_at,
            author: author.clone(),
            authored_at: self.clock.next(),
        };
        Self::try_insert(&mut state, revision.clone())?;

        debug!(
            matchup = %revision.matchup(),
            revision_seq = revision.revision_seq,
            "appended revision"
        );
        Ok(revision)
    }

    fn apply_staged(&self, staged: Vec<GameRevision>) -> Result<u64, LedgerError> {
        let mut state = self.write()?;
        let mut applied = 0u64;

        for (index, mut row) in staged.into_iter().enumerate() {
            Self::check_row(&row, index)?;

            // Staged rows were numbered against a possibly stale read.
            // On conflict, renumber against current state and retry.
            let mut attempts = 0;
            loop {
                row.authored_at = self.clock.next();
                match Self::try_insert(&mut state, row.clone()) {
                    Ok(()) => {
                        applied += 1;
                        break;
                    }
                    Err(LedgerError::SequenceConflict { ref matchup, .. })
                        if attempts < MAX_SEQUENCE_RETRIES =>
                    {
                        attempts += 1;
                        row.revision_seq = Self::next_revision_seq(&state, matchup);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        info!(applied, "applied staged import batch");
        Ok(applied)
    }

    fn reset_all(&self) -> Result<u64, LedgerError> {
        let mut state = self.write()?;
        let removed: u64 = state.streams.values().map(|s| s.len() as u64).sum();
        state.streams.clear();
        info!(removed, "ledger reset");
        Ok(removed)
    }
}

impl RevisionReader for InMemoryLedger {
    fn matchups(&self) -> Result<Vec<MatchupId>, LedgerError> {
        let state = self.read()?;
        let mut keys: Vec<_> = state.streams.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn revisions(&self, matchup: &MatchupId) -> Result<Vec<GameRevision>, LedgerError> {
        let state = self.read()?;
        Ok(state.streams.get(matchup).cloned().unwrap_or_default())
    }

    fn all_revisions(&self) -> Result<Vec<GameRevision>, LedgerError> {
        let state = self.read()?;
        Ok(state.streams.values().flatten().cloned().collect())
    }

    fn revision_count(&self) -> Result<u64, LedgerError> {
        let state = self.read()?;
        Ok(state.streams.values().map(|s| s.len() as u64).sum())
    }

    fn rematch_count(&self, pair: &CanonicalPair) -> Result<u32, LedgerError> {
        let state = self.read()?;
        Ok(Self::next_rematch_seq(&state, pair))
    }
}
