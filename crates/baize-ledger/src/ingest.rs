use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use baize_types::{CanonicalPair, LedgerStamp, MatchupId, PlayerId};

use crate::error::LedgerError;
use crate::records::{GameRevision, MatchOutcome};
use crate::traits::{RevisionReader, RevisionWriter};

/// One historical outcome to ingest, as produced by an external parser.
///
/// `rematch_round` is the 1-based round number carried by source data;
/// it converts to the ledger's 0-based `rematch_seq`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub balls_remaining: u8,
    pub fouled_on_black: bool,
    pub played_at: NaiveDate,
    pub rematch_round: u32,
}

/// Outcome of one bulk ingestion run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub staged: u64,
    pub applied: u64,
}

/// Stages and applies batches of historical outcomes.
///
/// Sequence numbers are assigned at staging time against the store
/// *and* against rows already staged in the same batch: a per-matchup
/// high-water map serializes intra-batch numbering, so a batch holding
/// several edits of one matchup produces a gapless, collision-free
/// sequence instead of duplicates computed from a stale read.
pub struct BulkImporter;

impl BulkImporter {
    /// Number a batch of import rows into ready-to-apply revisions.
    ///
    /// Rows are processed in input order; `authored_at` stays zero until
    /// apply, when the ledger stamps each insert. The importing actor is
    /// recorded as author on every staged revision.
    pub fn stage<R: RevisionReader>(
        reader: &R,
        rows: &[ImportRow],
        author: &PlayerId,
    ) -> Result<Vec<GameRevision>, LedgerError> {
        let mut next_seq: HashMap<MatchupId, u32> = HashMap::new();
        let mut staged = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            if row.rematch_round == 0 {
                return Err(LedgerError::InvalidImportRow {
                    index,
                    reason: "rematch round is 1-based".into(),
                });
            }

            let outcome = MatchOutcome {
                winner: row.winner.clone(),
                loser: row.loser.clone(),
                balls_remaining: row.balls_remaining,
                fouled_on_black: row.fouled_on_black,
                played_at: row.played_at,
            };
            outcome
                .validate()
                .map_err(|e| LedgerError::InvalidImportRow {
                    index,
                    reason: e.to_string(),
                })?;

            let pair = CanonicalPair::new(row.winner.clone(), row.loser.clone())
                .map_err(|e| LedgerError::InvalidImportRow {
                    index,
                    reason: e.to_string(),
                })?;
            let matchup = MatchupId::new(pair.clone(), row.rematch_round - 1);

            let revision_seq = match next_seq.get(&matchup) {
                Some(&assigned) => assigned + 1,
                None => reader
                    .revisions(&matchup)?
                    .last()
                    .map(|r| r.revision_seq + 1)
                    .unwrap_or(0),
            };
            next_seq.insert(matchup, revision_seq);

            staged.push(GameRevision {
                pair,
                rematch_seq: row.rematch_round - 1,
                revision_seq,
                winner: row.winner.clone(),
                balls_remaining: row.balls_remaining,
                fouled_on_black: row.fouled_on_black,
                played_at: row.played_at,
                author: author.clone(),
                authored_at: LedgerStamp::zero(),
            });
        }

        debug!(rows = staged.len(), "staged import batch");
        Ok(staged)
    }

    /// Stage and apply in one step.
    pub fn import<L>(
        ledger: &L,
        rows: &[ImportRow],
        author: &PlayerId,
    ) -> Result<IngestReport, LedgerError>
    where
        L: RevisionReader + RevisionWriter,
    {
        let staged = Self::stage(ledger, rows, author)?;
        let count = staged.len() as u64;
        let applied = ledger.apply_staged(staged)?;
        Ok(IngestReport {
            staged: count,
            applied,
        })
    }
}
