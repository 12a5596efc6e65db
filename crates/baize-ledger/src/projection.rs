use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use baize_types::MatchupId;

use crate::error::LedgerError;
use crate::records::GameRevision;
use crate::traits::RevisionReader;

/// One row of the audit trail: a revision plus whether a later revision
/// of the same matchup has superseded it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub revision: GameRevision,
    pub superseded: bool,
}

/// Deterministic read-only views over a revision store.
///
/// Two independent orderings coexist over the same append-only log:
/// current state resolves by `revision_seq` within each matchup, while
/// the audit trail orders by `authored_at` across all matchups. They are
/// never conflated.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    /// The current state of every matchup: the row with the maximum
    /// `revision_seq` in its group, ordered by `played_at` descending,
    /// then pair, then `rematch_seq` descending.
    pub fn current_matches<R: RevisionReader>(
        reader: &R,
    ) -> Result<Vec<GameRevision>, LedgerError> {
        let mut current = Vec::new();
        for matchup in reader.matchups()? {
            if let Some(latest) = reader.revisions(&matchup)?.pop() {
                current.push(latest);
            }
        }

        current.sort_by(|a, b| {
            b.played_at
                .cmp(&a.played_at)
                .then_with(|| a.pair.cmp(&b.pair))
                .then_with(|| b.rematch_seq.cmp(&a.rematch_seq))
        });
        Ok(current)
    }

    /// The current state of one matchup, or `None` when the group has
    /// zero revisions.
    pub fn current_match<R: RevisionReader>(
        reader: &R,
        matchup: &MatchupId,
    ) -> Result<Option<GameRevision>, LedgerError> {
        Ok(reader.revisions(matchup)?.pop())
    }

    /// The complete audit trail: every revision ever appended, newest
    /// authorship first. Superseded rows are flagged, never filtered.
    pub fn audit_trail<R: RevisionReader>(
        reader: &R,
    ) -> Result<Vec<AuditEntry>, LedgerError> {
        let mut revisions = reader.all_revisions()?;

        let mut latest_seq: HashMap<MatchupId, u32> = HashMap::new();
        for revision in &revisions {
            let entry = latest_seq.entry(revision.matchup()).or_insert(0);
            *entry = (*entry).max(revision.revision_seq);
        }

        revisions.sort_by(|a, b| b.authored_at.cmp(&a.authored_at));
        Ok(revisions
            .into_iter()
            .map(|revision| {
                let superseded = latest_seq
                    .get(&revision.matchup())
                    .is_some_and(|&max| revision.revision_seq < max);
                AuditEntry {
                    revision,
                    superseded,
                }
            })
            .collect())
    }
}
