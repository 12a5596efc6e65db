use std::collections::{BTreeMap, HashSet};

use baize_types::{CanonicalPair, LedgerStamp, MatchupId};

use crate::error::LedgerError;
use crate::records::MAX_BALLS_REMAINING;
use crate::traits::RevisionReader;

/// Result of validating a whole ledger against its invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub revision_count: u64,
    pub sequences_gapless: bool,
    pub rematches_contiguous: bool,
    pub pairs_canonical: bool,
    pub winners_attributed: bool,
    pub stamps_monotonic: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific invariant violation found during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub matchup: MatchupId,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    SequenceGap,
    RematchGap,
    NonCanonicalPair,
    ForeignWinner,
    BallsOutOfRange,
    StampRegression,
}

/// Whole-ledger invariant validator.
///
/// Collects violations instead of short-circuiting, so one report
/// describes everything wrong with a damaged store.
pub struct LedgerValidator;

impl LedgerValidator {
    pub fn validate<R: RevisionReader>(reader: &R) -> Result<ValidationReport, LedgerError> {
        let mut violations = Vec::new();
        let mut sequences_gapless = true;
        let mut rematches_contiguous = true;
        let mut pairs_canonical = true;
        let mut winners_attributed = true;
        let mut stamps_monotonic = true;

        let mut revision_count = 0u64;
        let mut rematches_per_pair: BTreeMap<CanonicalPair, Vec<u32>> = BTreeMap::new();
        let mut seen_stamps: HashSet<LedgerStamp> = HashSet::new();

        for matchup in reader.matchups()? {
            let stream = reader.revisions(&matchup)?;
            revision_count += stream.len() as u64;
            rematches_per_pair
                .entry(matchup.pair.clone())
                .or_default()
                .push(matchup.rematch_seq);

            let mut previous_stamp: Option<LedgerStamp> = None;
            for (index, revision) in stream.iter().enumerate() {
                let expected = index as u32;
                if revision.revision_seq != expected {
                    sequences_gapless = false;
                    violations.push(Violation {
                        matchup: matchup.clone(),
                        kind: ViolationKind::SequenceGap,
                        description: format!(
                            "expected revision {expected}, found {}",
                            revision.revision_seq
                        ),
                    });
                }

                if revision.pair.player1() >= revision.pair.player2() {
                    pairs_canonical = false;
                    violations.push(Violation {
                        matchup: matchup.clone(),
                        kind: ViolationKind::NonCanonicalPair,
                        description: format!("pair is not canonically ordered: {}", revision.pair),
                    });
                }

                if !revision.pair.contains(&revision.winner) {
                    winners_attributed = false;
                    violations.push(Violation {
                        matchup: matchup.clone(),
                        kind: ViolationKind::ForeignWinner,
                        description: format!(
                            "winner {} is not a member of {}",
                            revision.winner, revision.pair
                        ),
                    });
                }

                if revision.balls_remaining > MAX_BALLS_REMAINING {
                    violations.push(Violation {
                        matchup: matchup.clone(),
                        kind: ViolationKind::BallsOutOfRange,
                        description: format!(
                            "balls remaining out of range: {}",
                            revision.balls_remaining
                        ),
                    });
                }

                if let Some(prev) = previous_stamp {
                    if !revision.authored_at.is_after(&prev) {
                        stamps_monotonic = false;
                        violations.push(Violation {
                            matchup: matchup.clone(),
                            kind: ViolationKind::StampRegression,
                            description: format!(
                                "revision {} not authored after its predecessor",
                                revision.revision_seq
                            ),
                        });
                    }
                }
                previous_stamp = Some(revision.authored_at);

                if !seen_stamps.insert(revision.authored_at) {
                    stamps_monotonic = false;
                    violations.push(Violation {
                        matchup: matchup.clone(),
                        kind: ViolationKind::StampRegression,
                        description: format!("duplicate stamp {}", revision.authored_at),
                    });
                }
            }
        }

        for (pair, mut rematches) in rematches_per_pair {
            rematches.sort_unstable();
            for (index, rematch) in rematches.iter().enumerate() {
                if *rematch != index as u32 {
                    rematches_contiguous = false;
                    violations.push(Violation {
                        matchup: MatchupId::new(pair.clone(), *rematch),
                        kind: ViolationKind::RematchGap,
                        description: format!(
                            "expected rematch {index}, found {rematch}"
                        ),
                    });
                    break;
                }
            }
        }

        Ok(ValidationReport {
            revision_count,
            sequences_gapless,
            rematches_contiguous,
            pairs_canonical,
            winners_attributed,
            stamps_monotonic,
            violations,
        })
    }
}
