use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use baize_types::{CanonicalPair, LedgerStamp, MatchupId, PlayerId, TypeError};

/// Highest legal value for the loser's remaining object balls.
pub const MAX_BALLS_REMAINING: u8 = 8;

/// A candidate match outcome as submitted by a caller.
///
/// `balls_remaining` and `fouled_on_black` describe the *loser's*
/// performance; the date is caller-supplied and may be backdated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub balls_remaining: u8,
    pub fouled_on_black: bool,
    pub played_at: NaiveDate,
}

impl MatchOutcome {
    /// Canonicalize the winner/loser pair. Fails on equal identifiers.
    pub fn canonical_pair(&self) -> Result<CanonicalPair, TypeError> {
        CanonicalPair::new(self.winner.clone(), self.loser.clone())
    }

    /// Check the field constraints enforced at the ledger boundary.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.balls_remaining > MAX_BALLS_REMAINING {
            return Err(TypeError::BallsOutOfRange {
                value: self.balls_remaining,
            });
        }
        self.canonical_pair()?;
        Ok(())
    }
}

/// The sole persisted entity: one revision of one matchup.
///
/// Revisions are immutable once written. Editing a match appends a new
/// row with the next `revision_seq` for its `(pair, rematch_seq)` group;
/// within a group the sequence is gapless from 0. `authored_at` is the
/// server-assigned insertion stamp and orders the audit trail; it is
/// independent of the caller-supplied `played_at`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRevision {
    pub pair: CanonicalPair,
    pub rematch_seq: u32,
    pub revision_seq: u32,
    pub winner: PlayerId,
    pub balls_remaining: u8,
    pub fouled_on_black: bool,
    pub played_at: NaiveDate,
    pub author: PlayerId,
    pub authored_at: LedgerStamp,
}

impl GameRevision {
    /// The matchup key this revision belongs to.
    pub fn matchup(&self) -> MatchupId {
        MatchupId::new(self.pair.clone(), self.rematch_seq)
    }

    /// The losing player.
    pub fn loser(&self) -> &PlayerId {
        if &self.winner == self.pair.player1() {
            self.pair.player2()
        } else {
            self.pair.player1()
        }
    }

    /// `true` for the original record of a matchup, `false` for edits.
    pub fn is_original(&self) -> bool {
        self.revision_seq == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn outcome(winner: &str, loser: &str, balls: u8) -> MatchOutcome {
        MatchOutcome {
            winner: player(winner),
            loser: player(loser),
            balls_remaining: balls,
            fouled_on_black: false,
            played_at: date("2024-01-01"),
        }
    }

    #[test]
    fn validate_accepts_legal_outcome() {
        outcome("p1", "p2", 8).validate().unwrap();
        outcome("p1", "p2", 0).validate().unwrap();
    }

    #[test]
    fn validate_rejects_out_of_range_balls() {
        let error = outcome("p1", "p2", 9).validate().unwrap_err();
        assert_eq!(error, TypeError::BallsOutOfRange { value: 9 });
    }

    #[test]
    fn validate_rejects_self_match() {
        let error = outcome("p1", "p1", 3).validate().unwrap_err();
        assert!(matches!(error, TypeError::IdenticalPlayers { .. }));
    }

    #[test]
    fn loser_is_the_other_pair_member() {
        let pair = CanonicalPair::new(player("a"), player("b")).unwrap();
        let revision = GameRevision {
            pair: pair.clone(),
            rematch_seq: 0,
            revision_seq: 0,
            winner: player("b"),
            balls_remaining: 2,
            fouled_on_black: false,
            played_at: date("2024-01-01"),
            author: player("a"),
            authored_at: LedgerStamp::new(1, 0),
        };
        assert_eq!(revision.loser(), &player("a"));
        assert!(revision.is_original());
    }

    #[test]
    fn serde_roundtrip() {
        let pair = CanonicalPair::new(player("a"), player("b")).unwrap();
        let revision = GameRevision {
            pair,
            rematch_seq: 1,
            revision_seq: 2,
            winner: player("a"),
            balls_remaining: 5,
            fouled_on_black: true,
            played_at: date("2023-11-30"),
            author: player("editor"),
            authored_at: LedgerStamp::new(1_700_000_000_000, 7),
        };
        let json = serde_json::to_string(&revision).unwrap();
        let parsed: GameRevision = serde_json::from_str(&json).unwrap();
        assert_eq!(revision, parsed);
    }
}
