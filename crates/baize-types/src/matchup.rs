use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::player::PlayerId;

/// An order-independent pair of distinct players.
///
/// Canonicalization sorts the two identifiers so that
/// `player1 < player2` under [`PlayerId`]'s total order. Submitting
/// `(a, b)` and `(b, a)` therefore produces the same pair; which input
/// was the winner is the caller's to preserve.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalPair {
    player1: PlayerId,
    player2: PlayerId,
}

impl CanonicalPair {
    /// Canonicalize two player identifiers into an ordered pair.
    ///
    /// Pure; the only failure mode is equal identifiers.
    pub fn new(a: PlayerId, b: PlayerId) -> Result<Self, TypeError> {
        if a == b {
            return Err(TypeError::IdenticalPlayers {
                id: a.as_str().to_string(),
            });
        }
        let (player1, player2) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { player1, player2 })
    }

    /// The lexicographically smaller player.
    pub fn player1(&self) -> &PlayerId {
        &self.player1
    }

    /// The lexicographically larger player.
    pub fn player2(&self) -> &PlayerId {
        &self.player2
    }

    /// Returns `true` if `id` is one of the two players.
    pub fn contains(&self, id: &PlayerId) -> bool {
        &self.player1 == id || &self.player2 == id
    }

    /// The opponent of `id` within this pair, or `None` if `id` is not a
    /// member.
    pub fn other(&self, id: &PlayerId) -> Option<&PlayerId> {
        if &self.player1 == id {
            Some(&self.player2)
        } else if &self.player2 == id {
            Some(&self.player1)
        } else {
            None
        }
    }
}

impl fmt::Display for CanonicalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.player1, self.player2)
    }
}

/// The full ledger key for one matchup: a canonical pair plus the
/// rematch ordinal distinguishing repeated matchups between the same
/// players. Rematch numbering starts at 0 and increments each time a new
/// matchup between the pair is first logged, never when one is edited.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchupId {
    pub pair: CanonicalPair,
    pub rematch_seq: u32,
}

impl MatchupId {
    pub fn new(pair: CanonicalPair, rematch_seq: u32) -> Self {
        Self { pair, rematch_seq }
    }
}

impl fmt::Display for MatchupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (rematch {})", self.pair, self.rematch_seq)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    #[test]
    fn canonicalization_orders_players() {
        let pair = CanonicalPair::new(player("zoe"), player("amy")).unwrap();
        assert_eq!(pair.player1().as_str(), "amy");
        assert_eq!(pair.player2().as_str(), "zoe");
    }

    #[test]
    fn canonicalization_is_order_independent() {
        let forward = CanonicalPair::new(player("p1"), player("p2")).unwrap();
        let reversed = CanonicalPair::new(player("p2"), player("p1")).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn identical_players_are_rejected() {
        let error = CanonicalPair::new(player("p1"), player("p1")).unwrap_err();
        assert_eq!(
            error,
            TypeError::IdenticalPlayers {
                id: "p1".to_string()
            }
        );
    }

    #[test]
    fn contains_and_other() {
        let pair = CanonicalPair::new(player("a"), player("b")).unwrap();
        assert!(pair.contains(&player("a")));
        assert!(!pair.contains(&player("c")));
        assert_eq!(pair.other(&player("a")), Some(&player("b")));
        assert_eq!(pair.other(&player("c")), None);
    }

    #[test]
    fn matchup_display() {
        let pair = CanonicalPair::new(player("a"), player("b")).unwrap();
        let matchup = MatchupId::new(pair, 2);
        assert_eq!(matchup.to_string(), "a vs b (rematch 2)");
    }

    #[test]
    fn serde_roundtrip() {
        let pair = CanonicalPair::new(player("a"), player("b")).unwrap();
        let matchup = MatchupId::new(pair, 1);
        let json = serde_json::to_string(&matchup).unwrap();
        let parsed: MatchupId = serde_json::from_str(&json).unwrap();
        assert_eq!(matchup, parsed);
    }

    proptest! {
        #[test]
        fn canonical_pair_ignores_argument_order(a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
            prop_assume!(a != b);
            let forward = CanonicalPair::new(player(&a), player(&b)).unwrap();
            let reversed = CanonicalPair::new(player(&b), player(&a)).unwrap();
            prop_assert_eq!(&forward, &reversed);
            prop_assert!(forward.player1() < forward.player2());
        }
    }
}
