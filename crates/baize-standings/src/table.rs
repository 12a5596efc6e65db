use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use baize_ledger::GameRevision;
use baize_types::PlayerId;

use crate::tally::PlayerTotals;

/// One ranked entry of the league table.
///
/// `known_player` is `false` for players named by matches but missing
/// from the roster (e.g. a deleted profile); their stats still
/// accumulate and presentation substitutes a placeholder name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub player: PlayerId,
    pub known_player: bool,
    pub totals: PlayerTotals,
}

/// The league table, sorted for presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsTable {
    rows: Vec<StandingsRow>,
}

impl StandingsTable {
    /// Aggregate current matches into per-player standings.
    ///
    /// Every roster player appears, zero stats included. Aggregation is
    /// order-independent; the final sort is `points` descending, then
    /// `balls_remaining_sum` ascending, then `fouls_on_black_sum`
    /// ascending, stable so ties retain input order.
    pub fn build(roster: &[PlayerId], current_matches: &[GameRevision]) -> Self {
        let mut rows: Vec<StandingsRow> = Vec::with_capacity(roster.len());
        let mut index: HashMap<PlayerId, usize> = HashMap::with_capacity(roster.len());

        for player in roster {
            if index.contains_key(player) {
                continue;
            }
            index.insert(player.clone(), rows.len());
            rows.push(StandingsRow {
                player: player.clone(),
                known_player: true,
                totals: PlayerTotals::default(),
            });
        }

        let mut slot = |rows: &mut Vec<StandingsRow>, player: &PlayerId| -> usize {
            if let Some(&at) = index.get(player) {
                return at;
            }
            let at = rows.len();
            index.insert(player.clone(), at);
            rows.push(StandingsRow {
                player: player.clone(),
                known_player: false,
                totals: PlayerTotals::default(),
            });
            at
        };

        for game in current_matches {
            let winner = slot(&mut rows, &game.winner);
            rows[winner].totals.record_win();

            let loser = slot(&mut rows, game.loser());
            rows[loser]
                .totals
                .record_loss(game.balls_remaining, game.fouled_on_black);
        }

        rows.sort_by(|a, b| {
            b.totals
                .points()
                .cmp(&a.totals.points())
                .then_with(|| {
                    a.totals
                        .balls_remaining_sum
                        .cmp(&b.totals.balls_remaining_sum)
                })
                .then_with(|| {
                    a.totals
                        .fouls_on_black_sum
                        .cmp(&b.totals.fouls_on_black_sum)
                })
        });

        Self { rows }
    }

    pub fn rows(&self) -> &[StandingsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up one player's entry, regardless of rank.
    pub fn player(&self, id: &PlayerId) -> Option<&StandingsRow> {
        self.rows.iter().find(|row| &row.player == id)
    }
}
