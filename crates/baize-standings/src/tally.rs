use std::fmt;

use serde::{Deserialize, Serialize};

/// Running totals for one player, accumulated from current matches.
///
/// `balls_remaining_sum` and `fouls_on_black_sum` are loser-side stats
/// by league convention: they accumulate onto the losing player only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub wins: u32,
    pub losses: u32,
    pub balls_remaining_sum: u32,
    pub fouls_on_black_sum: u32,
}

impl PlayerTotals {
    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    pub fn record_loss(&mut self, balls_remaining: u8, fouled_on_black: bool) {
        self.losses += 1;
        self.balls_remaining_sum += u32::from(balls_remaining);
        if fouled_on_black {
            self.fouls_on_black_sum += 1;
        }
    }

    /// League points: 3 per win, 1 per loss, minus 1 per foul on the
    /// black. Can go negative.
    pub fn points(&self) -> i64 {
        i64::from(self.wins) * 3 + i64::from(self.losses) - i64::from(self.fouls_on_black_sum)
    }

    pub fn played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn ratio(&self) -> Ratio {
        if self.losses > 0 {
            Ratio::Finite(f64::from(self.wins) / f64::from(self.losses))
        } else if self.wins > 0 {
            Ratio::Infinite
        } else {
            Ratio::Zero
        }
    }
}

/// Win:loss ratio with an explicit undefeated sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Ratio {
    Zero,
    Finite(f64),
    Infinite,
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Zero => write!(f, "0.00"),
            Ratio::Finite(value) => write!(f, "{value:.2}"),
            Ratio::Infinite => write!(f, "∞"),
        }
    }
}
