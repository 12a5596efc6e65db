//! Standings aggregation for Baize.
//!
//! Folds the set of *current* matches (latest revision per matchup) into
//! per-player totals and the league table. Superseded revisions never
//! contribute; editing a match re-aggregates through its latest revision
//! only.

pub mod table;
pub mod tally;

pub use table::{StandingsRow, StandingsTable};
pub use tally::{PlayerTotals, Ratio};
