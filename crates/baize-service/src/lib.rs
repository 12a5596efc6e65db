//! Service boundary for Baize.
//!
//! The surrounding HTTP layer (an external collaborator, along with
//! session handling and page rendering) maps endpoints onto
//! [`LeagueService`] operations. This crate owns everything between the
//! two: role gating, roster checks, and the wiring of ledger writes to
//! projections and standings.

pub mod config;
pub mod error;
pub mod roster;
pub mod service;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use roster::{InMemoryRoster, RosterProvider};
pub use service::LeagueService;

// Re-export key types for embedders
pub use baize_ledger::{GameRevision, ImportRow, IngestReport, MatchOutcome};
pub use baize_standings::StandingsTable;
pub use baize_types::{Identity, MatchupId, PlayerId, Role};
