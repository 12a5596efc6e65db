//! Foundation types for Baize, the league game-revision ledger.
//!
//! This crate provides the identity, keying, and temporal types used
//! throughout the Baize system. Every other Baize crate depends on
//! `baize-types`.
//!
//! # Key Types
//!
//! - [`PlayerId`] — Opaque external identifier for a league player
//! - [`CanonicalPair`] — Order-independent pair of distinct players
//! - [`MatchupId`] — Canonical pair plus rematch ordinal; the ledger key
//! - [`LedgerStamp`] / [`LedgerClock`] — Strictly monotonic insertion stamps
//! - [`Identity`] / [`Role`] — Authenticated actor identity consumed at the
//!   service boundary

pub mod error;
pub mod identity;
pub mod matchup;
pub mod player;
pub mod stamp;

pub use error::TypeError;
pub use identity::{Identity, Role};
pub use matchup::{CanonicalPair, MatchupId};
pub use player::PlayerId;
pub use stamp::{LedgerClock, LedgerStamp};
