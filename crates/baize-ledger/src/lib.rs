//! Append-only game-revision ledger for Baize.
//!
//! This crate is the heart of Baize. It provides:
//! - Game revision records keyed by `(canonical pair, rematch, revision)`
//! - `RevisionWriter` / `RevisionReader` trait boundaries
//! - `InMemoryLedger` implementation for tests and embedding
//! - Projections for current state and the audit trail
//! - Bulk ingestion with intra-batch sequence serialization
//! - Ledger validation (gapless sequences, canonical pairs, attribution)
//!
//! A match is never edited in place: every edit appends a new revision
//! with the next `revision_seq` for its matchup, and the current state of
//! a matchup is the revision with the highest `revision_seq`. Superseded
//! revisions stay readable through the audit trail until a full
//! administrative reset.

pub mod error;
pub mod ingest;
pub mod memory;
pub mod projection;
pub mod records;
pub mod traits;
pub mod validation;

pub use error::LedgerError;
pub use ingest::{BulkImporter, ImportRow, IngestReport};
pub use memory::{InMemoryLedger, MAX_SEQUENCE_RETRIES};
pub use projection::{AuditEntry, ProjectionBuilder};
pub use records::{GameRevision, MatchOutcome};
pub use traits::{RevisionReader, RevisionWriter};
pub use validation::{LedgerValidator, ValidationReport, Violation, ViolationKind};
