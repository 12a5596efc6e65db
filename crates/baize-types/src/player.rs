use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque external identifier for a league player.
///
/// Player profiles live in an external user store; the ledger only ever
/// sees this identifier and treats it as an opaque foreign key with no
/// referential integrity. Historic revisions keep naming a player after
/// the profile is deleted.
///
/// The `Ord` impl is the total order used for pair canonicalization.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId {
    id: String,
}

impl PlayerId {
    /// Create a player identifier, rejecting empty input.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyPlayerId);
        }
        Ok(Self { id })
    }

    /// Create from a raw identifier without validation. Use `new()` for
    /// caller-supplied input.
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
