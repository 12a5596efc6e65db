use std::sync::RwLock;

use baize_types::PlayerId;

use crate::error::ServiceError;

/// Read access to the league roster.
///
/// Player profiles are owned by an external user store; the service only
/// needs membership checks and the id list for standings. Revision
/// history holds roster ids as opaque foreign keys, so removing a player
/// here never touches the ledger.
pub trait RosterProvider: Send + Sync {
    /// All known player identifiers.
    fn players(&self) -> Result<Vec<PlayerId>, ServiceError>;

    /// Whether `id` is a known player.
    fn contains(&self, id: &PlayerId) -> Result<bool, ServiceError> {
        Ok(self.players()?.iter().any(|p| p == id))
    }
}

/// An in-memory roster for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    players: RwLock<Vec<PlayerId>>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(players: Vec<PlayerId>) -> Self {
        Self {
            players: RwLock::new(players),
        }
    }

    /// Add a player; duplicates are ignored.
    pub fn add(&self, id: PlayerId) -> Result<(), ServiceError> {
        let mut players = self
            .players
            .write()
            .map_err(|_| ServiceError::RosterUnavailable("roster lock poisoned".into()))?;
        if !players.contains(&id) {
            players.push(id);
        }
        Ok(())
    }

    /// Remove a player. Returns `true` if they were on the roster.
    pub fn remove(&self, id: &PlayerId) -> Result<bool, ServiceError> {
        let mut players = self
            .players
            .write()
            .map_err(|_| ServiceError::RosterUnavailable("roster lock poisoned".into()))?;
        let before = players.len();
        players.retain(|p| p != id);
        Ok(players.len() < before)
    }
}

impl RosterProvider for InMemoryRoster {
    fn players(&self) -> Result<Vec<PlayerId>, ServiceError> {
        let players = self
            .players
            .read()
            .map_err(|_| ServiceError::RosterUnavailable("roster lock poisoned".into()))?;
        Ok(players.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    #[test]
    fn add_and_contains() {
        let roster = InMemoryRoster::new();
        roster.add(player("p1")).unwrap();
        roster.add(player("p1")).unwrap();

        assert!(roster.contains(&player("p1")).unwrap());
        assert!(!roster.contains(&player("p2")).unwrap());
        assert_eq!(roster.players().unwrap().len(), 1);
    }

    #[test]
    fn remove_reports_membership() {
        let roster = InMemoryRoster::with_players(vec![player("p1"), player("p2")]);
        assert!(roster.remove(&player("p1")).unwrap());
        assert!(!roster.remove(&player("p1")).unwrap());
        assert_eq!(roster.players().unwrap(), vec![player("p2")]);
    }
}
