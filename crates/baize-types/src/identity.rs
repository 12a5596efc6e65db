use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::player::PlayerId;

/// Access level of an actor at the service boundary.
///
/// Session handling (OAuth, tokens) is an external collaborator; by the
/// time a request reaches the ledger it has been reduced to an identity
/// and one of these roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Anonymous,
    Member,
    Admin,
}

impl Role {
    /// Member-level access or better.
    pub fn is_member(&self) -> bool {
        matches!(self, Role::Member | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anonymous" => Ok(Role::Anonymous),
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            other => Err(TypeError::UnknownRole(other.to_string())),
        }
    }
}

/// An authenticated (or anonymous) actor.
///
/// Actors share the player identifier space: the author recorded on a
/// revision is the acting member's player id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub actor: PlayerId,
    pub role: Role,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            actor: PlayerId::from_raw("anonymous"),
            role: Role::Anonymous,
        }
    }

    pub fn member(actor: PlayerId) -> Self {
        Self {
            actor,
            role: Role::Member,
        }
    }

    pub fn admin(actor: PlayerId) -> Self {
        Self {
            actor,
            role: Role::Admin,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.actor, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_levels() {
        assert!(!Role::Anonymous.is_member());
        assert!(Role::Member.is_member());
        assert!(!Role::Member.is_admin());
        assert!(Role::Admin.is_member());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("member".parse::<Role>().unwrap(), Role::Member);
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(TypeError::UnknownRole(_))
        ));
    }

    #[test]
    fn identity_constructors() {
        let anon = Identity::anonymous();
        assert_eq!(anon.role, Role::Anonymous);
        assert_eq!(anon.actor.as_str(), "anonymous");

        let member = Identity::member(PlayerId::new("p1").unwrap());
        assert_eq!(member.role, Role::Member);

        let admin = Identity::admin(PlayerId::new("root").unwrap());
        assert!(admin.role.is_admin());
    }
}
