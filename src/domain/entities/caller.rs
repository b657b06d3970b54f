//! Identity of the actor behind a request.

use std::fmt;

/// Internal user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The resolved caller of a request.
///
/// Resolved once per request from the bearer credential. A missing or
/// unverifiable credential yields [`CallerIdentity::Anonymous`], never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallerIdentity {
    #[default]
    Anonymous,
    User(UserId),
}

impl CallerIdentity {
    /// Returns the user ID for authenticated callers.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns true if the caller is authenticated as `owner`.
    ///
    /// An anonymous caller never owns anything, even content without an owner.
    pub fn is_owner_of(&self, owner: Option<UserId>) -> bool {
        match (self, owner) {
            (Self::User(id), Some(owner)) => *id == owner,
            _ => false,
        }
    }
}

impl From<UserId> for CallerIdentity {
    fn from(id: UserId) -> Self {
        Self::User(id)
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("anonymous"),
            Self::User(id) => write!(f, "user:{id}"),
        }
    }
}
