//! Joined account read model.

use serde::{Deserialize, Serialize};

use super::user::User;
use super::user_metadata::UserMetadata;

/// The joined `User` + `UserMetadata` view returned by the account store.
///
/// `find_by_email` and `find_by_id` read both rows atomically, so this
/// pair is the single source of truth for "does this account exist".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The user row
    pub user: User,

    /// The companion metadata row
    pub metadata: UserMetadata,
}

impl Account {
    /// Assemble an account from its two rows
    pub fn new(user: User, metadata: UserMetadata) -> Self {
        Self { user, metadata }
    }
}
