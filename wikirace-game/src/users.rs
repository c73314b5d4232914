//! User registry
//!
//! Durable set of local identities plus the optional signed-in pointer.
//! Registration doubles as login: an existing username (compared
//! case-insensitively) signs that user back in instead of growing the
//! registry.

use serde::{Deserialize, Serialize};

use crate::storage::{CURRENT_USER_KEY, KeyValueStorage, USERS_KEY, load_json_or_default, save_json};

/// A locally registered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Derived from the registration timestamp.
    pub id: String,
    pub username: String,
    pub created_at: u64,
}

/// Registry of every identity plus the current-user pointer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRegistry {
    users: Vec<User>,
    current: Option<User>,
}

impl UserRegistry {
    /// Load both durable records; either degrades independently to empty.
    #[must_use]
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        Self {
            users: load_json_or_default(storage, USERS_KEY),
            current: load_json_or_default(storage, CURRENT_USER_KEY),
        }
    }

    /// Register a username, or sign in the user who already owns it.
    ///
    /// Input is trimmed; an empty name is refused with `None`. The
    /// returned user is current afterwards.
    pub fn register(
        &mut self,
        storage: &impl KeyValueStorage,
        now_ms: u64,
        username: &str,
    ) -> Option<User> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return None;
        }

        let wanted = trimmed.to_lowercase();
        if let Some(existing) = self
            .users
            .iter()
            .find(|user| user.username.to_lowercase() == wanted)
        {
            let existing = existing.clone();
            self.set_current(storage, existing.clone());
            return Some(existing);
        }

        let user = User {
            id: now_ms.to_string(),
            username: trimmed.to_string(),
            created_at: now_ms,
        };
        self.users.push(user.clone());
        if let Err(err) = save_json(storage, USERS_KEY, &self.users) {
            log::warn!("failed to save user registry: {err}");
        }
        self.set_current(storage, user.clone());
        Some(user)
    }

    /// Clear only the signed-in pointer; the registry is untouched.
    pub fn logout(&mut self, storage: &impl KeyValueStorage) {
        self.current = None;
        if let Err(err) = storage.remove(CURRENT_USER_KEY) {
            log::warn!("failed to clear current user: {err}");
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Every registered identity, in registration order.
    #[must_use]
    pub fn list_all(&self) -> &[User] {
        &self.users
    }

    fn set_current(&mut self, storage: &impl KeyValueStorage, user: User) {
        if let Err(err) = save_json(storage, CURRENT_USER_KEY, &user) {
            log::warn!("failed to save current user: {err}");
        }
        self.current = Some(user);
    }
}
