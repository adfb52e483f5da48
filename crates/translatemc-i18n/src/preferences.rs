//! Per-user language preferences

use dashmap::DashMap;
use std::collections::HashMap;
use translatemc_common::UserId;

/// Concurrent map of user to selected language code.
///
/// Entries live for the lifetime of the process; nothing is evicted or
/// persisted.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    entries: DashMap<UserId, String>,
}

impl PreferenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The language selected by `user`, if any.
    pub fn get(&self, user: &UserId) -> Option<String> {
        self.entries.get(user).map(|entry| entry.value().clone())
    }

    /// Records a selection and returns the previous one.
    pub fn set(&self, user: UserId, code: impl Into<String>) -> Option<String> {
        self.entries.insert(user, code.into())
    }

    /// Whether `user` has selected a language.
    pub fn contains(&self, user: &UserId) -> bool {
        self.entries.contains_key(user)
    }

    /// Forgets every selection.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of users with a selection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no user has a selection.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point-in-time copy of all selections.
    pub fn snapshot(&self) -> HashMap<UserId, String> {
        self.entries
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use translatemc_common::test_utils::user_fixtures;

    #[test]
    fn test_set_and_get() {
        let store = PreferenceStore::new();
        let user = user_fixtures::test_user_id();

        assert_eq!(store.get(&user), None);
        assert!(!store.contains(&user));

        assert_eq!(store.set(user, "es"), None);
        assert_eq!(store.set(user, "fr"), Some("es".to_string()));
        assert_eq!(store.get(&user).as_deref(), Some("fr"));
        assert!(store.contains(&user));
    }

    #[test]
    fn test_users_are_independent() {
        let store = PreferenceStore::new();
        let users = user_fixtures::test_user_ids(3);
        store.set(users[0], "en");
        store.set(users[1], "es");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&users[1]).as_deref(), Some("es"));
        assert_eq!(store.get(&users[2]), None);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[&users[0]], "en");
    }

    #[test]
    fn test_clear() {
        let store = PreferenceStore::new();
        store.set(user_fixtures::test_user_id(), "en");
        store.clear();
        assert!(store.is_empty());
    }
}
