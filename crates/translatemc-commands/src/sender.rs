//! Who is running a command

use std::collections::HashSet;
use translatemc_common::UserId;

/// Permission required for `translate reload`.
pub const RELOAD_PERMISSION: &str = "translatemc.admin.reload";

/// The host's view of whoever issued a command.
#[cfg_attr(test, mockall::automock)]
pub trait CommandSender: Send + Sync {
    /// The user behind the sender, or `None` for consoles and automation.
    fn user_id(&self) -> Option<UserId>;

    /// Whether the sender holds `permission`.
    fn has_permission(&self, permission: &str) -> bool;
}

/// A connected user with an explicit permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: UserId,
    permissions: HashSet<String>,
}

impl Player {
    /// A player without permissions.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            permissions: HashSet::new(),
        }
    }

    /// Grants a permission.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// The player's id.
    pub const fn id(&self) -> UserId {
        self.id
    }
}

impl CommandSender for Player {
    fn user_id(&self) -> Option<UserId> {
        Some(self.id)
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// The server console: every permission, no user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl CommandSender for Console {
    fn user_id(&self) -> Option<UserId> {
        None
    }

    fn has_permission(&self, _permission: &str) -> bool {
        true
    }
}
