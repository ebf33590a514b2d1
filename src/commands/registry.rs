//! Name-to-command lookup table.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::{
    AccountCreate, AccountInfo, Help, Login, Logout, PasswordChange, UsernameAvailable,
    UsernameList, WalletArchive, WalletCommand, WalletCreate, WalletList,
};
use crate::error::WalletShellError;
use crate::Result;

/// Registered commands, ordered by name.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Arc<dyn WalletCommand>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Help);
        registry.register(UsernameAvailable);
        registry.register(UsernameList);
        registry.register(AccountCreate);
        registry.register(Login);
        registry.register(Logout);
        registry.register(AccountInfo);
        registry.register(PasswordChange);
        registry.register(WalletList);
        registry.register(WalletCreate);
        registry.register(WalletArchive);
        registry
    }

    /// Add a command, replacing any command with the same name.
    ///
    /// Returns the replaced command.
    pub fn register<C>(&mut self, command: C) -> Option<Arc<dyn WalletCommand>>
    where
        C: WalletCommand + 'static,
    {
        let name = command.name();
        debug!(command = name, "registering command");
        self.commands.insert(name, Arc::new(command))
    }

    /// Look up a command by name.
    pub fn find(&self, name: &str) -> Result<&dyn WalletCommand> {
        self.commands
            .get(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| WalletShellError::UnknownCommand(name.to_string()))
    }

    /// Whether a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn WalletCommand> {
        self.commands.values().map(|c| c.as_ref())
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
