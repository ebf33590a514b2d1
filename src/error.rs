//! Error types for wallet-shell.

use thiserror::Error;

use crate::state::CommandStatus;

/// Main error type for wallet-shell operations.
#[derive(Error, Debug)]
pub enum WalletShellError {
    /// A command was invoked incorrectly.
    #[error("{message}")]
    Usage {
        /// Name of the offending command.
        command: String,
        /// Argument synopsis for the command.
        usage: String,
        /// What went wrong.
        message: String,
    },

    /// No command is registered under the given name.
    #[error("no command named '{0}'")]
    UnknownCommand(String),

    /// The command text could not be tokenized.
    #[error("parse error: {0}")]
    Parse(String),

    /// Username does not satisfy the naming rules.
    #[error("invalid username '{0}': use 3 or more of a-z, 0-9, '.', '_' or '-'")]
    InvalidUsername(String),

    /// An account with this username already exists.
    #[error("username already exists: {0}")]
    UsernameTaken(String),

    /// No account with this username exists.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Password did not match the login record.
    #[error("invalid password")]
    InvalidPassword,

    /// No wallet with this id exists on the account.
    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    /// Storage key escapes the backend root or is otherwise malformed.
    #[error("invalid storage key: {0}")]
    InvalidStorageKey(String),

    /// Command key text could not be parsed.
    #[error("invalid command key: {0}")]
    InvalidCommandKey(String),

    /// Invalid command status transition attempted.
    #[error("invalid status transition from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: CommandStatus,
        to: CommandStatus,
    },

    /// I/O error in a storage backend.
    #[error("storage I/O failed")]
    Io(#[from] std::io::Error),

    /// A stored record could not be (de)serialized.
    #[error("malformed stored record")]
    Json(#[from] serde_json::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

impl WalletShellError {
    /// Build a usage error for the named command.
    pub fn usage(
        command: impl Into<String>,
        usage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Usage {
            command: command.into(),
            usage: usage.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a named, user-facing failure.
    ///
    /// Named errors are shown to the user as their message alone.
    /// Everything else is an internal failure and gets its cause chain.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::Io(_) | Self::Json(_) | Self::LockPoisoned | Self::InvalidStatusTransition { .. }
        )
    }
}

/// Convenience Result type for wallet-shell operations.
pub type Result<T> = std::result::Result<T, WalletShellError>;
