//! Command registry and the built-in wallet commands.
//!
//! Every command implements [`WalletCommand`]: a name, a one-line usage
//! synopsis, help text, login requirements, and an async `invoke`.
//!
//! # Example
//!
//! ```no_run
//! use wallet_shell::commands::{CommandRegistry, WalletCommand};
//!
//! let registry = CommandRegistry::with_builtins();
//! let login = registry.find("login").unwrap();
//! assert_eq!(login.usage(), "<username> <password>");
//! ```

mod account;
mod help;
mod registry;
mod wallet;

use async_trait::async_trait;

pub use account::{
    AccountCreate, AccountInfo, Login, Logout, PasswordChange, UsernameAvailable, UsernameList,
};
pub use help::Help;
pub use registry::CommandRegistry;
pub use wallet::{WalletArchive, WalletCreate, WalletList};

use crate::console::Console;
use crate::error::WalletShellError;
use crate::session::{Account, Session};
use crate::Result;

/// Message shown when a command needs a logged-in account.
pub const LOGIN_REQUIRED: &str = "Please log in first";

/// Everything a command can touch while it runs.
pub struct Invocation<'a> {
    /// Output sink for this command.
    pub console: &'a Console<'a>,
    /// The wallet session.
    pub session: &'a mut Session,
    /// Registry the command was found in.
    pub registry: &'a CommandRegistry,
}

/// A command the shell can run.
#[async_trait]
pub trait WalletCommand: Send + Sync {
    /// Name typed to invoke the command.
    fn name(&self) -> &'static str;

    /// Argument synopsis, e.g. `<username> <password>`.
    fn usage(&self) -> &'static str {
        ""
    }

    /// One-line description.
    fn help(&self) -> &'static str;

    /// Requires a logged-in session.
    fn needs_login(&self) -> bool {
        false
    }

    /// Requires an account to operate on.
    fn needs_account(&self) -> bool {
        false
    }

    /// Run the command.
    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()>;

    /// Whether the runner must see a logged-in account first.
    fn requires_account(&self) -> bool {
        self.needs_login() || self.needs_account()
    }

    /// Build a usage error for this command.
    fn usage_error(&self, message: &str) -> WalletShellError {
        WalletShellError::usage(self.name(), self.usage(), message)
    }

    /// Fail unless `min <= args.len() <= max`.
    fn check_args(&self, args: &[String], min: usize, max: usize) -> Result<()> {
        if args.len() < min || args.len() > max {
            Err(self.usage_error("Wrong number of arguments"))
        } else {
            Ok(())
        }
    }
}

/// The logged-in account, or the standard login usage error.
fn logged_in(cmd: &dyn WalletCommand, session: &Session) -> Result<Account> {
    session
        .account
        .clone()
        .ok_or_else(|| cmd.usage_error(LOGIN_REQUIRED))
}
