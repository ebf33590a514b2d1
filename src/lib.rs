//! # wallet-shell
//!
//! Interactive wallet command shell.
//!
//! Each line of text is tokenized, looked up in a [`CommandRegistry`] and
//! run against a lazily created wallet [`Session`]. Everything a command
//! does that the user can see is recorded as an [`Action`] on a single
//! [`Store`], which applies it to the [`AppState`] and broadcasts it to
//! listeners such as the terminal renderer.
//!
//! ## Features
//!
//! - **Unidirectional state**: one store, one reducer, broadcast listeners
//! - **Lazy sessions**: in-memory or on-disk storage chosen by settings
//! - **Command registry**: built-in account and wallet commands, extensible
//!
//! ## Quick Start
//!
//! ```no_run
//! use wallet_shell::{run_command, CommandRegistry, SessionSettings, Store};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Store::new(SessionSettings {
//!         fake_server: true,
//!         ..Default::default()
//!     });
//!     let registry = CommandRegistry::with_builtins();
//!
//!     let key = run_command(&store, &registry, "account-create alice secret").await;
//!     let entry = store.command(key).unwrap().unwrap();
//!     print!("{}", entry.output);
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod parse;
pub mod render;
pub mod runner;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use commands::{CommandRegistry, Invocation, WalletCommand};
pub use console::Console;
pub use error::{Result, WalletShellError};
pub use parse::{parse, ParsedCommand};
pub use runner::{ensure_session, format_error, run_command};
pub use session::{Account, Session, SessionSettings, SharedSession, WalletContext, WalletIo};
pub use state::{Action, AppState, CommandEntry, CommandKey, CommandStatus, Store};
