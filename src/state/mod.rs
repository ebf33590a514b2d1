//! Command store.
//!
//! All state the shell exposes lives in one [`AppState`] owned by a
//! [`Store`]. Nothing mutates it directly: callers dispatch [`Action`]s,
//! the store reduces them and re-broadcasts them to listeners such as the
//! terminal renderer.

mod action;
mod key;
mod status;
mod store;

pub use action::{Action, AppState, CommandEntry};
pub use key::CommandKey;
pub use status::CommandStatus;
pub use store::Store;
