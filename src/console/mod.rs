//! Output sink handed to running commands.

mod sanitize;

use std::fmt::Display;

use tracing::error;

pub use sanitize::strip_escapes;

use crate::state::{Action, CommandKey, Store};

/// Writes output lines for one command into the store.
pub struct Console<'a> {
    store: &'a Store,
    key: CommandKey,
}

impl<'a> Console<'a> {
    /// Bind a console to the command entry `key`.
    pub fn new(store: &'a Store, key: CommandKey) -> Self {
        Self { store, key }
    }

    /// Emit one line of output.
    pub fn log(&self, line: impl AsRef<str>) {
        let text = strip_escapes(line.as_ref());
        if let Err(e) = self.store.dispatch(Action::AddCommandOutput {
            key: self.key,
            text,
        }) {
            error!(key = %self.key, error = %e, "failed to record command output");
        }
    }

    /// Emit several values as one space-separated line.
    pub fn log_parts<I, T>(&self, parts: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let line = parts
            .into_iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.log(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CommandEntry;

    fn store_with_command() -> (Store, CommandKey) {
        let store = Store::default();
        let key = CommandKey::pick();
        store
            .dispatch(Action::AddCommand(CommandEntry::new(key, "test")))
            .unwrap();
        (store, key)
    }

    #[test]
    fn test_log_appends_line() {
        let (store, key) = store_with_command();
        let console = Console::new(&store, key);

        console.log("hello");
        console.log(String::from("world"));

        assert_eq!(store.command(key).unwrap().unwrap().output, "hello\nworld\n");
    }

    #[test]
    fn test_log_parts_joined_by_space() {
        let (store, key) = store_with_command();
        let console = Console::new(&store, key);

        console.log_parts(["wallet", "count:", "3"]);
        console.log_parts([1, 2]);

        assert_eq!(
            store.command(key).unwrap().unwrap().output,
            "wallet count: 3\n1 2\n"
        );
    }

    #[test]
    fn test_log_strips_escapes() {
        let (store, key) = store_with_command();
        Console::new(&store, key).log("\x1b[31malice\x1b[0m");

        assert_eq!(store.command(key).unwrap().unwrap().output, "alice\n");
    }
}
