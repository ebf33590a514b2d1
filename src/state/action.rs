//! Actions and the reducer that applies them.

use tracing::warn;

use super::{CommandKey, CommandStatus};
use crate::session::{SessionSettings, SharedSession};

/// One command as recorded in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    /// Key this entry is addressed by.
    pub key: CommandKey,
    /// Text the user typed.
    pub command: String,
    /// Accumulated output, one `\n`-terminated line per console write.
    pub output: String,
    /// Current status.
    pub status: CommandStatus,
}

impl CommandEntry {
    /// Create a running entry with no output.
    pub fn new(key: CommandKey, command: impl Into<String>) -> Self {
        Self {
            key,
            command: command.into(),
            output: String::new(),
            status: CommandStatus::Running,
        }
    }

    /// Output lines written so far.
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines()
    }
}

/// State updates. The store applies nothing except these.
#[derive(Debug, Clone)]
pub enum Action {
    /// Append a new command entry.
    AddCommand(CommandEntry),
    /// Append one line of output to a command.
    AddCommandOutput { key: CommandKey, text: String },
    /// Mark a command finished.
    FinishCommand { key: CommandKey, success: bool },
    /// Install the wallet session.
    UpdateSession(SharedSession),
    /// Drop every finished command entry.
    ClearCommands,
}

impl Action {
    /// Key of the command this action targets, if any.
    pub fn key(&self) -> Option<CommandKey> {
        match self {
            Action::AddCommand(entry) => Some(entry.key),
            Action::AddCommandOutput { key, .. } | Action::FinishCommand { key, .. } => Some(*key),
            Action::UpdateSession(_) | Action::ClearCommands => None,
        }
    }
}

/// Complete application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Wallet session, created lazily by the first command.
    pub session: Option<SharedSession>,
    /// Settings used to create the session.
    pub settings: SessionSettings,
    /// Command history, oldest first.
    pub commands: Vec<CommandEntry>,
    /// Maximum number of entries retained, if bounded.
    pub history_limit: Option<usize>,
}

impl AppState {
    /// Create an empty state with the given settings.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Bound the command history.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    /// Look up a command entry by key.
    pub fn command(&self, key: CommandKey) -> Option<&CommandEntry> {
        self.commands.iter().find(|e| e.key == key)
    }

    fn command_mut(&mut self, key: CommandKey) -> Option<&mut CommandEntry> {
        self.commands.iter_mut().find(|e| e.key == key)
    }

    /// Apply one action.
    ///
    /// Actions addressed to unknown keys and illegal status transitions
    /// leave the state untouched.
    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::AddCommand(entry) => {
                self.commands.push(entry.clone());
                self.evict_finished();
            }
            Action::AddCommandOutput { key, text } => match self.command_mut(*key) {
                Some(entry) => {
                    entry.output.push_str(text);
                    entry.output.push('\n');
                }
                None => warn!(key = %key, "output for unknown command dropped"),
            },
            Action::FinishCommand { key, success } => {
                match self.command_mut(*key) {
                    Some(entry) => {
                        if let Err(e) = entry.status.transition_to(CommandStatus::finished(*success)) {
                            warn!(key = %key, error = %e, "ignoring finish");
                        }
                    }
                    None => warn!(key = %key, "finish for unknown command dropped"),
                }
                self.evict_finished();
            }
            Action::UpdateSession(session) => {
                self.session = Some(session.clone());
            }
            Action::ClearCommands => {
                self.commands.retain(|e| !e.status.is_finished());
            }
        }
    }

    fn evict_finished(&mut self) {
        let Some(limit) = self.history_limit else {
            return;
        };
        while self.commands.len() > limit {
            match self.commands.iter().position(|e| e.status.is_finished()) {
                Some(index) => {
                    self.commands.remove(index);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(state: &mut AppState, text: &str) -> CommandKey {
        let key = CommandKey::pick();
        state.reduce(&Action::AddCommand(CommandEntry::new(key, text)));
        key
    }

    #[test]
    fn test_add_command() {
        let mut state = AppState::default();
        let key = add(&mut state, "help");

        let entry = state.command(key).unwrap();
        assert_eq!(entry.command, "help");
        assert_eq!(entry.output, "");
        assert_eq!(entry.status, CommandStatus::Running);
    }

    #[test]
    fn test_output_appends_lines() {
        let mut state = AppState::default();
        let key = add(&mut state, "help");

        state.reduce(&Action::AddCommandOutput {
            key,
            text: "first".into(),
        });
        state.reduce(&Action::AddCommandOutput {
            key,
            text: "second".into(),
        });

        let entry = state.command(key).unwrap();
        assert_eq!(entry.output, "first\nsecond\n");
        assert_eq!(entry.output_lines().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_finish_command() {
        let mut state = AppState::default();
        let ok = add(&mut state, "help");
        let bad = add(&mut state, "nope");

        state.reduce(&Action::FinishCommand { key: ok, success: true });
        state.reduce(&Action::FinishCommand {
            key: bad,
            success: false,
        });

        assert_eq!(state.command(ok).unwrap().status, CommandStatus::Succeeded);
        assert_eq!(state.command(bad).unwrap().status, CommandStatus::Failed);
    }

    #[test]
    fn test_second_finish_ignored() {
        let mut state = AppState::default();
        let key = add(&mut state, "help");

        state.reduce(&Action::FinishCommand { key, success: true });
        state.reduce(&Action::FinishCommand {
            key,
            success: false,
        });

        assert_eq!(state.command(key).unwrap().status, CommandStatus::Succeeded);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut state = AppState::default();
        add(&mut state, "help");
        let before = state.commands.clone();

        let ghost = CommandKey::from_raw(u64::MAX);
        state.reduce(&Action::AddCommandOutput {
            key: ghost,
            text: "boo".into(),
        });
        state.reduce(&Action::FinishCommand {
            key: ghost,
            success: true,
        });

        assert_eq!(state.commands, before);
    }

    #[test]
    fn test_clear_keeps_running() {
        let mut state = AppState::default();
        let done = add(&mut state, "help");
        let running = add(&mut state, "login");
        state.reduce(&Action::FinishCommand {
            key: done,
            success: true,
        });

        state.reduce(&Action::ClearCommands);

        assert!(state.command(done).is_none());
        assert!(state.command(running).is_some());
    }

    #[test]
    fn test_history_limit_evicts_oldest_finished() {
        let mut state = AppState::default().with_history_limit(Some(2));
        let running = add(&mut state, "slow");
        let first = add(&mut state, "one");
        state.reduce(&Action::FinishCommand {
            key: first,
            success: true,
        });
        let second = add(&mut state, "two");

        assert_eq!(state.commands.len(), 2);
        assert!(state.command(running).is_some());
        assert!(state.command(first).is_none());
        assert!(state.command(second).is_some());
    }

    #[test]
    fn test_history_limit_never_evicts_running() {
        let mut state = AppState::default().with_history_limit(Some(1));
        add(&mut state, "a");
        add(&mut state, "b");
        assert_eq!(state.commands.len(), 2);
    }

    #[test]
    fn test_action_key() {
        let key = CommandKey::pick();
        assert_eq!(Action::FinishCommand { key, success: true }.key(), Some(key));
        assert_eq!(Action::ClearCommands.key(), None);
    }
}
