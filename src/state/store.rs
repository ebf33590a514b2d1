//! Application store: the single owner of [`AppState`].

use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::{Action, AppState, CommandEntry, CommandKey};
use crate::error::WalletShellError;
use crate::session::{SessionSettings, SharedSession};
use crate::Result;

/// Capacity of the listener channel.
const EVENT_CAPACITY: usize = 256;

/// Thread-safe store that applies actions and broadcasts them.
pub struct Store {
    state: RwLock<AppState>,
    events: broadcast::Sender<Action>,
}

impl Store {
    /// Create a store with an empty state.
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_state(AppState::new(settings))
    }

    /// Create a store from an existing state.
    pub fn with_state(state: AppState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(state),
            events,
        }
    }

    /// Apply an action and notify listeners.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        {
            let mut state = self
                .state
                .write()
                .map_err(|_| WalletShellError::LockPoisoned)?;
            state.reduce(&action);
        }

        match action.key() {
            Some(key) => trace!(key = %key, ?action, "dispatched"),
            None => debug!("dispatched session or history update"),
        }

        // No listeners is fine.
        let _ = self.events.send(action);
        Ok(())
    }

    /// Receive every action dispatched from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.events.subscribe()
    }

    /// Current session, if one has been created.
    pub fn session(&self) -> Result<Option<SharedSession>> {
        let state = self
            .state
            .read()
            .map_err(|_| WalletShellError::LockPoisoned)?;
        Ok(state.session.clone())
    }

    /// Current session settings.
    pub fn settings(&self) -> Result<SessionSettings> {
        let state = self
            .state
            .read()
            .map_err(|_| WalletShellError::LockPoisoned)?;
        Ok(state.settings.clone())
    }

    /// Clone one command entry.
    pub fn command(&self, key: CommandKey) -> Result<Option<CommandEntry>> {
        let state = self
            .state
            .read()
            .map_err(|_| WalletShellError::LockPoisoned)?;
        Ok(state.command(key).cloned())
    }

    /// Number of command entries held.
    pub fn count(&self) -> usize {
        self.state.read().map(|s| s.commands.len()).unwrap_or(0)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CommandStatus;

    #[test]
    fn test_dispatch_updates_state() {
        let store = Store::default();
        let key = CommandKey::pick();

        store
            .dispatch(Action::AddCommand(CommandEntry::new(key, "help")))
            .unwrap();
        store
            .dispatch(Action::AddCommandOutput {
                key,
                text: "hello".into(),
            })
            .unwrap();

        let entry = store.command(key).unwrap().unwrap();
        assert_eq!(entry.output, "hello\n");
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_subscribers_see_actions_in_order() {
        let store = Store::default();
        let mut rx = store.subscribe();
        let key = CommandKey::pick();

        store
            .dispatch(Action::AddCommand(CommandEntry::new(key, "help")))
            .unwrap();
        store
            .dispatch(Action::FinishCommand { key, success: true })
            .unwrap();

        assert!(matches!(rx.try_recv().unwrap(), Action::AddCommand(_)));
        assert!(matches!(
            rx.try_recv().unwrap(),
            Action::FinishCommand { success: true, .. }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let store = Store::default();
        assert!(store.dispatch(Action::ClearCommands).is_ok());
    }

    #[test]
    fn test_session_initially_absent() {
        let store = Store::default();
        assert!(store.session().unwrap().is_none());
    }

    #[test]
    fn test_concurrent_dispatch() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(Store::default());
        let mut handles = vec![];

        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let key = CommandKey::pick();
                store
                    .dispatch(Action::AddCommand(CommandEntry::new(key, "help")))
                    .unwrap();
                store
                    .dispatch(Action::FinishCommand { key, success: true })
                    .unwrap();
                key
            }));
        }

        let keys: Vec<CommandKey> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(store.count(), 50);
        for key in keys {
            let entry = store.command(key).unwrap().unwrap();
            assert_eq!(entry.status, CommandStatus::Succeeded);
        }
    }
}
