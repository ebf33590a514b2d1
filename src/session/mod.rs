//! Wallet session management.
//!
//! A [`Session`] pairs a storage backend with a [`WalletContext`] and
//! remembers which account, if any, is logged in. The shell creates one
//! lazily and shares it between commands as a [`SharedSession`].

mod context;
mod io;
mod settings;

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

pub use context::{normalize_username, Account, ContextOptions, WalletContext, WalletInfo};
pub use io::{validate_key, DiskIo, MemoryIo, WalletIo};
pub use settings::SessionSettings;

use crate::Result;

/// Session handle shared between the store and running commands.
pub type SharedSession = Arc<Mutex<Session>>;

/// A storage backend, the context built over it, and the login state.
pub struct Session {
    /// Storage backend.
    pub io: Arc<dyn WalletIo>,
    /// Account and wallet operations.
    pub context: WalletContext,
    /// Logged-in account.
    pub account: Option<Account>,
}

impl Session {
    /// Create a logged-out session over `io`.
    pub fn new(io: Arc<dyn WalletIo>, options: ContextOptions) -> Self {
        let context = WalletContext::new(options, Arc::clone(&io));
        Self {
            io,
            context,
            account: None,
        }
    }

    /// Build a session whose state lives only in memory.
    pub fn fake(settings: &SessionSettings) -> Self {
        info!("creating in-memory session");
        Self::new(Arc::new(MemoryIo::new()), settings.context_options())
    }

    /// Build a session persisted under the configured data directory.
    pub async fn open_disk(settings: &SessionSettings) -> Result<Self> {
        let root = settings.resolved_data_dir();
        info!(root = %root.display(), "creating disk session");
        let io = DiskIo::open(root).await?;
        Ok(Self::new(Arc::new(io), settings.context_options()))
    }

    /// Whether an account is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.account.is_some()
    }

    /// Wrap for sharing.
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("io", &self.io.kind())
            .field(
                "account",
                &self.account.as_ref().map(|a| a.username.as_str()),
            )
            .finish()
    }
}
