//! Command dispatch: turns one line of text into a sequence of store actions.

use std::error::Error as _;
use std::sync::Arc;

use tracing::{debug, error};

use crate::commands::{CommandRegistry, Invocation, LOGIN_REQUIRED};
use crate::console::Console;
use crate::error::WalletShellError;
use crate::parse::parse;
use crate::session::{Session, SessionSettings, SharedSession};
use crate::state::{Action, CommandEntry, CommandKey, Store};
use crate::Result;

/// Command run when the text names none.
pub const DEFAULT_COMMAND: &str = "help";

/// Run one line of command text.
///
/// Adds a command entry to the store, executes the command, and finishes
/// the entry. Every failure is reported as output on the entry, so this
/// never fails. Returns the key of the new entry.
pub async fn run_command(store: &Store, registry: &CommandRegistry, text: &str) -> CommandKey {
    let key = CommandKey::pick();
    record(store, Action::AddCommand(CommandEntry::new(key, text)));

    match execute(store, registry, key, text).await {
        Ok(()) => {
            record(store, Action::FinishCommand { key, success: true });
        }
        Err(e) => {
            debug!(key = %key, error = %e, "command failed");
            Console::new(store, key).log(format_error(&e));
            record(store, Action::FinishCommand { key, success: false });
        }
    }
    key
}

async fn execute(
    store: &Store,
    registry: &CommandRegistry,
    key: CommandKey,
    text: &str,
) -> Result<()> {
    let shared = ensure_session(store, store.session()?, &store.settings()?).await?;

    let parsed = parse(text)?;
    let name = parsed
        .exec
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_COMMAND);
    let cmd = registry.find(name)?;
    debug!(key = %key, command = cmd.name(), args = parsed.args.len(), "running command");

    let mut session = shared.lock().await;
    if cmd.requires_account() && !session.is_logged_in() {
        return Err(cmd.usage_error(LOGIN_REQUIRED));
    }

    let console = Console::new(store, key);
    let inv = Invocation {
        console: &console,
        session: &mut *session,
        registry,
    };
    cmd.invoke(inv, &parsed.args).await
}

/// Return the existing session, or create and install one.
///
/// Fake-server settings get an in-memory session built on the spot;
/// otherwise a disk-backed session is opened under the data directory.
/// A newly built session is dispatched to the store before returning.
pub async fn ensure_session(
    store: &Store,
    session: Option<SharedSession>,
    settings: &SessionSettings,
) -> Result<SharedSession> {
    if let Some(session) = session {
        return Ok(session);
    }

    let session = if settings.fake_server {
        Session::fake(settings)
    } else {
        Session::open_disk(settings).await?
    }
    .into_shared();

    store.dispatch(Action::UpdateSession(Arc::clone(&session)))?;
    Ok(session)
}

/// Render an error as command output.
///
/// Named errors show their message; usage errors add the command's
/// synopsis. Internal errors list their cause chain instead.
pub fn format_error(err: &WalletShellError) -> String {
    match err {
        WalletShellError::Usage {
            command,
            usage,
            message,
        } => format!("{}\nUsage: {} {}", message, command, usage)
            .trim_end()
            .to_string(),
        e if e.is_user_facing() => e.to_string(),
        e => {
            let mut out = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                out.push_str("\n  caused by: ");
                out.push_str(&cause.to_string());
                source = cause.source();
            }
            out
        }
    }
}

fn record(store: &Store, action: Action) {
    if let Err(e) = store.dispatch(action) {
        error!(error = %e, "failed to dispatch action");
    }
}
