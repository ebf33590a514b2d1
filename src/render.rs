//! Terminal rendering of finished commands.

use std::io::Write;

use tracing::warn;

use crate::state::{CommandKey, Store};
use crate::Result;

/// Write the full output of command `key` to `out`.
///
/// Output is read from the stored entry, so every line the command
/// produced is shown no matter how many there were. An entry that is no
/// longer in the history renders nothing.
pub fn render_command<W: Write>(store: &Store, key: CommandKey, out: &mut W) -> Result<()> {
    match store.command(key)? {
        Some(entry) => out.write_all(entry.output.as_bytes())?,
        None => warn!(key = %key, "command left history before rendering"),
    }
    out.flush()?;
    Ok(())
}
