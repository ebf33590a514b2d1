//! Tokenizer for command text.
//!
//! Words are split with POSIX shell rules via `shlex`: whitespace
//! separates words, single quotes are literal, double quotes honour `\"`
//! and `\\`, and a bare backslash escapes the next character. A word
//! starting with `#` begins a comment.

use crate::error::WalletShellError;
use crate::Result;

/// A tokenized command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command name, or `None` for blank input.
    pub exec: Option<String>,
    /// Remaining words.
    pub args: Vec<String>,
}

/// Split `text` into a command name and arguments.
pub fn parse(text: &str) -> Result<ParsedCommand> {
    let words = shlex::split(text).ok_or_else(|| {
        WalletShellError::Parse("unterminated quote or trailing backslash".into())
    })?;

    let mut words = words.into_iter();
    Ok(ParsedCommand {
        exec: words.next(),
        args: words.collect(),
    })
}
