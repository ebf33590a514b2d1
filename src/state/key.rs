//! Command key type.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::WalletShellError;

/// Global counter for command key generation.
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique key identifying one command entry in the store.
///
/// Keys come from an atomic counter, so they are unique within a single
/// process lifetime. The key is displayed as `cmd-XXXXXXXX` where X is a
/// hexadecimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandKey(u64);

impl CommandKey {
    /// Pick a fresh command key.
    pub fn pick() -> Self {
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create a CommandKey from a raw u64 value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmd-{:08x}", self.0)
    }
}

impl FromStr for CommandKey {
    type Err = WalletShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("cmd-")
            .and_then(|hex| u64::from_str_radix(hex, 16).ok())
            .map(CommandKey)
            .ok_or_else(|| WalletShellError::InvalidCommandKey(s.into()))
    }
}
