//! Storage backends a wallet context persists through.

use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::error::WalletShellError;
use crate::Result;

/// Key/value storage addressed by slash-separated keys.
#[async_trait]
pub trait WalletIo: Send + Sync + fmt::Debug {
    /// Short backend name for diagnostics.
    fn kind(&self) -> &'static str;

    /// Read the value at `key`, or `None` if nothing is stored there.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `data` at `key`, replacing any previous value.
    async fn write(&self, key: &str, data: &str) -> Result<()>;

    /// Remove `key`. Returns whether anything was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// All keys below `prefix`, sorted.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Reject keys that are empty or could escape a backend root.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.contains('\\')
        && key
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..");
    if valid {
        Ok(())
    } else {
        Err(WalletShellError::InvalidStorageKey(key.into()))
    }
}

fn dir_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// In-memory backend used by fake sessions.
#[derive(Debug, Default)]
pub struct MemoryIo {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryIo {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletIo for MemoryIo {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let entries = self
            .entries
            .read()
            .map_err(|_| WalletShellError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, data: &str) -> Result<()> {
        validate_key(key)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WalletShellError::LockPoisoned)?;
        entries.insert(key.to_string(), data.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WalletShellError::LockPoisoned)?;
        Ok(entries.remove(key).is_some())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = dir_prefix(prefix);
        let entries = self
            .entries
            .read()
            .map_err(|_| WalletShellError::LockPoisoned)?;
        Ok(entries
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect())
    }
}

/// Suffix for in-flight writes; never reported by `list`.
const TEMP_SUFFIX: &str = ".tmp";

/// Backend storing each key as a file below a root directory.
#[derive(Debug, Clone)]
pub struct DiskIo {
    root: PathBuf,
}

impl DiskIo {
    /// Open (creating if needed) a backend rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "disk storage opened");
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |p, seg| p.join(seg)))
    }
}

#[async_trait]
impl WalletIo for DiskIo {
    fn kind(&self) -> &'static str {
        "disk"
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, data: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write-then-rename so readers never see a partial record.
        let mut tmp = path.clone().into_os_string();
        tmp.push(TEMP_SUFFIX);
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = dir_prefix(prefix);
        let start = if prefix.is_empty() {
            self.root.clone()
        } else {
            self.path_for(prefix.trim_end_matches('/'))?
        };

        let mut keys = Vec::new();
        let mut pending = vec![(start, prefix)];
        while let Some((dir, key_prefix)) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name().to_string_lossy().into_owned();
                let key = format!("{}{}", key_prefix, name);
                if entry.file_type().await?.is_dir() {
                    pending.push((entry.path(), format!("{}/", key)));
                } else if !name.ends_with(TEMP_SUFFIX) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
