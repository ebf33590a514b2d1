//! Wallet context: accounts and wallet records on top of a storage backend.

use std::sync::Arc;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::io::WalletIo;
use crate::error::WalletShellError;
use crate::Result;

const LOGINS_PREFIX: &str = "logins";
const RECORD_SUFFIX: &str = ".json";

/// Minimum username length after normalization.
const MIN_USERNAME_LEN: usize = 3;

/// Options a context is created with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// API key presented to the login server.
    pub api_key: Option<String>,
    /// Application identifier scoping the context.
    pub app_id: String,
    /// Login server URL.
    pub auth_server: Option<String>,
}

/// A logged-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Normalized username.
    pub username: String,
    /// Hex-encoded account key, generated at account creation.
    pub login_key: String,
}

/// One wallet belonging to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    /// Hex-encoded random identifier.
    pub id: String,
    /// Wallet type, e.g. `wallet:bitcoin`.
    #[serde(rename = "type")]
    pub wallet_type: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Archived wallets are hidden from normal use.
    #[serde(default)]
    pub archived: bool,
}

/// Stored login record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoginRecord {
    username: String,
    salt: String,
    password_hash: String,
    login_key: String,
}

impl LoginRecord {
    fn new(username: &str, password: &str) -> Self {
        let salt = random_hex::<16>();
        Self {
            username: username.to_string(),
            password_hash: hash_password(&salt, password),
            salt,
            login_key: random_hex::<32>(),
        }
    }

    fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }

    fn account(&self) -> Account {
        Account {
            username: self.username.clone(),
            login_key: self.login_key.clone(),
        }
    }
}

fn random_hex<const N: usize>() -> String {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Lowercase and validate a username.
pub fn normalize_username(username: &str) -> Result<String> {
    let normalized = username.trim().to_lowercase();
    let valid = normalized.len() >= MIN_USERNAME_LEN
        && normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(normalized)
    } else {
        Err(WalletShellError::InvalidUsername(username.to_string()))
    }
}

fn login_key(username: &str) -> String {
    format!("{}/{}{}", LOGINS_PREFIX, username, RECORD_SUFFIX)
}

fn wallets_key(username: &str) -> String {
    format!("accounts/{}/wallets{}", username, RECORD_SUFFIX)
}

/// Account and wallet operations over a storage backend.
#[derive(Debug, Clone)]
pub struct WalletContext {
    options: ContextOptions,
    io: Arc<dyn WalletIo>,
}

impl WalletContext {
    /// Create a context over `io`.
    pub fn new(options: ContextOptions, io: Arc<dyn WalletIo>) -> Self {
        debug!(app_id = %options.app_id, backend = io.kind(), "wallet context created");
        Self { options, io }
    }

    /// Options this context was created with.
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    async fn load_login(&self, username: &str) -> Result<Option<LoginRecord>> {
        match self.io.read(&login_key(username)).await? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn save_login(&self, record: &LoginRecord) -> Result<()> {
        let data = serde_json::to_string_pretty(record)?;
        self.io.write(&login_key(&record.username), &data).await
    }

    async fn save_wallets(&self, username: &str, wallets: &[WalletInfo]) -> Result<()> {
        let data = serde_json::to_string_pretty(wallets)?;
        self.io.write(&wallets_key(username), &data).await
    }

    /// Check whether a username can still be registered.
    pub async fn username_available(&self, username: &str) -> Result<bool> {
        let username = normalize_username(username)?;
        Ok(self.load_login(&username).await?.is_none())
    }

    /// Usernames with a login record in this context, sorted.
    pub async fn list_usernames(&self) -> Result<Vec<String>> {
        let keys = self.io.list(LOGINS_PREFIX).await?;
        Ok(keys
            .iter()
            .filter_map(|k| {
                k.strip_prefix(LOGINS_PREFIX)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .and_then(|rest| rest.strip_suffix(RECORD_SUFFIX))
                    .map(str::to_string)
            })
            .collect())
    }

    /// Register a new account and log into it.
    pub async fn create_account(&self, username: &str, password: &str) -> Result<Account> {
        let username = normalize_username(username)?;
        if self.load_login(&username).await?.is_some() {
            return Err(WalletShellError::UsernameTaken(username));
        }

        let record = LoginRecord::new(&username, password);
        self.save_login(&record).await?;
        self.save_wallets(&username, &[]).await?;

        info!(username = %username, "account created");
        Ok(record.account())
    }

    /// Log into an existing account.
    pub async fn login_with_password(&self, username: &str, password: &str) -> Result<Account> {
        let username = normalize_username(username)?;
        let record = self
            .load_login(&username)
            .await?
            .ok_or_else(|| WalletShellError::AccountNotFound(username.clone()))?;

        if !record.verify(password) {
            return Err(WalletShellError::InvalidPassword);
        }

        info!(username = %username, "logged in");
        Ok(record.account())
    }

    /// Replace the password on an account.
    pub async fn change_password(&self, account: &Account, password: &str) -> Result<()> {
        let mut record = self
            .load_login(&account.username)
            .await?
            .ok_or_else(|| WalletShellError::AccountNotFound(account.username.clone()))?;

        record.salt = random_hex::<16>();
        record.password_hash = hash_password(&record.salt, password);
        self.save_login(&record).await?;

        info!(username = %account.username, "password changed");
        Ok(())
    }

    /// Wallets on an account, in creation order.
    pub async fn list_wallets(&self, account: &Account) -> Result<Vec<WalletInfo>> {
        match self.io.read(&wallets_key(&account.username)).await? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    /// Add a wallet to an account.
    pub async fn create_wallet(
        &self,
        account: &Account,
        wallet_type: &str,
        name: Option<&str>,
    ) -> Result<WalletInfo> {
        let mut wallets = self.list_wallets(account).await?;
        let wallet = WalletInfo {
            id: random_hex::<16>(),
            wallet_type: wallet_type.to_string(),
            name: name.map(str::to_string),
            archived: false,
        };
        wallets.push(wallet.clone());
        self.save_wallets(&account.username, &wallets).await?;

        info!(username = %account.username, wallet = %wallet.id, "wallet created");
        Ok(wallet)
    }

    /// Mark a wallet archived.
    pub async fn archive_wallet(&self, account: &Account, id: &str) -> Result<WalletInfo> {
        let mut wallets = self.list_wallets(account).await?;
        let wallet = wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| WalletShellError::WalletNotFound(id.to_string()))?;
        wallet.archived = true;
        let archived = wallet.clone();
        self.save_wallets(&account.username, &wallets).await?;
        Ok(archived)
    }
}
