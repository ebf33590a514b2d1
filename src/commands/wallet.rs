//! Wallet commands.

use async_trait::async_trait;

use super::{logged_in, Invocation, WalletCommand};
use crate::session::WalletInfo;
use crate::Result;

fn describe(wallet: &WalletInfo) -> String {
    let mut line = format!("{} {}", wallet.id, wallet.wallet_type);
    if let Some(name) = &wallet.name {
        line.push_str(&format!(" \"{}\"", name));
    }
    if wallet.archived {
        line.push_str(" (archived)");
    }
    line
}

/// Lists wallets on the account.
pub struct WalletList;

#[async_trait]
impl WalletCommand for WalletList {
    fn name(&self) -> &'static str {
        "wallet-list"
    }

    fn help(&self) -> &'static str {
        "List the wallets in the account"
    }

    fn needs_account(&self) -> bool {
        true
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 0, 0)?;
        let account = logged_in(self, inv.session)?;
        let wallets = inv.session.context.list_wallets(&account).await?;
        if wallets.is_empty() {
            inv.console.log("No wallets");
        }
        for wallet in &wallets {
            inv.console.log(describe(wallet));
        }
        Ok(())
    }
}

/// Adds a wallet to the account.
pub struct WalletCreate;

#[async_trait]
impl WalletCommand for WalletCreate {
    fn name(&self) -> &'static str {
        "wallet-create"
    }

    fn usage(&self) -> &'static str {
        "<type> [name]"
    }

    fn help(&self) -> &'static str {
        "Create a wallet of the given type"
    }

    fn needs_account(&self) -> bool {
        true
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 1, 2)?;
        let wallet_type = args[0].as_str();
        if !wallet_type.starts_with("wallet:") || wallet_type.len() == "wallet:".len() {
            return Err(self.usage_error("Wallet types look like 'wallet:bitcoin'"));
        }

        let account = logged_in(self, inv.session)?;
        let wallet = inv
            .session
            .context
            .create_wallet(&account, wallet_type, args.get(1).map(String::as_str))
            .await?;
        inv.console.log(format!("Created wallet {}", wallet.id));
        Ok(())
    }
}

/// Archives a wallet.
pub struct WalletArchive;

#[async_trait]
impl WalletCommand for WalletArchive {
    fn name(&self) -> &'static str {
        "wallet-archive"
    }

    fn usage(&self) -> &'static str {
        "<id>"
    }

    fn help(&self) -> &'static str {
        "Archive a wallet so it is hidden from normal use"
    }

    fn needs_account(&self) -> bool {
        true
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 1, 1)?;
        let account = logged_in(self, inv.session)?;
        let wallet = inv.session.context.archive_wallet(&account, &args[0]).await?;
        inv.console.log(format!("Archived {}", describe(&wallet)));
        Ok(())
    }
}
