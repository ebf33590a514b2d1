//! Account commands: availability checks, creation, login and logout.

use async_trait::async_trait;

use super::{logged_in, Invocation, WalletCommand};
use crate::Result;

/// Checks whether a username is free.
pub struct UsernameAvailable;

#[async_trait]
impl WalletCommand for UsernameAvailable {
    fn name(&self) -> &'static str {
        "username-available"
    }

    fn usage(&self) -> &'static str {
        "<username>"
    }

    fn help(&self) -> &'static str {
        "Check whether a username can be registered"
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 1, 1)?;
        let available = inv.session.context.username_available(&args[0]).await?;
        inv.console
            .log(if available { "Username is available" } else { "Username is taken" });
        Ok(())
    }
}

/// Lists usernames stored on this device.
pub struct UsernameList;

#[async_trait]
impl WalletCommand for UsernameList {
    fn name(&self) -> &'static str {
        "username-list"
    }

    fn help(&self) -> &'static str {
        "List usernames with local login data"
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 0, 0)?;
        for username in inv.session.context.list_usernames().await? {
            inv.console.log(username);
        }
        Ok(())
    }
}

/// Registers a new account and logs into it.
pub struct AccountCreate;

#[async_trait]
impl WalletCommand for AccountCreate {
    fn name(&self) -> &'static str {
        "account-create"
    }

    fn usage(&self) -> &'static str {
        "<username> <password>"
    }

    fn help(&self) -> &'static str {
        "Create a new account and log into it"
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 2, 2)?;
        if args[1].is_empty() {
            return Err(self.usage_error("Password must not be empty"));
        }

        let account = inv.session.context.create_account(&args[0], &args[1]).await?;
        inv.console
            .log(format!("Created account {}", account.username));
        inv.session.account = Some(account);
        Ok(())
    }
}

/// Logs into an existing account.
pub struct Login;

#[async_trait]
impl WalletCommand for Login {
    fn name(&self) -> &'static str {
        "login"
    }

    fn usage(&self) -> &'static str {
        "<username> <password>"
    }

    fn help(&self) -> &'static str {
        "Log into an account with a password"
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 2, 2)?;
        let account = inv
            .session
            .context
            .login_with_password(&args[0], &args[1])
            .await?;
        inv.console.log(format!("Logged in as {}", account.username));
        inv.session.account = Some(account);
        Ok(())
    }
}

/// Drops the logged-in account.
pub struct Logout;

#[async_trait]
impl WalletCommand for Logout {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn help(&self) -> &'static str {
        "Log out of the current account"
    }

    fn needs_login(&self) -> bool {
        true
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 0, 0)?;
        let account = logged_in(self, inv.session)?;
        inv.session.account = None;
        inv.console.log(format!("Logged out of {}", account.username));
        Ok(())
    }
}

/// Shows the logged-in account.
pub struct AccountInfo;

#[async_trait]
impl WalletCommand for AccountInfo {
    fn name(&self) -> &'static str {
        "account-info"
    }

    fn help(&self) -> &'static str {
        "Show the logged-in account"
    }

    fn needs_login(&self) -> bool {
        true
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 0, 0)?;
        let account = logged_in(self, inv.session)?;
        let wallets = inv.session.context.list_wallets(&account).await?;
        let active = wallets.iter().filter(|w| !w.archived).count();
        let options = inv.session.context.options();

        inv.console.log(format!("username: {}", account.username));
        if !options.app_id.is_empty() {
            inv.console.log(format!("app id: {}", options.app_id));
        }
        inv.console.log(format!("storage: {}", inv.session.io.kind()));
        inv.console.log(format!("wallets: {} ({} archived)", active, wallets.len() - active));
        Ok(())
    }
}

/// Replaces the account password.
pub struct PasswordChange;

#[async_trait]
impl WalletCommand for PasswordChange {
    fn name(&self) -> &'static str {
        "password-change"
    }

    fn usage(&self) -> &'static str {
        "<password>"
    }

    fn help(&self) -> &'static str {
        "Change the password of the logged-in account"
    }

    fn needs_login(&self) -> bool {
        true
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 1, 1)?;
        if args[0].is_empty() {
            return Err(self.usage_error("Password must not be empty"));
        }
        let account = logged_in(self, inv.session)?;
        inv.session.context.change_password(&account, &args[0]).await?;
        inv.console.log("Password changed");
        Ok(())
    }
}
