//! `help` command.

use async_trait::async_trait;

use super::{Invocation, WalletCommand};
use crate::Result;

/// Lists commands, or describes one.
pub struct Help;

#[async_trait]
impl WalletCommand for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn usage(&self) -> &'static str {
        "[command]"
    }

    fn help(&self) -> &'static str {
        "Show available commands, or details for one command"
    }

    async fn invoke(&self, inv: Invocation<'_>, args: &[String]) -> Result<()> {
        self.check_args(args, 0, 1)?;

        if let Some(name) = args.first() {
            let cmd = inv.registry.find(name)?;
            inv.console
                .log(format!("Usage: {} {}", cmd.name(), cmd.usage()).trim_end());
            inv.console.log(cmd.help());
            if cmd.requires_account() {
                inv.console.log("Requires a logged-in account.");
            }
            return Ok(());
        }

        let width = inv.registry.iter().map(|c| c.name().len()).max().unwrap_or(0);
        inv.console.log("Available commands:");
        for cmd in inv.registry.iter() {
            inv.console
                .log(format!("  {:width$}  {}", cmd.name(), cmd.help(), width = width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Harness;
    use crate::error::WalletShellError;

    #[tokio::test]
    async fn test_lists_all_commands() {
        let mut h = Harness::new();
        h.run(&Help, &[]).await.unwrap();

        let output = h.output();
        assert!(output.starts_with("Available commands:\n"));
        assert!(output.contains("account-create"));
        assert!(output.contains("wallet-list"));
        assert_eq!(output.lines().count(), 1 + h.registry.len());
    }

    #[tokio::test]
    async fn test_describes_one_command() {
        let mut h = Harness::new();
        h.run(&Help, &["wallet-create"]).await.unwrap();

        let lines: Vec<String> = h.output().lines().map(str::to_string).collect();
        assert_eq!(lines[0], "Usage: wallet-create <type> [name]");
        assert_eq!(lines[2], "Requires a logged-in account.");
    }

    #[tokio::test]
    async fn test_no_usage_trailing_space() {
        let mut h = Harness::new();
        h.run(&Help, &["logout"]).await.unwrap();
        assert!(h.output().starts_with("Usage: logout\n"));
    }

    #[tokio::test]
    async fn test_unknown_topic() {
        let mut h = Harness::new();
        let err = h.run(&Help, &["nope"]).await.unwrap_err();
        assert!(matches!(err, WalletShellError::UnknownCommand(_)));
    }

    #[tokio::test]
    async fn test_too_many_args() {
        let mut h = Harness::new();
        let err = h.run(&Help, &["a", "b"]).await.unwrap_err();
        assert!(matches!(err, WalletShellError::Usage { .. }));
    }
}
