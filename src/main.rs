//! Wallet-shell binary entry point.

use std::io::Write;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use wallet_shell::cli::{self, Args};
use wallet_shell::config::Config;
use wallet_shell::render::render_command;
use wallet_shell::{
    logging, run_command, Action, AppState, CommandRegistry, CommandStatus, Result, Store,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'wallet-shell --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    logging::init(Some(config.log_filter()));
    info!("wallet-shell v{}", env!("CARGO_PKG_VERSION"));

    let state =
        AppState::new(config.wallet.clone()).with_history_limit(config.shell.history_limit);
    let store = Store::with_state(state);
    let registry = CommandRegistry::with_builtins();

    let result = if args.exec.is_empty() {
        repl(&store, &registry, &config).await
    } else {
        run_batch(&store, &registry, &args).await
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "shell stopped");
            ExitCode::FAILURE
        }
    }
}

/// Run each `--exec` command in order, stopping at the first failure.
async fn run_batch(
    store: &Store,
    registry: &CommandRegistry,
    args: &Args,
) -> Result<ExitCode> {
    let mut stdout = std::io::stdout();

    for text in &args.exec {
        let key = run_command(store, registry, text).await;
        render_command(store, key, &mut stdout)?;

        let failed = matches!(
            store.command(key),
            Ok(Some(entry)) if entry.status == CommandStatus::Failed
        );
        if failed {
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Read commands from stdin until EOF or `exit`.
async fn repl(
    store: &Store,
    registry: &CommandRegistry,
    config: &Config,
) -> Result<ExitCode> {
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        write!(stdout, "{}", config.shell.prompt)?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(stdout)?;
            break;
        };

        match line.trim() {
            "exit" | "quit" => break,
            "clear" => {
                if let Err(e) = store.dispatch(Action::ClearCommands) {
                    error!(error = %e, "failed to clear history");
                }
                continue;
            }
            _ => {}
        }

        let key = run_command(store, registry, &line).await;
        render_command(store, key, &mut stdout)?;
    }

    info!("wallet-shell exiting");
    Ok(ExitCode::SUCCESS)
}
