//! Command-line interface for wallet-shell.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// API key presented to the login server.
    pub api_key: Option<String>,
    /// Application identifier.
    pub app_id: Option<String>,
    /// Login server URL.
    pub auth_server: Option<String>,
    /// Keep all state in memory.
    pub fake_server: bool,
    /// Directory for on-disk state.
    pub data_dir: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Commands to run instead of starting the interactive shell.
    pub exec: Vec<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('k') | Long("api-key") => {
                result.api_key = Some(parser.value()?.parse()?);
            }
            Short('a') | Long("app-id") => {
                result.app_id = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("auth-server") => {
                let value: String = parser.value()?.parse()?;
                if !(value.starts_with("https://") || value.starts_with("http://")) {
                    return Err(ArgsError::InvalidValue("auth-server", value));
                }
                result.auth_server = Some(value);
            }
            Long("fake-server") => {
                result.fake_server = true;
            }
            Short('d') | Long("data-dir") => {
                result.data_dir = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Short('e') | Long("exec") => {
                result.exec.push(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"wallet-shell {version}
Interactive wallet command shell

USAGE:
    wallet-shell [OPTIONS]

OPTIONS:
    -c, --config <FILE>         Path to configuration file (JSON)
    -k, --api-key <KEY>         API key for the login server
    -a, --app-id <ID>           Application identifier
    -s, --auth-server <URL>     Login server URL
        --fake-server           Keep accounts and wallets in memory only
    -d, --data-dir <DIR>        Directory for account and wallet data
    -e, --exec <COMMAND>        Run a command and exit (repeatable)
    -l, --log-level <LVL>       Log level (error, warn, info, debug, trace)
    -h, --help                  Print help
    -V, --version               Print version

ENVIRONMENT VARIABLES:
    WALLET_SHELL_API_KEY        API key (overrides config)
    WALLET_SHELL_APP_ID         Application identifier (overrides config)
    WALLET_SHELL_AUTH_SERVER    Login server URL (overrides config)
    WALLET_SHELL_FAKE_SERVER    Use in-memory storage when 1/true/yes
    WALLET_SHELL_DATA_DIR       Data directory (overrides config)
    WALLET_SHELL_LOG_LEVEL      Log level (overrides config)
    RUST_LOG                    Alternative log level setting

EXAMPLES:
    # Interactive shell with on-disk storage
    wallet-shell

    # Throwaway session
    wallet-shell --fake-server

    # Scripted use
    wallet-shell --fake-server -e "account-create alice secret" -e wallet-list
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("wallet-shell {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// Lexopt parsing error.
    #[error("{0}")]
    Lexopt(#[from] lexopt::Error),
    /// Invalid argument value.
    #[error("invalid value for --{0}: '{1}'")]
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    #[error("unexpected argument: '{0}'")]
    UnexpectedArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<OsString> {
        std::iter::once("wallet-shell")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_default_args() {
        let result = parse_args_from(args(&[])).unwrap();
        assert!(!result.fake_server);
        assert!(result.exec.is_empty());
        assert!(result.config.is_none());
    }

    #[test]
    fn test_short_options() {
        let result = parse_args_from(args(&["-k", "key", "-a", "app", "-d", "/tmp/w"])).unwrap();
        assert_eq!(result.api_key.as_deref(), Some("key"));
        assert_eq!(result.app_id.as_deref(), Some("app"));
        assert_eq!(result.data_dir, Some(PathBuf::from("/tmp/w")));
    }

    #[test]
    fn test_long_options() {
        let result = parse_args_from(args(&[
            "--auth-server",
            "https://auth.example/api",
            "--fake-server",
            "--log-level",
            "debug",
        ]))
        .unwrap();
        assert_eq!(result.auth_server.as_deref(), Some("https://auth.example/api"));
        assert!(result.fake_server);
        assert_eq!(result.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_exec_repeatable() {
        let result = parse_args_from(args(&["-e", "login alice pw", "--exec", "wallet-list"])).unwrap();
        assert_eq!(result.exec, vec!["login alice pw", "wallet-list"]);
    }

    #[test]
    fn test_config_file() {
        let result = parse_args_from(args(&["-c", "/etc/wallet-shell.json"])).unwrap();
        assert_eq!(result.config, Some(PathBuf::from("/etc/wallet-shell.json")));
    }

    #[test]
    fn test_help_and_version_flags() {
        assert!(parse_args_from(args(&["-h"])).unwrap().help);
        assert!(parse_args_from(args(&["--help"])).unwrap().help);
        assert!(parse_args_from(args(&["-V"])).unwrap().version);
        assert!(parse_args_from(args(&["--version"])).unwrap().version);
    }

    #[test]
    fn test_invalid_auth_server() {
        let err = parse_args_from(args(&["-s", "ftp://nope"])).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidValue("auth-server", _)));
    }

    #[test]
    fn test_unexpected_positional() {
        let err = parse_args_from(args(&["login"])).unwrap_err();
        assert!(matches!(err, ArgsError::UnexpectedArgument(ref a) if a == "login"));
    }

    #[test]
    fn test_missing_value() {
        assert!(parse_args_from(args(&["--exec"])).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        assert!(parse_args_from(args(&["--port", "3000"])).is_err());
    }
}
