//! `update-resolvconf` — edit resolv.conf from the command line.
//!
//! ```text
//! update-resolvconf [--file PATH] [-v] COMMAND...
//!
//! update-resolvconf purge ns 10.0.0.1 ns 10.0.0.2 search corp.local ndots 2
//! ```
//!
//! The file is rewritten atomically, and only when at least one command was
//! given.
//!
//! | Exit | Meaning                         |
//! |------|---------------------------------|
//! | 0    | success                         |
//! | 1    | file could not be read          |
//! | 2    | invalid argument or value       |
//! | 10   | unknown command                 |
//! | 100  | file could not be replaced      |

use atomic_resolvconf::{
    DEFAULT_RESOLV_CONF_PATH, Result, apply_commands, read_config, replace_config,
};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Edit nameservers, search suffixes and ndots in resolv.conf.
#[derive(Debug, Parser)]
#[command(name = "update-resolvconf", version, about, long_about = None)]
struct Cli {
    /// File to edit.
    #[arg(short, long, default_value = DEFAULT_RESOLV_CONF_PATH, env = "RESOLV_CONF")]
    file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Commands: purge, purge_ns, purge_search, ndots N, ns ADDR, search SUFFIX.
    #[arg(trailing_var_arg = true)]
    commands: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("update-resolvconf: {e}");
            if e.is_permission_denied() {
                eprintln!("update-resolvconf: try again as root");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut conf = read_config(&cli.file)?;

    let applied = apply_commands(&mut conf, &cli.commands)?;
    if applied == 0 {
        tracing::info!(path = %cli.file.display(), "No commands given, leaving file untouched");
        return Ok(());
    }

    replace_config(&conf, &cli.file)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
