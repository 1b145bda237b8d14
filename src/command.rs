//! Command-token dispatch used by `update-resolvconf`.
//!
//! ```text
//! purge            clear nameservers and search suffixes
//! purge_ns         clear nameservers
//! purge_search     clear search suffixes
//! ndots <N>        set ndots (N >= 0)
//! ns <ADDR>        append a nameserver
//! search <SUFFIX>  append a search suffix
//! ```
//!
//! Tokens are case-insensitive and applied left to right.

use crate::config::ResolvConf;
use crate::error::{ResolvConfError, Result};

/// A single parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Purge,
    PurgeNameservers,
    PurgeSearch,
    Ndots(i64),
    Nameserver(String),
    Search(String),
}

impl Command {
    /// Applies this command to `conf`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolvConfError::OutOfRange`] for a negative `ndots`.
    pub fn apply(&self, conf: &mut ResolvConf) -> Result<()> {
        match self {
            Self::Purge => conf.purge(),
            Self::PurgeNameservers => conf.clear_servers(),
            Self::PurgeSearch => conf.clear_search(),
            Self::Ndots(n) => conf.set_ndots(*n)?,
            Self::Nameserver(addr) => conf.add_server(addr),
            Self::Search(suffix) => conf.add_search(suffix),
        }
        Ok(())
    }
}

/// Parses command tokens.
///
/// # Errors
///
/// Returns [`ResolvConfError::UnknownCommand`] for an unrecognized token,
/// [`ResolvConfError::MissingArgument`] when a value-taking command ends the
/// list or its value is blank, and [`ResolvConfError::InvalidNumber`] for a non-integer `ndots`.
pub fn parse_commands<I, S>(args: I) -> Result<Vec<Command>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let mut commands = Vec::new();

    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        let keyword = arg.to_ascii_lowercase();
        let mut value = || {
            args.next()
                .map(|v| v.as_ref().trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ResolvConfError::MissingArgument {
                    command: keyword.clone(),
                })
        };

        let command = match keyword.as_str() {
            "purge" => Command::Purge,
            "purge_ns" => Command::PurgeNameservers,
            "purge_search" => Command::PurgeSearch,
            "ndots" => {
                let raw = value()?;
                let n = raw
                    .parse::<i64>()
                    .map_err(|_| ResolvConfError::InvalidNumber {
                        option: "ndots",
                        value: raw,
                    })?;
                Command::Ndots(n)
            }
            "ns" => Command::Nameserver(value()?),
            "search" => Command::Search(value()?),
            _ => return Err(ResolvConfError::UnknownCommand(arg.to_string())),
        };
        commands.push(command);
    }

    Ok(commands)
}

/// Parses `args` and applies them to `conf`, returning how many commands
/// were applied.
///
/// Nothing is applied unless every token parses. A validation failure while
/// applying stops at that command; earlier commands stay applied.
///
/// # Errors
///
/// See [`parse_commands`] and [`Command::apply`].
pub fn apply_commands<I, S>(conf: &mut ResolvConf, args: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let commands = parse_commands(args)?;
    for command in &commands {
        tracing::debug!(?command, "Applying command");
        command.apply(conf)?;
    }
    Ok(commands.len())
}
