//! # atomic-resolvconf
//!
//! Parse, edit, and atomically replace a `resolv.conf` file.
//!
//! The file is read into a [`ResolvConf`] value, edited in memory, and
//! written back with [`replace_config`], which writes a temporary file in
//! the same directory and renames it over the original. Programs reading the
//! file at the same time see either the old or the new content in full.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use atomic_resolvconf::{read_config, replace_config, DEFAULT_RESOLV_CONF_PATH};
//!
//! let mut conf = read_config(DEFAULT_RESOLV_CONF_PATH)?;
//! conf.clear_servers();
//! conf.add_server("10.0.0.1");
//! conf.set_ndots(2)?;
//! replace_config(&conf, DEFAULT_RESOLV_CONF_PATH)?;
//! # Ok::<(), atomic_resolvconf::ResolvConfError>(())
//! ```
//!
//! ## Supported directives
//!
//! `nameserver`, `domain`, `search`, and the `ndots:`, `timeout:`,
//! `attempts:` and `rotate` options. Everything else is dropped on rewrite,
//! including comments.
//!
//! ## Writers
//!
//! No lock is taken. Run at most one writer per file at a time.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod config;
pub mod error;
pub mod parse;
pub mod replace;
pub mod write;

pub use command::{Command, apply_commands, parse_commands};
pub use config::ResolvConf;
pub use error::{ResolvConfError, Result};
pub use parse::read_config;
pub use replace::replace_config;
pub use write::write_config;

/// The system resolver configuration file.
pub const DEFAULT_RESOLV_CONF_PATH: &str = "/etc/resolv.conf";
