//! resolv.conf serialization.

use crate::config::ResolvConf;
use crate::error::{ResolvConfError, Result};
use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Mode for files created from scratch.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Produces canonical resolv.conf text.
///
/// Every search suffix gets its own `search` line. Reading such a file back
/// keeps only the last one, so a multi-suffix list does not survive a
/// serialize/parse round trip.
///
/// ```text
/// nameserver 8.8.8.8
/// search example.com
/// search corp.local
/// options ndots:2 rotate
/// ```
impl fmt::Display for ResolvConf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for server in &self.servers {
            writeln!(f, "nameserver {server}")?;
        }
        for suffix in &self.search {
            writeln!(f, "search {suffix}")?;
        }
        if self.has_options() {
            f.write_str("options")?;
            if self.ndots != 0 {
                write!(f, " ndots:{}", self.ndots)?;
            }
            if self.timeout != 0 {
                write!(f, " timeout:{}", self.timeout)?;
            }
            if self.attempts != 0 {
                write!(f, " attempts:{}", self.attempts)?;
            }
            if self.rotate {
                f.write_str(" rotate")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl ResolvConf {
    /// Returns the file content for this configuration.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Writes the serialized configuration to `writer` and flushes it.
    pub(crate) fn write_to(&self, writer: impl Write) -> std::io::Result<()> {
        let mut w = BufWriter::new(writer);
        write!(w, "{self}")?;
        w.flush()
    }
}

/// Writes `conf` to `path` in place, creating or truncating the file.
///
/// This is not crash-safe: readers may observe a truncated file. Use
/// [`replace_config`](crate::replace_config) for live files.
///
/// # Errors
///
/// Returns [`ResolvConfError::Write`] if the file cannot be created or
/// written.
pub fn write_config(conf: &ResolvConf, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    std::os::unix::fs::OpenOptionsExt::mode(&mut options, NEW_FILE_MODE);

    let file = options
        .open(path)
        .map_err(|e| ResolvConfError::write(path, e))?;
    conf.write_to(&file)
        .map_err(|e| ResolvConfError::write(path, e))?;
    Ok(())
}
