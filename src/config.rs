//! In-memory resolver configuration.

use crate::error::{ResolvConfError, Result};

/// Contents of a resolv.conf file.
///
/// Numeric options use `0` for "not set": a zero value is never written
/// back out, so an explicit `timeout:0` cannot be expressed.
///
/// # Example
///
/// ```
/// use atomic_resolvconf::ResolvConf;
///
/// let mut conf = ResolvConf::new()
///     .with_server("10.0.0.1")
///     .with_search("corp.local");
/// conf.set_ndots(2).unwrap();
///
/// assert_eq!(conf.servers, ["10.0.0.1"]);
/// assert!(conf.set_ndots(-1).is_err());
/// assert_eq!(conf.ndots, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvConf {
    /// Nameserver addresses in query-priority order. Duplicates are kept.
    pub servers: Vec<String>,

    /// Search suffixes appended to short names, in order.
    pub search: Vec<String>,

    /// Dots in a name before an initial absolute lookup.
    pub ndots: u32,

    /// Seconds before giving up on a query packet.
    pub timeout: u32,

    /// Lost packets before giving up on a server.
    pub attempts: u32,

    /// Round-robin across servers.
    pub rotate: bool,
}

impl ResolvConf {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            servers: Vec::new(),
            search: Vec::new(),
            ndots: 0,
            timeout: 0,
            attempts: 0,
            rotate: false,
        }
    }

    /// Appends a nameserver.
    #[must_use]
    pub fn with_server(mut self, addr: impl AsRef<str>) -> Self {
        self.add_server(addr);
        self
    }

    /// Appends a search suffix.
    #[must_use]
    pub fn with_search(mut self, suffix: impl AsRef<str>) -> Self {
        self.add_search(suffix);
        self
    }

    /// Appends a nameserver, trimming surrounding whitespace.
    pub fn add_server(&mut self, addr: impl AsRef<str>) {
        self.servers.push(addr.as_ref().trim().to_string());
    }

    /// Appends a search suffix, trimming surrounding whitespace.
    pub fn add_search(&mut self, suffix: impl AsRef<str>) {
        self.search.push(suffix.as_ref().trim().to_string());
    }

    /// Replaces the search list with the single local domain.
    pub fn set_domain(&mut self, domain: impl AsRef<str>) {
        self.search = vec![domain.as_ref().trim().to_string()];
    }

    pub fn clear_servers(&mut self) {
        self.servers.clear();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Clears both nameservers and search suffixes. Options are kept.
    pub fn purge(&mut self) {
        self.clear_servers();
        self.clear_search();
    }

    /// Sets `ndots`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolvConfError::OutOfRange`] for negative values or values
    /// above `u32::MAX`. The model is left unchanged.
    pub fn set_ndots(&mut self, value: i64) -> Result<()> {
        self.ndots = checked_option("ndots", value)?;
        Ok(())
    }

    /// Sets `timeout` in seconds.
    ///
    /// # Errors
    ///
    /// Same as [`set_ndots`](Self::set_ndots).
    pub fn set_timeout(&mut self, value: i64) -> Result<()> {
        self.timeout = checked_option("timeout", value)?;
        Ok(())
    }

    /// Sets `attempts`.
    ///
    /// # Errors
    ///
    /// Same as [`set_ndots`](Self::set_ndots).
    pub fn set_attempts(&mut self, value: i64) -> Result<()> {
        self.attempts = checked_option("attempts", value)?;
        Ok(())
    }

    pub const fn set_rotate(&mut self, rotate: bool) {
        self.rotate = rotate;
    }

    /// Returns `true` if any numeric option is nonzero or `rotate` is set.
    #[must_use]
    pub const fn has_options(&self) -> bool {
        self.ndots != 0 || self.timeout != 0 || self.attempts != 0 || self.rotate
    }
}

fn checked_option(option: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ResolvConfError::OutOfRange { option, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let c = ResolvConf::new();
        assert!(c.servers.is_empty());
        assert!(c.search.is_empty());
        assert!(!c.has_options());
        assert_eq!(c, ResolvConf::default());
    }

    #[test]
    fn add_keeps_order_and_duplicates() {
        let mut c = ResolvConf::new();
        c.add_server("10.0.0.2");
        c.add_server(" 10.0.0.1\n");
        c.add_server("10.0.0.2");
        assert_eq!(c.servers, ["10.0.0.2", "10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn set_domain_collapses_search() {
        let mut c = ResolvConf::new().with_search("a.local").with_search("b.local");
        c.set_domain("corp.local");
        assert_eq!(c.search, ["corp.local"]);
    }

    #[test]
    fn set_domain_trims() {
        let mut c = ResolvConf::new();
        c.set_domain(" corp.local\n");
        assert_eq!(c.search, ["corp.local"]);
        assert_eq!(c.serialize(), "search corp.local\n");
    }

    #[test]
    fn purge_keeps_options() {
        let mut c = ResolvConf::new().with_server("1.1.1.1").with_search("x.local");
        c.set_rotate(true);
        c.purge();
        assert!(c.servers.is_empty());
        assert!(c.search.is_empty());
        assert!(c.rotate);
    }

    #[test]
    fn negative_ndots_rejected_without_change() {
        let mut c = ResolvConf::new();
        c.set_ndots(3).unwrap();
        let before = c.clone();

        let err = c.set_ndots(-1).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(c, before);
    }

    #[test]
    fn oversized_values_rejected() {
        let mut c = ResolvConf::new();
        assert!(c.set_timeout(i64::from(u32::MAX) + 1).is_err());
        assert!(c.set_attempts(-5).is_err());
        assert_eq!(c.timeout, 0);
        assert_eq!(c.attempts, 0);

        c.set_timeout(5).unwrap();
        c.set_attempts(0).unwrap();
        assert_eq!(c.timeout, 5);
        assert!(c.has_options());
    }
}
