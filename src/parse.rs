//! resolv.conf parsing.
//!
//! Parsing never fails. Unknown directives, blank lines, and directives
//! missing their arguments are skipped. There is no comment syntax: a line
//! starting with `#` is just an unknown directive.

use crate::config::ResolvConf;
use crate::error::{ResolvConfError, Result};
use std::path::Path;

impl ResolvConf {
    /// Parses resolv.conf text.
    ///
    /// Directives are applied in file order. `nameserver` appends, while
    /// `domain` and `search` replace the whole search list.
    ///
    /// ```
    /// use atomic_resolvconf::ResolvConf;
    ///
    /// let conf = ResolvConf::parse("nameserver 8.8.8.8\noptions ndots:2 rotate\n");
    /// assert_eq!(conf.servers, ["8.8.8.8"]);
    /// assert_eq!(conf.ndots, 2);
    /// assert!(conf.rotate);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut conf = Self::new();
        for line in text.lines() {
            conf.apply_line(line);
        }
        conf
    }

    fn apply_line(&mut self, line: &str) {
        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            return;
        };

        match directive {
            "nameserver" => {
                if let Some(addr) = tokens.next() {
                    self.servers.push(addr.to_string());
                }
            }
            "domain" => {
                self.search = tokens.next().map(str::to_string).into_iter().collect();
            }
            "search" => {
                self.search = tokens.map(str::to_string).collect();
            }
            "options" => tokens.for_each(|opt| self.apply_option(opt)),
            _ => {}
        }
    }

    fn apply_option(&mut self, opt: &str) {
        if let Some(v) = opt.strip_prefix("ndots:") {
            self.ndots = lenient_number(v);
        } else if let Some(v) = opt.strip_prefix("timeout:") {
            self.timeout = lenient_number(v);
        } else if let Some(v) = opt.strip_prefix("attempts:") {
            self.attempts = lenient_number(v);
        } else if opt == "rotate" {
            self.rotate = true;
        }
    }
}

/// Malformed numbers in a file read as zero (unset).
fn lenient_number(v: &str) -> u32 {
    v.parse().unwrap_or(0)
}

/// Reads and parses the file at `path`.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns [`ResolvConfError::Read`] if the file cannot be read.
pub fn read_config(path: impl AsRef<Path>) -> Result<ResolvConf> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ResolvConfError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let conf = ResolvConf::parse(&String::from_utf8_lossy(&bytes));
    tracing::debug!(
        path = %path.display(),
        servers = conf.servers.len(),
        search = conf.search.len(),
        "Parsed resolver configuration"
    );
    Ok(conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_file() {
        let c = ResolvConf::parse(
            "nameserver 8.8.8.8\nsearch example.com corp.local\noptions ndots:2 rotate\n",
        );
        assert_eq!(c.servers, ["8.8.8.8"]);
        assert_eq!(c.search, ["example.com", "corp.local"]);
        assert_eq!(c.ndots, 2);
        assert!(c.rotate);
        assert_eq!(c.timeout, 0);
        assert_eq!(c.attempts, 0);
    }

    #[test]
    fn tolerates_malformed_lines() {
        let c = ResolvConf::parse(
            "nameserver\n\n   \t \nfoo bar baz\nnameserver 10.0.0.1\n# nameserver 9.9.9.9\n",
        );
        assert_eq!(c.servers, ["10.0.0.1"]);
        assert!(c.search.is_empty());
        assert!(!c.has_options());
    }

    #[test]
    fn directives_are_case_sensitive() {
        let c = ResolvConf::parse("NameServer 1.1.1.1\nSEARCH a.local\n");
        assert!(c.servers.is_empty());
        assert!(c.search.is_empty());
    }

    #[test]
    fn later_search_and_domain_override() {
        let c = ResolvConf::parse("search a.local b.local\ndomain corp.local\n");
        assert_eq!(c.search, ["corp.local"]);

        let c = ResolvConf::parse("domain corp.local extra\nsearch a.local b.local\n");
        assert_eq!(c.search, ["a.local", "b.local"]);

        let c = ResolvConf::parse("search a.local\ndomain\n");
        assert!(c.search.is_empty());

        let c = ResolvConf::parse("search a.local\nsearch\n");
        assert!(c.search.is_empty());
    }

    #[test]
    fn multiple_search_lines_last_wins() {
        let c = ResolvConf::parse("search a.local\nsearch b.local\n");
        assert_eq!(c.search, ["b.local"]);
    }

    #[test]
    fn nameserver_extra_tokens_ignored() {
        let c = ResolvConf::parse("nameserver 10.0.0.1 10.0.0.2\nnameserver 10.0.0.1\n");
        assert_eq!(c.servers, ["10.0.0.1", "10.0.0.1"]);
    }

    #[test]
    fn options_parse_leniently() {
        let c = ResolvConf::parse(
            "options ndots:x timeout:3 attempts:-2 edns0 rotate\noptions ndots:4\n",
        );
        assert_eq!(c.ndots, 4);
        assert_eq!(c.timeout, 3);
        assert_eq!(c.attempts, 0);
        assert!(c.rotate);

        let c = ResolvConf::parse("options ndots:5\noptions ndots:bad\n");
        assert_eq!(c.ndots, 0);
    }

    #[test]
    fn handles_crlf_and_missing_final_newline() {
        let c = ResolvConf::parse("nameserver 10.0.0.1\r\nnameserver 10.0.0.2");
        assert_eq!(c.servers, ["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn read_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_config(dir.path().join("resolv.conf")).unwrap_err();
        assert!(matches!(err, ResolvConfError::Read { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn read_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolv.conf");
        std::fs::write(&path, b"search \xffbad.local\nnameserver 10.0.0.1\n").unwrap();

        let c = read_config(&path).unwrap();
        assert_eq!(c.servers, ["10.0.0.1"]);
        assert_eq!(c.search.len(), 1);
    }
}
