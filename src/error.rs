//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for resolv.conf operations.
pub type Result<T> = std::result::Result<T, ResolvConfError>;

/// Errors returned by resolv.conf operations.
#[derive(Debug, Error)]
pub enum ResolvConfError {
    /// The configuration file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied value is not an integer.
    #[error("invalid {option} value: {value:?}")]
    InvalidNumber {
        /// Option being set (e.g. `"ndots"`).
        option: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A caller-supplied numeric value is negative or too large.
    #[error("{option} out of range: {value}")]
    OutOfRange {
        /// Option being set (e.g. `"ndots"`).
        option: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// A command that takes a value was given none.
    #[error("missing argument for {command:?}")]
    MissingArgument {
        /// The command token.
        command: String,
    },

    /// Command token not recognized.
    #[error("unsupported action: {0:?}")]
    UnknownCommand(String),

    /// Writing or replacing the configuration file failed. The previous
    /// file content is still in place.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ResolvConfError {
    /// Returns `true` for errors caused by an invalid requested mutation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. } | Self::OutOfRange { .. } | Self::MissingArgument { .. }
        )
    }

    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::Read { source, .. } | Self::Write { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied
        )
    }

    /// Process exit status for this failure class.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Read { .. } => 1,
            Self::InvalidNumber { .. } | Self::OutOfRange { .. } | Self::MissingArgument { .. } => 2,
            Self::UnknownCommand(_) => 10,
            Self::Write { .. } => 100,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        let read = ResolvConfError::Read {
            path: "/x".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let invalid = ResolvConfError::OutOfRange {
            option: "ndots",
            value: -1,
        };
        let unknown = ResolvConfError::UnknownCommand("frob".into());
        let write = ResolvConfError::write("/x", io::Error::from(io::ErrorKind::PermissionDenied));

        assert_eq!(read.exit_code(), 1);
        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(unknown.exit_code(), 10);
        assert_eq!(write.exit_code(), 100);

        assert!(invalid.is_validation());
        assert!(!unknown.is_validation());
        assert!(write.is_permission_denied());
        assert!(!read.is_permission_denied());
    }

    #[test]
    fn messages() {
        let e = ResolvConfError::OutOfRange {
            option: "ndots",
            value: -1,
        };
        assert_eq!(e.to_string(), "ndots out of range: -1");
        assert_eq!(
            ResolvConfError::UnknownCommand("frob".into()).to_string(),
            "unsupported action: \"frob\""
        );
    }
}
