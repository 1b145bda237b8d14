//! Crash-safe replacement of a live resolv.conf.
//!
//! The new content is written to a temporary file next to the target and
//! renamed over it. Concurrent readers see either the old file or the new
//! one, never a partial write, and a crash before the rename leaves the old
//! content in place.
//!
//! There is no locking between writers. Two concurrent replacements of the
//! same path race and the last rename wins; callers must ensure a single
//! writer.

use crate::config::ResolvConf;
use crate::error::{ResolvConfError, Result};
use crate::write::write_config;
use std::fs::{Metadata, Permissions};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Atomically replaces the file at `path` with the serialized `conf`.
///
/// If `path` does not exist yet it is written directly, since no reader can
/// be holding it. Otherwise the replacement keeps the original file's
/// permission bits (and, on Unix, its owner when permitted).
///
/// A symlink at `path` is replaced by a regular file.
///
/// # Errors
///
/// Returns [`ResolvConfError::Write`] if the temporary file cannot be
/// created, written, synced, or chmodded, or if the rename fails. In every
/// case the file at `path` is left unchanged and the temporary file is
/// removed.
pub fn replace_config(conf: &ResolvConf, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Target missing, writing directly");
            return write_config(conf, path);
        }
        Err(e) => return Err(ResolvConfError::write(path, e)),
    };

    stage(conf, path, &metadata)?.commit()
}

/// A fully written temporary file that has not yet been renamed.
///
/// Dropping it without calling [`commit`](Self::commit) deletes the
/// temporary file.
struct Staged {
    temp: NamedTempFile,
    target: PathBuf,
}

/// Writes `conf` into a new temporary file beside `target` with the
/// target's permissions.
fn stage(conf: &ResolvConf, target: &Path, metadata: &Metadata) -> Result<Staged> {
    let fail = |e| ResolvConfError::write(target, e);

    let temp = tempfile::Builder::new()
        .prefix(&temp_prefix(target))
        .tempfile_in(parent_dir(target))
        .map_err(fail)?;

    conf.write_to(temp.as_file()).map_err(fail)?;
    temp.as_file().sync_all().map_err(fail)?;
    copy_permissions(&temp, metadata.permissions()).map_err(fail)?;
    copy_owner(&temp, metadata);

    Ok(Staged {
        temp,
        target: target.to_path_buf(),
    })
}

impl Staged {
    fn commit(self) -> Result<()> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|e| ResolvConfError::write(&target, e.error))?;

        sync_dir(parent_dir(&target));
        tracing::info!(path = %target.display(), "Replaced resolver configuration");
        Ok(())
    }
}

fn copy_permissions(temp: &NamedTempFile, permissions: Permissions) -> std::io::Result<()> {
    temp.as_file().set_permissions(permissions)
}

/// Carries the original uid/gid over. Only root can usually do this, so
/// failure is not fatal.
#[cfg(unix)]
fn copy_owner(temp: &NamedTempFile, metadata: &Metadata) {
    use std::os::unix::fs::MetadataExt;

    let current = match temp.as_file().metadata() {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to stat temporary file");
            return;
        }
    };
    if current.uid() == metadata.uid() && current.gid() == metadata.gid() {
        return;
    }
    let (uid, gid) = (metadata.uid(), metadata.gid());
    if let Err(e) = std::os::unix::fs::fchown(temp.as_file(), Some(uid), Some(gid)) {
        tracing::warn!(
            uid,
            gid,
            error = %e,
            "Failed to preserve resolver file owner"
        );
    }
}

#[cfg(not(unix))]
const fn copy_owner(_temp: &NamedTempFile, _metadata: &Metadata) {}

/// Makes the rename durable. The new content is already visible, so a
/// failure here is only logged.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = std::fs::File::open(dir).and_then(|d| d.sync_all()) {
        tracing::warn!(dir = %dir.display(), error = %e, "Failed to sync directory");
    }
}

#[cfg(not(unix))]
const fn sync_dir(_dir: &Path) {}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// `.resolv.conf.` for `/etc/resolv.conf`.
fn temp_prefix(path: &Path) -> String {
    let name = path
        .file_name()
        .map_or_else(|| "resolv.conf".into(), |n| n.to_string_lossy());
    format!(".{name}.")
}
