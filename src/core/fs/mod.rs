use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::utils::{Error, OsirisResult};

#[cfg(target_family = "unix")]
use std::os::unix::fs::MetadataExt;

/// File name without its extension, used as the regex input.
pub fn file_stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Build `<dir>/<rendered><.ext>` keeping the original directory and extension verbatim.
pub fn plan_rename(path: &Path, rendered: &str) -> PathBuf {
    let mut file_name = OsString::from(rendered);
    if let Some(ext) = path.extension() {
        file_name.push(".");
        file_name.push(ext);
    }

    match path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_else(|| OsStr::new(""))
        .to_string_lossy()
        .into_owned()
}

/// Rename `from` to `to`. An existing, different file at `to` is never overwritten.
pub fn rename_file(from: &Path, to: &Path) -> OsirisResult<()> {
    if from == to {
        debug!("'{}' already has the target name", from.display());
        return Ok(());
    }

    if to.symlink_metadata().is_ok() && !same_file(from, to) {
        return Err(Error::TargetExists(to.to_path_buf()));
    }

    std::fs::rename(from, to).map_err(|source| Error::RenameError {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    info!("Renamed '{}' -> '{}'", from.display(), to.display());
    Ok(())
}

// a case-only rename on a case-insensitive filesystem resolves to the same inode
#[cfg(target_family = "unix")]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.symlink_metadata(), b.symlink_metadata()) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(target_family = "unix"))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}
