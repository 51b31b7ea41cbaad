use crate::error::{FlowkitError, Result};
use crate::io;
use crate::journal::Journal;
use std::path::{Path, PathBuf};

/// Timestamp suffix for backup directories, local time.
fn backup_stamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Sibling path the backup of `root` is written to.
pub fn backup_destination(root: &Path, stamp: &str) -> PathBuf {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "install".to_string());
    root.with_file_name(format!("{name}.backup.{stamp}"))
}

/// Copy the entire installation root to a timestamped sibling directory.
///
/// Runs before any prompt or mutation whenever an existing installation is
/// detected. Any failure aborts the whole run — a partial backup must never
/// be mistaken for a complete one. Backups are immutable: if the stamp
/// collides with an earlier backup taken in the same second, a counter is
/// appended rather than writing into the existing directory.
pub fn create_backup(root: &Path, journal: &mut Journal) -> Result<PathBuf> {
    let stamp = backup_stamp();
    let mut dest = backup_destination(root, &stamp);
    let mut n = 1u32;
    while dest.exists() {
        dest = backup_destination(root, &format!("{stamp}_{n}"));
        n += 1;
    }
    let copied = io::copy_dir_recursive(root, &dest).map_err(|source| FlowkitError::Backup {
        path: dest.clone(),
        source,
    })?;
    journal.record(format!(
        "backup: {} -> {} ({copied} files)",
        root.display(),
        dest.display()
    ));
    Ok(dest)
}
