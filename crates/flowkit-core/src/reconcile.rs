use crate::error::{FlowkitError, Result};
use crate::io;
use crate::journal::Journal;
use crate::mode::InstallMode;
use crate::paths;
use crate::source::SourceTree;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// What the reconciliation did (or, in dry-run, would do). Relative paths
/// only; the CLI prints this as a table or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub mode: InstallMode,
    pub dry_run: bool,
    /// Files newly written into the target.
    pub created: Vec<String>,
    /// Existing files overwritten with the source version.
    pub replaced: Vec<String>,
    /// Source files skipped because the target already has them (merge).
    pub skipped: Vec<String>,
    /// Target files absent from the source, kept as user-authored.
    pub preserved: Vec<String>,
}

impl ReconcileReport {
    fn new(mode: InstallMode, dry_run: bool) -> Self {
        Self {
            mode,
            dry_run,
            created: Vec::new(),
            replaced: Vec::new(),
            skipped: Vec::new(),
            preserved: Vec::new(),
        }
    }

    pub fn total_written(&self) -> usize {
        self.created.len() + self.replaced.len()
    }
}

/// Bring the installation root into agreement with the source tree.
///
/// Dry-run computes the identical report while mutating nothing. The global
/// rules document and install manifest are handled by later pipeline steps,
/// never here.
pub fn reconcile(
    root: &Path,
    source: &SourceTree,
    mode: InstallMode,
    dry_run: bool,
    journal: &mut Journal,
) -> Result<ReconcileReport> {
    let mut report = ReconcileReport::new(mode, dry_run);
    let prefix = if dry_run { "(dry-run) " } else { "" };
    journal.record(format!("reconcile: mode={mode} root={}", root.display()));

    match mode {
        InstallMode::Fresh => {
            if root.exists() {
                journal.record(format!("{prefix}remove: {}", root.display()));
                if !dry_run {
                    std::fs::remove_dir_all(root)?;
                }
            }
            for file in source.files() {
                write_source_file(root, &file.rel_path, &file.content, dry_run)?;
                journal.record(format!("{prefix}create: {}", file.rel_path));
                report.created.push(file.rel_path.clone());
            }
        }

        InstallMode::Merge => {
            for file in source.files() {
                if root.join(&file.rel_path).exists() {
                    report.skipped.push(file.rel_path.clone());
                } else {
                    write_source_file(root, &file.rel_path, &file.content, dry_run)?;
                    journal.record(format!("{prefix}create: {}", file.rel_path));
                    report.created.push(file.rel_path.clone());
                }
            }
            report.preserved = custom_assets(root, source)?;
        }

        InstallMode::UpdateWorkflows => {
            for file in source.files() {
                let in_managed_subdir = paths::REQUIRED_SUBDIRS
                    .iter()
                    .any(|d| file.rel_path.starts_with(&format!("{d}/")));
                let existing = root.join(&file.rel_path).exists();
                if in_managed_subdir {
                    write_source_file(root, &file.rel_path, &file.content, dry_run)?;
                    if existing {
                        journal.record(format!("{prefix}replace: {}", file.rel_path));
                        report.replaced.push(file.rel_path.clone());
                    } else {
                        journal.record(format!("{prefix}create: {}", file.rel_path));
                        report.created.push(file.rel_path.clone());
                    }
                } else if existing {
                    // Top-level aggregate files are left alone on updates
                    report.skipped.push(file.rel_path.clone());
                } else {
                    write_source_file(root, &file.rel_path, &file.content, dry_run)?;
                    journal.record(format!("{prefix}create: {}", file.rel_path));
                    report.created.push(file.rel_path.clone());
                }
            }
            report.preserved = custom_assets(root, source)?;
        }
    }

    // Invariant: every required subdirectory exists after a successful
    // install, even when the source ships no files for one of them.
    if !dry_run {
        for subdir in paths::REQUIRED_SUBDIRS {
            io::ensure_dir(&root.join(subdir))?;
        }
    }

    for rel in &report.preserved {
        journal.record(format!("preserve: {rel}"));
    }

    Ok(report)
}

fn write_source_file(root: &Path, rel_path: &str, content: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    io::atomic_write(&root.join(rel_path), content.as_bytes()).map_err(|e| match e {
        FlowkitError::Io(source) => FlowkitError::Copy {
            rel_path: rel_path.to_string(),
            source,
        },
        other => other,
    })
}

/// Target files under the managed subdirectories that the source tree does
/// not know about — user-authored, always preserved.
fn custom_assets(root: &Path, source: &SourceTree) -> Result<Vec<String>> {
    let known: HashSet<&str> = source.files().iter().map(|f| f.rel_path.as_str()).collect();
    let mut customs = Vec::new();
    for subdir in paths::REQUIRED_SUBDIRS {
        for rel in io::relative_file_paths(&root.join(subdir))? {
            let full_rel = format!("{subdir}/{rel}");
            if !known.contains(full_rel.as_str()) {
                customs.push(full_rel);
            }
        }
    }
    customs.sort();
    Ok(customs)
}
