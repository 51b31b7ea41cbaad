use crate::error::{FlowkitError, Result};
use crate::manifest::InstallManifest;
use crate::paths;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Expand `~` and make `raw` absolute against `cwd`. Pure — no filesystem
/// access — so the expansion rules are testable on any platform.
pub fn expand_input(raw: &str, home: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let expanded = if raw == "~" {
        home.ok_or(FlowkitError::HomeNotFound)?.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        home.ok_or(FlowkitError::HomeNotFound)?.join(rest)
    } else {
        PathBuf::from(raw)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(cwd.join(expanded))
    }
}

/// Resolve a raw target argument to an absolute path without probing
/// writability. `None` or an empty string means the current directory.
pub fn resolve_path(raw: Option<&str>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|_| FlowkitError::PathUnresolvable(raw.unwrap_or(".").to_string()))?;
    match raw {
        None | Some("") => Ok(cwd),
        Some(s) => expand_input(s, home::home_dir().as_deref(), &cwd),
    }
}

/// Resolve the install target: expansion plus a writability probe.
///
/// The probe creates and deletes a temp file in the target directory, which
/// is created first if absent. Any failure is a `PathNotWritable` — raised
/// before backup or mutation is attempted. On a dry run a missing target is
/// left missing: the path is resolved and returned unprobed, since creating
/// the directory would itself be a mutation.
pub fn resolve_target(raw: Option<&str>, dry_run: bool) -> Result<PathBuf> {
    let target = resolve_path(raw)?;
    if !target.is_dir() {
        if dry_run {
            return Ok(target);
        }
        std::fs::create_dir_all(&target)
            .map_err(|_| FlowkitError::PathNotWritable(target.clone()))?;
    }
    let probe =
        NamedTempFile::new_in(&target).map_err(|_| FlowkitError::PathNotWritable(target.clone()))?;
    probe
        .close()
        .map_err(|_| FlowkitError::PathNotWritable(target.clone()))?;
    Ok(target)
}

/// What we know about an installation that is already present at the target.
#[derive(Debug, Clone)]
pub struct ExistingInstall {
    pub root: PathBuf,
    /// Version recorded in the install manifest, if one is readable.
    /// Pre-manifest installations report `None`.
    pub previous_version: Option<String>,
}

/// Detect an existing installation root under `target`.
pub fn detect_existing(target: &Path) -> Option<ExistingInstall> {
    let root = paths::install_root(target);
    if !root.is_dir() {
        return None;
    }
    let previous_version = InstallManifest::load(&root)
        .ok()
        .map(|m| m.flowkit_version);
    Some(ExistingInstall {
        root,
        previous_version,
    })
}
