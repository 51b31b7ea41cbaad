use crate::error::{FlowkitError, Result};
use crate::io;
use crate::journal::Journal;
use crate::paths;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Marker line that stamps a rules block with the installer version that
/// wrote it. Idempotence key: a file containing the marker for the current
/// version is never touched again by that version.
pub fn version_marker(version: &str) -> String {
    format!("<!-- flowkit:rules v{version} -->")
}

static MARKER_RE: OnceLock<Regex> = OnceLock::new();

fn marker_re() -> &'static Regex {
    MARKER_RE.get_or_init(|| Regex::new(r"<!-- flowkit:rules v([^\s]+) -->").unwrap())
}

/// All versions stamped into a rules aggregate, in document order.
pub fn stamped_versions(content: &str) -> Vec<String> {
    marker_re()
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// What the merge step did to the rules aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesMergeOutcome {
    /// File did not exist; created with the stamped block.
    Created,
    /// Current version already stamped; file untouched.
    AlreadyCurrent,
    /// Prior content kept; stamped block appended.
    Appended,
}

/// Merge the source rules content into the target's rules aggregate.
///
/// Never overwrites prior content. Running twice with the same version
/// leaves the file byte-identical after the first run.
pub fn merge_global_rules(
    root: &Path,
    rules_content: &str,
    version: &str,
    dry_run: bool,
    journal: &mut Journal,
) -> Result<RulesMergeOutcome> {
    let path = paths::global_rules_path(root);
    let marker = version_marker(version);
    let prefix = if dry_run { "(dry-run) " } else { "" };

    let map_err = |source: FlowkitError| match source {
        FlowkitError::Io(source) => FlowkitError::Merge {
            path: paths::global_rules_path(root),
            source,
        },
        other => other,
    };

    if !path.exists() {
        journal.record(format!("{prefix}rules: create {}", path.display()));
        if !dry_run {
            let content = format!("{marker}\n\n{}", block_body(rules_content));
            io::atomic_write(&path, content.as_bytes()).map_err(map_err)?;
        }
        return Ok(RulesMergeOutcome::Created);
    }

    let existing = std::fs::read_to_string(&path).map_err(|source| FlowkitError::Merge {
        path: path.clone(),
        source,
    })?;

    if existing.contains(&marker) {
        journal.record(format!("rules: v{version} already present, skipped"));
        return Ok(RulesMergeOutcome::AlreadyCurrent);
    }

    journal.record(format!("{prefix}rules: append v{version} block"));
    if !dry_run {
        let sep = if existing.ends_with('\n') { "" } else { "\n" };
        let addition = format!("{sep}\n---\n\n{marker}\n\n{}", block_body(rules_content));
        io::append_text(&path, &addition).map_err(map_err)?;
    }
    Ok(RulesMergeOutcome::Appended)
}

fn block_body(rules_content: &str) -> String {
    let trimmed = rules_content.trim_end();
    format!("{trimmed}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RULES: &str = "## Global Rules\n\n- be kind\n";

    fn root(dir: &TempDir) -> std::path::PathBuf {
        let root = dir.path().join(".claude");
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    #[test]
    fn creates_file_with_stamped_block() {
        let dir = TempDir::new().unwrap();
        let root = root(&dir);
        let mut journal = Journal::new();

        let outcome = merge_global_rules(&root, RULES, "0.4.2", false, &mut journal).unwrap();
        assert_eq!(outcome, RulesMergeOutcome::Created);

        let content = std::fs::read_to_string(root.join("global-rules.md")).unwrap();
        assert!(content.starts_with("<!-- flowkit:rules v0.4.2 -->"));
        assert!(content.contains("- be kind"));
    }

    #[test]
    fn second_run_with_same_version_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let root = root(&dir);
        let mut journal = Journal::new();

        merge_global_rules(&root, RULES, "0.4.2", false, &mut journal).unwrap();
        let first = std::fs::read(root.join("global-rules.md")).unwrap();

        let outcome = merge_global_rules(&root, RULES, "0.4.2", false, &mut journal).unwrap();
        assert_eq!(outcome, RulesMergeOutcome::AlreadyCurrent);
        assert_eq!(std::fs::read(root.join("global-rules.md")).unwrap(), first);
    }

    #[test]
    fn appends_below_custom_content() {
        let dir = TempDir::new().unwrap();
        let root = root(&dir);
        let custom = "# Project notes\n\nDo not touch this.\n";
        std::fs::write(root.join("global-rules.md"), custom).unwrap();
        let mut journal = Journal::new();

        let outcome = merge_global_rules(&root, RULES, "0.4.2", false, &mut journal).unwrap();
        assert_eq!(outcome, RulesMergeOutcome::Appended);

        let content = std::fs::read_to_string(root.join("global-rules.md")).unwrap();
        assert!(content.starts_with(custom));
        assert_eq!(stamped_versions(&content), vec!["0.4.2".to_string()]);
    }

    #[test]
    fn new_version_appends_second_block() {
        let dir = TempDir::new().unwrap();
        let root = root(&dir);
        let mut journal = Journal::new();

        merge_global_rules(&root, RULES, "0.4.1", false, &mut journal).unwrap();
        merge_global_rules(&root, RULES, "0.4.2", false, &mut journal).unwrap();

        let content = std::fs::read_to_string(root.join("global-rules.md")).unwrap();
        assert_eq!(
            stamped_versions(&content),
            vec!["0.4.1".to_string(), "0.4.2".to_string()]
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let root = root(&dir);
        let mut journal = Journal::new();

        let outcome = merge_global_rules(&root, RULES, "0.4.2", true, &mut journal).unwrap();
        assert_eq!(outcome, RulesMergeOutcome::Created);
        assert!(!root.join("global-rules.md").exists());
    }
}
