use crate::error::Result;
use crate::io;
use std::path::Path;

/// In-memory log of every action taken during an install run.
///
/// Entries are buffered and flushed to disk in one append at the end of the
/// run (or on failure), so a `--dry-run` that never flushes leaves no trace
/// on the filesystem.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<String>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timestamped action line.
    pub fn record(&mut self, action: impl AsRef<str>) {
        let stamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        self.entries.push(format!("[{stamp}] {}", action.as_ref()));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Append all buffered entries to the log file at `path`.
    pub fn flush(&self, path: &Path) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let mut block = self.entries.join("\n");
        block.push('\n');
        io::append_text(path, &block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn records_timestamped_entries() {
        let mut journal = Journal::new();
        journal.record("backup: .claude -> .claude.backup.20260830_101500");
        assert_eq!(journal.entries().len(), 1);
        assert!(journal.entries()[0].starts_with('['));
        assert!(journal.entries()[0].ends_with(".claude.backup.20260830_101500"));
    }

    #[test]
    fn flush_appends_to_existing_log() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("flowkit-install.log");
        std::fs::write(&log, "[old] previous run\n").unwrap();

        let mut journal = Journal::new();
        journal.record("reconcile: fresh");
        journal.flush(&log).unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        assert!(content.starts_with("[old] previous run\n"));
        assert!(content.contains("reconcile: fresh"));
    }

    #[test]
    fn empty_journal_flush_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("flowkit-install.log");
        Journal::new().flush(&log).unwrap();
        assert!(!log.exists());
    }
}
