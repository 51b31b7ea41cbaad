use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

/// Name of the installation root directory created under the target.
pub const ROOT_DIR: &str = ".claude";

pub const COMMANDS_DIR: &str = "commands";
pub const SCRIPTS_DIR: &str = "scripts";
pub const AGENTS_DIR: &str = "agents";
pub const TEMPLATES_DIR: &str = "templates";
pub const RULES_DIR: &str = "rules";

/// Every subdirectory that must exist after a successful install.
pub const REQUIRED_SUBDIRS: [&str; 5] = [
    COMMANDS_DIR,
    SCRIPTS_DIR,
    AGENTS_DIR,
    TEMPLATES_DIR,
    RULES_DIR,
];

/// Project-level aggregate document inside the installation root.
pub const AGGREGATE_DOC: &str = "CLAUDE.md";

/// Aggregate rules file that accumulates version-stamped rule blocks.
pub const GLOBAL_RULES_FILE: &str = "global-rules.md";

/// Install manifest written after every successful (non-dry-run) install.
pub const MANIFEST_FILE: &str = "install.yaml";

/// Action journal written next to the installation root, not inside it,
/// so fresh installs and backups never sweep it up.
pub const JOURNAL_FILE: &str = "flowkit-install.log";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn install_root(target: &Path) -> PathBuf {
    target.join(ROOT_DIR)
}

pub fn aggregate_doc_path(root: &Path) -> PathBuf {
    root.join(AGGREGATE_DOC)
}

pub fn global_rules_path(root: &Path) -> PathBuf {
    root.join(GLOBAL_RULES_FILE)
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

pub fn journal_path(target: &Path) -> PathBuf {
    target.join(JOURNAL_FILE)
}
