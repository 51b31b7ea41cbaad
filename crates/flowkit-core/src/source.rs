use crate::assets;
use crate::error::Result;
use crate::io;
use crate::paths;
use std::path::Path;

/// One file in the source asset tree.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Relative path under the installation root, `/`-separated.
    pub rel_path: String,
    pub content: String,
}

/// The source asset tree the installer reconciles the target against.
///
/// Either the built-in embedded assets or a directory on disk (used by tests
/// and by operators who maintain their own asset checkout). The global rules
/// document is carried separately: it is merged, never copied wholesale.
#[derive(Debug, Clone)]
pub struct SourceTree {
    files: Vec<SourceFile>,
    global_rules: String,
}

/// Top-level files excluded when loading a source tree from disk:
/// repository documentation and the installer scripts themselves.
fn is_excluded_top_level(rel_path: &str) -> bool {
    if rel_path.contains('/') {
        return false;
    }
    rel_path == "README.md"
        || rel_path.ends_with(".ps1")
        || rel_path
            .strip_prefix("install.")
            .is_some_and(|ext| !ext.contains('.'))
}

impl SourceTree {
    /// The embedded default asset set.
    pub fn builtin() -> Self {
        Self {
            files: assets::BUILTIN
                .iter()
                .map(|(rel, content)| SourceFile {
                    rel_path: (*rel).to_string(),
                    content: (*content).to_string(),
                })
                .collect(),
            global_rules: assets::GLOBAL_RULES.to_string(),
        }
    }

    /// Load a source tree from a directory on disk.
    ///
    /// `global-rules.md` at the top level feeds the merge step instead of the
    /// copy set; documentation and installer scripts are skipped entirely.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut files = Vec::new();
        let mut global_rules = String::new();
        for rel_path in io::relative_file_paths(dir)? {
            if is_excluded_top_level(&rel_path) {
                continue;
            }
            let content = std::fs::read_to_string(dir.join(&rel_path))?;
            if rel_path == paths::GLOBAL_RULES_FILE {
                global_rules = content;
            } else {
                files.push(SourceFile { rel_path, content });
            }
        }
        Ok(Self {
            files,
            global_rules,
        })
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.files.iter().any(|f| f.rel_path == rel_path)
    }

    pub fn global_rules(&self) -> &str {
        &self.global_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_tree_covers_every_required_subdir() {
        let tree = SourceTree::builtin();
        for subdir in paths::REQUIRED_SUBDIRS {
            assert!(
                tree.files()
                    .iter()
                    .any(|f| f.rel_path.starts_with(&format!("{subdir}/"))),
                "no builtin asset under {subdir}/"
            );
        }
        assert!(tree.contains(paths::AGGREGATE_DOC));
        assert!(!tree.global_rules().is_empty());
    }

    #[test]
    fn from_dir_skips_docs_and_installer_scripts() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("commands")).unwrap();
        std::fs::write(dir.path().join("commands/go.md"), "go").unwrap();
        std::fs::write(dir.path().join("README.md"), "docs").unwrap();
        std::fs::write(dir.path().join("install.ps1"), "ps").unwrap();
        std::fs::write(dir.path().join("install.sh"), "sh").unwrap();

        let tree = SourceTree::from_dir(dir.path()).unwrap();
        assert!(tree.contains("commands/go.md"));
        assert!(!tree.contains("README.md"));
        assert!(!tree.contains("install.ps1"));
        assert!(!tree.contains("install.sh"));
    }

    #[test]
    fn from_dir_extracts_global_rules() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("global-rules.md"), "## Rules\n").unwrap();
        std::fs::write(dir.path().join("CLAUDE.md"), "# Doc\n").unwrap();

        let tree = SourceTree::from_dir(dir.path()).unwrap();
        assert_eq!(tree.global_rules(), "## Rules\n");
        assert!(!tree.contains("global-rules.md"));
        assert!(tree.contains("CLAUDE.md"));
    }

    #[test]
    fn nested_readme_is_not_excluded() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("scripts/analyze")).unwrap();
        std::fs::write(dir.path().join("scripts/analyze/README.md"), "how-to").unwrap();

        let tree = SourceTree::from_dir(dir.path()).unwrap();
        assert!(tree.contains("scripts/analyze/README.md"));
    }
}
