use crate::paths;
use crate::rules;
use serde::Serialize;
use std::path::Path;

/// One structural check against the installation root.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: String,
    /// Required checks gate overall success; the rest are warnings.
    pub required: bool,
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub checks: Vec<Check>,
}

impl VerificationReport {
    /// Overall success: every required check passed. Warning-level checks
    /// (aggregate document, rules file) never fail the install.
    pub fn ok(&self) -> bool {
        self.checks.iter().all(|c| !c.required || c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.required && !c.passed)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.required && !c.passed)
    }
}

/// Structural post-install verification of the installation root.
pub fn verify(root: &Path) -> VerificationReport {
    let mut checks = Vec::new();

    for subdir in paths::REQUIRED_SUBDIRS {
        let present = root.join(subdir).is_dir();
        checks.push(Check {
            name: format!("{subdir}/"),
            required: true,
            passed: present,
            message: if present {
                format!("{subdir}/ present")
            } else {
                format!("{subdir}/ missing from {}", root.display())
            },
        });
    }

    let doc = paths::aggregate_doc_path(root);
    let doc_present = doc.is_file();
    checks.push(Check {
        name: paths::AGGREGATE_DOC.to_string(),
        required: false,
        passed: doc_present,
        message: if doc_present {
            format!("{} present", paths::AGGREGATE_DOC)
        } else {
            format!("{} missing (warning only)", paths::AGGREGATE_DOC)
        },
    });

    let rules_path = paths::global_rules_path(root);
    let rules_content = std::fs::read_to_string(&rules_path).unwrap_or_default();
    let rules_ok = !rules_content.trim().is_empty();
    checks.push(Check {
        name: paths::GLOBAL_RULES_FILE.to_string(),
        required: false,
        passed: rules_ok,
        message: if rules_ok {
            let versions = rules::stamped_versions(&rules_content);
            if versions.is_empty() {
                format!("{} present (no version stamp)", paths::GLOBAL_RULES_FILE)
            } else {
                format!(
                    "{} present (versions: {})",
                    paths::GLOBAL_RULES_FILE,
                    versions.join(", ")
                )
            }
        } else {
            format!("{} missing or empty (warning only)", paths::GLOBAL_RULES_FILE)
        },
    });

    VerificationReport { checks }
}
