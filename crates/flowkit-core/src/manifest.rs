use crate::error::Result;
use crate::io;
use crate::mode::InstallMode;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Record of the last successful install, persisted as
/// `.claude/install.yaml`. Read back by existing-installation detection to
/// report "previous → current" on updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallManifest {
    pub flowkit_version: String,
    /// RFC 3339 timestamp of the install.
    pub installed_at: String,
    pub mode: InstallMode,
}

impl InstallManifest {
    pub fn stamp(version: &str, mode: InstallMode) -> Self {
        Self {
            flowkit_version: version.to_string(),
            installed_at: chrono::Utc::now().to_rfc3339(),
            mode,
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(paths::manifest_path(root))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        io::atomic_write(&paths::manifest_path(root), yaml.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let manifest = InstallManifest::stamp("0.4.2", InstallMode::Merge);
        manifest.save(dir.path()).unwrap();

        let loaded = InstallManifest::load(dir.path()).unwrap();
        assert_eq!(loaded.flowkit_version, "0.4.2");
        assert_eq!(loaded.mode, InstallMode::Merge);
    }

    #[test]
    fn mode_serializes_kebab_case() {
        let manifest = InstallManifest::stamp("0.4.2", InstallMode::UpdateWorkflows);
        let yaml = serde_yaml::to_string(&manifest).unwrap();
        assert!(yaml.contains("update-workflows"));
    }

    #[test]
    fn load_missing_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(InstallManifest::load(dir.path()).is_err());
    }
}
