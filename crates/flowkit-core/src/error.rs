use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowkitError {
    #[error("target path is not writable: {} (check directory permissions)", .0.display())]
    PathNotWritable(PathBuf),

    #[error("cannot resolve target path '{0}'")]
    PathUnresolvable(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error("invalid install mode '{0}': expected fresh, merge, or update-workflows")]
    InvalidMode(String),

    #[error("missing prerequisite '{tool}': {hint}")]
    Prerequisite { tool: String, hint: String },

    #[error("backup to {} failed: {source}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy '{rel_path}': {source}")]
    Copy {
        rel_path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to merge global rules into {}: {source}", .path.display())]
    Merge {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("verification failed: {0}")]
    Verification(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FlowkitError>;
