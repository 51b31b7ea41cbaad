pub mod assets;
pub mod backup;
pub mod error;
pub mod io;
pub mod journal;
pub mod manifest;
pub mod mode;
pub mod paths;
pub mod prereq;
pub mod reconcile;
pub mod rules;
pub mod source;
pub mod target;
pub mod verify;

pub use error::{FlowkitError, Result};
