use crate::error::FlowkitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an existing installation is reconciled with the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallMode {
    /// Delete the installation root and copy the whole source tree.
    Fresh,
    /// No-clobber copy: existing target files always win.
    Merge,
    /// Replace built-in assets, preserve user-authored ones.
    UpdateWorkflows,
}

impl InstallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMode::Fresh => "fresh",
            InstallMode::Merge => "merge",
            InstallMode::UpdateWorkflows => "update-workflows",
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallMode {
    type Err = FlowkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fresh" => Ok(InstallMode::Fresh),
            "merge" => Ok(InstallMode::Merge),
            "update-workflows" | "update-workflows-only" => Ok(InstallMode::UpdateWorkflows),
            other => Err(FlowkitError::InvalidMode(other.to_string())),
        }
    }
}

/// Outcome of the mode decision, before any terminal I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeDecision {
    Selected(InstallMode),
    /// Interactive session with no mode supplied — caller must prompt.
    PromptRequired,
}

/// Decide the install mode without touching stdin.
///
/// A supplied `--install-mode` always wins. Otherwise interactive sessions
/// get a prompt and non-interactive ones default to a fresh install.
pub fn decide_mode(interactive: bool, supplied: Option<InstallMode>) -> ModeDecision {
    match supplied {
        Some(mode) => ModeDecision::Selected(mode),
        None if interactive => ModeDecision::PromptRequired,
        None => ModeDecision::Selected(InstallMode::Fresh),
    }
}

/// One entry in the interactive mode menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Mode(InstallMode),
    Cancel,
}

/// Parse a line of menu input. Accepts the option number or the mode name.
/// Returns `None` for unrecognized input so the caller can re-prompt.
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" | "fresh" => Some(MenuChoice::Mode(InstallMode::Fresh)),
        "2" | "merge" => Some(MenuChoice::Mode(InstallMode::Merge)),
        "3" | "update-workflows" => Some(MenuChoice::Mode(InstallMode::UpdateWorkflows)),
        "4" | "cancel" | "q" => Some(MenuChoice::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_mode_wins_over_interactivity() {
        assert_eq!(
            decide_mode(true, Some(InstallMode::Merge)),
            ModeDecision::Selected(InstallMode::Merge)
        );
    }

    #[test]
    fn non_interactive_defaults_to_fresh() {
        assert_eq!(
            decide_mode(false, None),
            ModeDecision::Selected(InstallMode::Fresh)
        );
    }

    #[test]
    fn interactive_without_mode_requires_prompt() {
        assert_eq!(decide_mode(true, None), ModeDecision::PromptRequired);
    }

    #[test]
    fn parse_mode_strings() {
        assert_eq!("fresh".parse::<InstallMode>().unwrap(), InstallMode::Fresh);
        assert_eq!(
            "update-workflows".parse::<InstallMode>().unwrap(),
            InstallMode::UpdateWorkflows
        );
        // Long form from older installer revisions is accepted too
        assert_eq!(
            "update-workflows-only".parse::<InstallMode>().unwrap(),
            InstallMode::UpdateWorkflows
        );
        assert!("rebuild".parse::<InstallMode>().is_err());
    }

    #[test]
    fn menu_accepts_numbers_and_names() {
        assert_eq!(
            parse_menu_choice("1"),
            Some(MenuChoice::Mode(InstallMode::Fresh))
        );
        assert_eq!(
            parse_menu_choice(" merge \n"),
            Some(MenuChoice::Mode(InstallMode::Merge))
        );
        assert_eq!(parse_menu_choice("4"), Some(MenuChoice::Cancel));
        assert_eq!(parse_menu_choice("cancel"), Some(MenuChoice::Cancel));
        assert_eq!(parse_menu_choice("banana"), None);
    }
}
