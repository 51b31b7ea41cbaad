use crate::error::{FlowkitError, Result};
use serde::Serialize;

/// Result of probing one optional external tool.
#[derive(Debug, Clone, Serialize)]
pub struct PrereqStatus {
    pub tool: String,
    pub found: bool,
    pub skipped: bool,
}

struct Prereq {
    tool: &'static str,
    hint: &'static str,
    skipped: bool,
}

/// Probe the external tools the installed scripts rely on.
///
/// The skip flags are pure pass/skip toggles: a skipped tool is reported but
/// never checked. An unskipped missing tool aborts the run before backup or
/// mutation, naming exactly which prerequisite failed.
pub fn check_prerequisites(skip_mcp: bool, skip_python: bool) -> Result<Vec<PrereqStatus>> {
    let prereqs = [
        Prereq {
            tool: "python3",
            hint: "install Python 3 or re-run with --skip-python",
            skipped: skip_python,
        },
        Prereq {
            tool: "npx",
            hint: "install Node.js (for MCP servers) or re-run with --skip-mcp",
            skipped: skip_mcp,
        },
    ];

    prereqs
        .iter()
        .map(|p| evaluate(p.tool, p.hint, p.skipped, which::which(p.tool).is_ok()))
        .collect()
}

fn evaluate(tool: &str, hint: &str, skipped: bool, found: bool) -> Result<PrereqStatus> {
    if skipped {
        return Ok(PrereqStatus {
            tool: tool.to_string(),
            found,
            skipped: true,
        });
    }
    if !found {
        return Err(FlowkitError::Prerequisite {
            tool: tool.to_string(),
            hint: hint.to_string(),
        });
    }
    Ok(PrereqStatus {
        tool: tool.to_string(),
        found: true,
        skipped: false,
    })
}
