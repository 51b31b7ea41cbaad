use flowkit_core::{paths, target, verify, FlowkitError};

use crate::output;

/// `flowkit verify` — re-run the structural post-install checks.
pub fn run(target_arg: Option<&str>, json: bool) -> anyhow::Result<()> {
    let target_dir = target::resolve_path(target_arg)?;
    let root = paths::install_root(&target_dir);
    let report = verify::verify(&root);

    if json {
        output::print_json(&report)?;
    } else {
        output::print_verification(&report);
    }

    if !report.ok() {
        let missing: Vec<_> = report.failures().map(|c| c.name.clone()).collect();
        return Err(FlowkitError::Verification(format!(
            "{} under {}: run 'flowkit install' to repair",
            missing.join(", "),
            root.display()
        ))
        .into());
    }
    Ok(())
}
