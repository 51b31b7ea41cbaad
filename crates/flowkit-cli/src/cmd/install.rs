use anyhow::Context;
use flowkit_core::{
    backup,
    journal::Journal,
    manifest::InstallManifest,
    mode::{self, InstallMode, MenuChoice, ModeDecision},
    paths, prereq, reconcile,
    reconcile::ReconcileReport,
    rules,
    source::SourceTree,
    target,
    verify::{self, VerificationReport},
};
use serde::Serialize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use crate::output;

/// Version of the flowkit binary embedded at compile time. Stamps the rules
/// block and the install manifest.
pub const FLOWKIT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct InstallArgs {
    pub target: Option<String>,
    pub mode: Option<InstallMode>,
    pub dry_run: bool,
    pub skip_mcp: bool,
    pub skip_python: bool,
    pub yes: bool,
    pub json: bool,
}

enum Outcome {
    Cancelled,
    Completed {
        report: ReconcileReport,
        verification: Option<VerificationReport>,
        backup_path: Option<PathBuf>,
        previous_version: Option<String>,
    },
}

#[derive(Serialize)]
struct InstallSummary<'a> {
    target: String,
    version: &'static str,
    previous_version: Option<&'a str>,
    backup: Option<String>,
    reconcile: &'a ReconcileReport,
    verification: Option<&'a VerificationReport>,
}

pub fn run(args: InstallArgs) -> anyhow::Result<()> {
    // Path resolution happens before anything else: an unwritable target
    // aborts without a backup, a journal, or any mutation. A dry run never
    // creates a missing target directory.
    let target_dir = target::resolve_target(args.target.as_deref(), args.dry_run)?;
    let root = paths::install_root(&target_dir);

    let mut journal = Journal::new();
    journal.record(format!(
        "install: target={} version={}{}",
        target_dir.display(),
        FLOWKIT_VERSION,
        if args.dry_run { " (dry-run)" } else { "" }
    ));

    let outcome = run_pipeline(&target_dir, &root, &args, &mut journal);
    let log_path = paths::journal_path(&target_dir);

    match outcome {
        Ok(Outcome::Cancelled) => {
            println!("Installation cancelled. Any backup taken has been left in place.");
            Ok(())
        }
        Ok(Outcome::Completed {
            report,
            verification,
            backup_path,
            previous_version,
        }) => {
            if !args.dry_run {
                journal
                    .flush(&log_path)
                    .with_context(|| format!("failed to write log {}", log_path.display()))?;
            }

            if args.json {
                output::print_json(&InstallSummary {
                    target: target_dir.display().to_string(),
                    version: FLOWKIT_VERSION,
                    previous_version: previous_version.as_deref(),
                    backup: backup_path.as_ref().map(|p| p.display().to_string()),
                    reconcile: &report,
                    verification: verification.as_ref(),
                })?;
            } else {
                print_summary(
                    &root,
                    &report,
                    verification.as_ref(),
                    backup_path.as_deref(),
                    previous_version.as_deref(),
                );
            }

            if let Some(v) = &verification {
                if !v.ok() {
                    eprintln!("Log: {}", log_path.display());
                    anyhow::bail!(
                        "verification failed: {}",
                        v.failures()
                            .map(|c| c.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                }
            }
            Ok(())
        }
        Err(e) => {
            if !args.dry_run {
                // Best effort: the journal is a debugging aid, not a gate.
                let _ = journal.flush(&log_path);
                eprintln!("Install failed. Log: {}", log_path.display());
            }
            eprintln!("Common fixes:");
            eprintln!("  - check write permissions on the target directory");
            eprintln!("  - re-run with --skip-python / --skip-mcp if a prerequisite is missing");
            eprintln!("  - restore from the .backup.<timestamp> directory if needed");
            Err(e)
        }
    }
}

fn run_pipeline(
    target_dir: &Path,
    root: &Path,
    args: &InstallArgs,
    journal: &mut Journal,
) -> anyhow::Result<Outcome> {
    let prereqs = prereq::check_prerequisites(args.skip_mcp, args.skip_python)?;
    for status in &prereqs {
        journal.record(format!(
            "prereq: {} found={} skipped={}",
            status.tool, status.found, status.skipped
        ));
    }

    // Backup comes before the mode prompt: whatever the operator chooses,
    // the pre-mutation state is already safe.
    let existing = target::detect_existing(target_dir);
    let mut backup_path = None;
    if let Some(ex) = &existing {
        if args.dry_run {
            journal.record(format!("(dry-run) backup: would copy {}", ex.root.display()));
        } else {
            backup_path = Some(backup::create_backup(&ex.root, journal)?);
        }
    }

    let interactive = !args.yes && std::io::stdin().is_terminal();
    let selected = match mode::decide_mode(interactive, args.mode) {
        ModeDecision::Selected(m) => m,
        ModeDecision::PromptRequired => {
            match prompt_for_mode(existing.is_some(), backup_path.as_deref())? {
                MenuChoice::Mode(m) => m,
                MenuChoice::Cancel => return Ok(Outcome::Cancelled),
            }
        }
    };
    journal.record(format!("mode: {selected}"));

    let source = SourceTree::builtin();
    let report = reconcile::reconcile(root, &source, selected, args.dry_run, journal)?;
    rules::merge_global_rules(
        root,
        source.global_rules(),
        FLOWKIT_VERSION,
        args.dry_run,
        journal,
    )?;

    // Verification only makes sense against a mutated tree
    let verification = if args.dry_run {
        None
    } else {
        InstallManifest::stamp(FLOWKIT_VERSION, selected)
            .save(root)
            .context("failed to write install manifest")?;
        journal.record(format!("manifest: stamped v{FLOWKIT_VERSION}"));
        Some(verify::verify(root))
    };

    Ok(Outcome::Completed {
        report,
        verification,
        backup_path,
        previous_version: existing.and_then(|e| e.previous_version),
    })
}

/// Interactive mode menu. Loops until the operator enters something
/// recognizable; EOF counts as cancel.
fn prompt_for_mode(
    existing: bool,
    backup_path: Option<&Path>,
) -> anyhow::Result<MenuChoice> {
    if existing {
        println!("An existing installation was detected.");
        if let Some(p) = backup_path {
            println!("Backup taken: {}", p.display());
        }
    }
    println!("Select install mode:");
    println!("  1) fresh             — replace the whole installation");
    println!("  2) merge             — add missing files, never overwrite");
    println!("  3) update-workflows  — refresh built-ins, keep custom assets");
    println!("  4) cancel");

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(MenuChoice::Cancel);
        }
        if let Some(choice) = mode::parse_menu_choice(&line) {
            return Ok(choice);
        }
        println!("Unrecognized choice '{}'", line.trim());
    }
}

fn print_summary(
    root: &Path,
    report: &ReconcileReport,
    verification: Option<&VerificationReport>,
    backup_path: Option<&Path>,
    previous_version: Option<&str>,
) {
    let suffix = if report.dry_run { " (dry-run)" } else { "" };
    println!("Installing into: {}{suffix}", root.display());
    if let Some(prev) = previous_version {
        println!("  previous: {prev}  →  current: {FLOWKIT_VERSION}");
    }
    if let Some(b) = backup_path {
        println!("  backup:  {}", b.display());
    }
    println!("  mode:    {}", report.mode);

    for rel in &report.created {
        println!("  created:  {rel}");
    }
    for rel in &report.replaced {
        println!("  replaced: {rel}");
    }
    for rel in &report.skipped {
        println!("  exists:   {rel}");
    }
    for rel in &report.preserved {
        println!("  custom:   {rel}");
    }

    if let Some(v) = verification {
        println!();
        output::print_verification(v);
        if v.ok() {
            println!("\nInstalled flowkit v{FLOWKIT_VERSION}.");
        }
    } else {
        println!("\nDry run complete — nothing was written.");
    }
}
