//! Built-in scaffolding assets, embedded at compile time.
//!
//! Relative paths use `/` separators and are joined onto the installation
//! root at copy time. Everything here is managed content: update-workflows
//! installs replace these files while leaving user-authored ones alone.

/// Every built-in asset as `(relative path, content)`.
pub const BUILTIN: &[(&str, &str)] = &[
    ("CLAUDE.md", AGGREGATE_DOC),
    ("commands/plan-prd.md", PLAN_PRD_COMMAND),
    ("commands/analyze-quality.md", ANALYZE_QUALITY_COMMAND),
    ("commands/review-code.md", REVIEW_CODE_COMMAND),
    ("commands/session-notes.md", SESSION_NOTES_COMMAND),
    ("scripts/plan/generate_prd.py", GENERATE_PRD_SCRIPT),
    ("scripts/analyze/run_analyzer.py", RUN_ANALYZER_SCRIPT),
    ("scripts/setup/check_env.sh", CHECK_ENV_SCRIPT),
    ("agents/code-reviewer.md", CODE_REVIEWER_AGENT),
    ("agents/planner.md", PLANNER_AGENT),
    ("templates/session-notes.md", SESSION_NOTES_TEMPLATE),
    ("templates/prd.md", PRD_TEMPLATE),
    ("rules/coding-style.md", CODING_STYLE_RULES),
    ("rules/testing.md", TESTING_RULES),
];

/// Content merged into `global-rules.md` under the version-stamped marker.
/// Kept out of [`BUILTIN`] — it is appended, never copied wholesale.
pub const GLOBAL_RULES: &str = r#"## Global Rules

These rules apply to every workflow command and agent in this installation.

- Read the relevant rule files under `rules/` before writing code.
- Never commit directly to the default branch; use a feature branch.
- Failures must be visible: never retry silently or mask a failing step.
- Keep session notes with `/session-notes` so context survives restarts.
- Prefer the project's existing tooling over introducing new dependencies.
"#;

const AGGREGATE_DOC: &str = r#"# CLAUDE.md

Project configuration for AI-assisted development workflows.

## Layout

- `commands/` — slash-command workflow definitions
- `scripts/` — helper scripts invoked by commands
- `agents/` — subagent persona definitions
- `templates/` — document templates used by commands
- `rules/` — coding and process rules

## Conventions

Commands reference scripts by path relative to this directory. Rules are
loaded in addition to `global-rules.md`, which holds the versioned baseline.
"#;

const PLAN_PRD_COMMAND: &str = r#"---
description: Draft a product requirements document for a feature
argument-hint: <feature description>
allowed-tools: Bash, Read, Write, Glob, Grep
---

# plan-prd

Draft a PRD for the feature described in $ARGUMENTS.

## Steps

1. Survey the codebase for related functionality (Glob, Grep).
2. Run `python3 scripts/plan/generate_prd.py --feature "$ARGUMENTS"` to get
   the skeleton, or start from `templates/prd.md` if Python is unavailable.
3. Fill in goals, non-goals, user stories, and acceptance criteria.
4. Write the result to `docs/prd/<feature-slug>.md` and show a summary.
"#;

const ANALYZE_QUALITY_COMMAND: &str = r#"---
description: Run static quality analysis and summarize findings
argument-hint: [path]
allowed-tools: Bash, Read, Glob
---

# analyze-quality

Run the quality analyzer over $ARGUMENTS (default: the whole repository).

## Steps

1. `python3 scripts/analyze/run_analyzer.py --path "${ARGUMENTS:-.}"`
2. Group findings by severity. Complexity hotspots first.
3. For each hotspot, read the file and propose one concrete refactor.
4. Do not fix anything in this command — report only.
"#;

const REVIEW_CODE_COMMAND: &str = r#"---
description: Review staged changes against the project rules
argument-hint: [base-ref]
allowed-tools: Bash, Read, Grep
---

# review-code

Review the diff against ${ARGUMENTS:-HEAD} using the persona in
`agents/code-reviewer.md`.

## Steps

1. `git diff ${ARGUMENTS:-HEAD} --stat` then the full diff.
2. Check every changed file against `rules/coding-style.md` and
   `rules/testing.md`.
3. Report findings as blocking / non-blocking. Cite file and line.
"#;

const SESSION_NOTES_COMMAND: &str = r#"---
description: Write session notes so context survives a restart
allowed-tools: Read, Write
---

# session-notes

Capture the current working state using `templates/session-notes.md`.
Record what was attempted, what worked, open questions, and the exact next
step. Write to `docs/sessions/<date>.md`.
"#;

// The f-strings below contain `"#` sequences, hence the longer delimiter.
const GENERATE_PRD_SCRIPT: &str = r###"#!/usr/bin/env python3
"""Emit a PRD skeleton for a feature description."""

import argparse
import sys


def main() -> int:
    parser = argparse.ArgumentParser()
    parser.add_argument("--feature", required=True)
    args = parser.parse_args()

    print(f"# PRD: {args.feature}\n")
    for section in ("Goals", "Non-goals", "User stories", "Acceptance criteria"):
        print(f"## {section}\n\n- TBD\n")
    return 0


if __name__ == "__main__":
    sys.exit(main())
"###;

const RUN_ANALYZER_SCRIPT: &str = r#"#!/usr/bin/env python3
"""Thin wrapper around the complexity analyzer.

Falls back to a line-count report when lizard is not installed.
"""

import argparse
import pathlib
import sys


def main() -> int:
    parser = argparse.ArgumentParser()
    parser.add_argument("--path", default=".")
    args = parser.parse_args()

    try:
        import lizard  # type: ignore
    except ImportError:
        for p in sorted(pathlib.Path(args.path).rglob("*.py")):
            print(f"{p}: {sum(1 for _ in p.open())} lines")
        return 0

    analysis = lizard.analyze([args.path])
    for f in analysis:
        for fn in f.function_list:
            if fn.cyclomatic_complexity > 10:
                print(f"{f.filename}:{fn.start_line} {fn.name} CCN={fn.cyclomatic_complexity}")
    return 0


if __name__ == "__main__":
    sys.exit(main())
"#;

const CHECK_ENV_SCRIPT: &str = r#"#!/usr/bin/env sh
# Verify optional tooling used by the workflow commands.
set -e

for tool in python3 npx git; do
    if command -v "$tool" >/dev/null 2>&1; then
        echo "ok:      $tool"
    else
        echo "missing: $tool"
    fi
done
"#;

const CODE_REVIEWER_AGENT: &str = r#"# Code Reviewer

You are a meticulous senior engineer reviewing a colleague's change.

- Verify behavior first, style second.
- Every finding cites a file and line and says why it matters.
- Distinguish blocking issues from suggestions.
- Praise is allowed but never padding.
- If the diff is too large to review well, say so and ask for a split.
"#;

const PLANNER_AGENT: &str = r#"# Planner

You break vague feature requests into small, independently shippable steps.

- Each step names its files, its risk, and how to verify it.
- Surface hidden dependencies before they become blockers.
- Prefer boring, reversible choices; flag one-way doors explicitly.
"#;

const SESSION_NOTES_TEMPLATE: &str = r#"# Session Notes — <date>

## What was attempted

## What worked

## Open questions

## Exact next step
"#;

const PRD_TEMPLATE: &str = r#"# PRD: <feature>

## Goals

## Non-goals

## User stories

## Acceptance criteria
"#;

const CODING_STYLE_RULES: &str = r#"# Coding Style

- Match the surrounding code before any style guide.
- Functions do one thing; name them for what they return or do.
- No dead code behind feature flags that nobody owns.
- Comments state invariants, not narration.
"#;

const TESTING_RULES: &str = r#"# Testing

- Every bug fix lands with a test that failed before the fix.
- Tests assert behavior, not implementation details.
- A flaky test is a bug; quarantine it the day it flakes.
"#;
