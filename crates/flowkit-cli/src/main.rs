mod cmd;
mod output;

use clap::{Parser, Subcommand};
use flowkit_core::mode::InstallMode;

#[derive(Parser)]
#[command(
    name = "flowkit",
    about = "Installer and updater for AI-assistant workflow scaffolding",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install or update the scaffolding tree in a target directory
    Install {
        /// Target directory (default: current directory; `~` expands)
        target: Option<String>,

        /// Select the install mode non-interactively
        #[arg(long = "install-mode")]
        install_mode: Option<InstallMode>,

        /// Report intended actions without mutating anything
        #[arg(long)]
        dry_run: bool,

        /// Skip the MCP tooling prerequisite check (npx)
        #[arg(long)]
        skip_mcp: bool,

        /// Skip the Python prerequisite check
        #[arg(long)]
        skip_python: bool,

        /// Never prompt; accept defaults (fresh when no mode is given)
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Verify the structure of an existing installation
    Verify {
        /// Target directory (default: current directory; `~` expands)
        target: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Install {
            target,
            install_mode,
            dry_run,
            skip_mcp,
            skip_python,
            yes,
        } => cmd::install::run(cmd::install::InstallArgs {
            target,
            mode: install_mode,
            dry_run,
            skip_mcp,
            skip_python,
            yes,
            json: cli.json,
        }),
        Commands::Verify { target } => cmd::verify::run(target.as_deref(), cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
