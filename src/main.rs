//! lazycommit - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use git2::Repository;
use tracing_subscriber::EnvFilter;

use lazycommit::config::Config;
use lazycommit::error::SnapshotError;
use lazycommit::ui::{ReviewOutcome, TerminalInput};
use lazycommit::{analyzer, llm, rules, snapshot};

/// Generate a conventional-commit message for staged changes.
#[derive(Parser, Debug)]
#[command(name = "lazycommit")]
#[command(about = "Generate a conventional-commit message for staged changes")]
#[command(version)]
struct Cli {
    /// Use this message instead of the generated one
    #[arg(short, long)]
    message: Option<String>,

    /// Skip AI enhancement even when a provider is configured
    #[arg(long)]
    no_ai: bool,

    /// Print the generated message without committing
    #[arg(long)]
    dry_run: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Repository path (defaults to the current directory)
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect or reset the configuration file
    Config {
        /// Print the active configuration
        #[arg(short, long)]
        show: bool,

        /// Overwrite the configuration file with defaults
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(Command::Config { show, reset }) = cli.command {
        return run_config(show, reset);
    }

    let config = Config::load().context("Failed to load configuration")?;

    let repo = Repository::open(&cli.repo)
        .map_err(SnapshotError::OpenRepository)
        .context("Run lazycommit from within a git repository")?;

    let snapshot = snapshot::collect(&repo);
    if snapshot.staged_files.is_empty() {
        return Err(SnapshotError::NothingStaged.into());
    }

    let analysis = analyzer::analyze(&snapshot);
    let rule_message = rules::generate(&analysis, &config);

    let final_message = if let Some(message) = cli.message {
        message
    } else if cli.no_ai {
        rule_message
    } else {
        match llm::enhance_message(&config.ai, &analysis, &rule_message).await {
            Some(enhanced) => {
                tracing::debug!(%enhanced, "using AI-enhanced message");
                enhanced
            }
            None => rule_message,
        }
    };

    lazycommit::ui::print_summary(&analysis, &final_message);

    if cli.dry_run {
        println!();
        println!("Dry run complete. No commit created.");
        return Ok(());
    }

    println!();
    match lazycommit::ui::review(&final_message, &mut TerminalInput) {
        ReviewOutcome::Commit(message) => {
            let oid = snapshot::commit(&repo, &message).context("Failed to create commit")?;
            let short: String = oid.to_string().chars().take(8).collect();
            println!("Created commit {short}: {message}");
        }
        ReviewOutcome::Abort => {
            println!("Aborted. No commit created.");
        }
    }

    Ok(())
}

fn run_config(show: bool, reset: bool) -> Result<()> {
    let path = Config::default_path().context("Could not determine config path")?;

    if reset {
        Config::default()
            .save_to(&path)
            .context("Failed to reset configuration")?;
        println!("Configuration reset: {}", path.display());
        return Ok(());
    }

    if show {
        let config = Config::load().context("Failed to load configuration")?;
        let rendered =
            toml::to_string_pretty(&config).context("Failed to render configuration")?;
        print!("{rendered}");
        return Ok(());
    }

    println!("Configuration file: {}", path.display());
    println!();
    println!("  lazycommit config --show   print the active configuration");
    println!("  lazycommit config --reset  restore defaults");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "lazycommit=debug"
    } else {
        "lazycommit=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
