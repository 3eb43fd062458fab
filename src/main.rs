use anyhow::{Context, bail};
use clap::Parser;
use emoji_chaos::{Config, FixedConfirm, Mode, Outcome, PromptConfirm};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "emoji-chaos",
    version,
    author,
    about = "Add emoji chaos to text files (for demo purposes!)",
    long_about = "Add emoji chaos to text files.\n\n\
    Each file is decorated with emoji, multiplied punctuation, random capitals and \
    enthusiastic phrases. A preview is shown and nothing is written until you confirm. \
    The original is kept as <file>.bak unless --no-backup is given.\n\n\
    USAGE EXAMPLES:\n  \
      # Preview level 3 chaos\n  \
      emoji-chaos notes.txt --chaos-level 3 --dry-run\n\n  \
      # Maximum chaos, reproducible\n  \
      emoji-chaos notes.txt -c 10 --seed 42\n\n  \
      # Undo\n  \
      emoji-chaos notes.txt --restore"
)]
struct Cli {
    /// Files to process
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Chaos level
    #[arg(
        short,
        long,
        env = "CHAOS_LEVEL",
        default_value_t = 7,
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    chaos_level: u8,

    /// Preview changes without applying
    #[arg(long)]
    dry_run: bool,

    /// Don't create backup files
    #[arg(long)]
    no_backup: bool,

    /// Restore files from their backups
    #[arg(long, conflicts_with_all = ["dry_run", "no_backup", "yes"])]
    restore: bool,

    /// Random seed for reproducible output
    #[arg(long, env = "CHAOS_SEED")]
    seed: Option<u64>,

    /// Apply changes without asking
    #[arg(short, long)]
    yes: bool,

    /// Write a JSON run report
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let mut builder = Config::builder()
        .paths(cli.paths)
        .chaos_level(cli.chaos_level)
        .dry_run(cli.dry_run)
        .backup(!cli.no_backup);

    if cli.restore {
        builder = builder.mode(Mode::Restore);
    }

    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }

    if let Some(report) = cli.report {
        builder = builder.report_path(report);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let result = if cli.yes {
        emoji_chaos::run(config, FixedConfirm(true))
    } else {
        emoji_chaos::run(config, PromptConfirm::stdin())
    };
    let stats = result.context("Run failed")?;

    stats.print_summary();

    let failed = stats.count(Outcome::Failed);
    if failed > 0 {
        bail!("{failed} of {} file(s) failed", stats.files.len());
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("emoji_chaos=info"),
        1 => EnvFilter::new("emoji_chaos=debug"),
        _ => EnvFilter::new("emoji_chaos=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();
}
