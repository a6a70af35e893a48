use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use ingrid::commands::{self, Overrides};

#[derive(Parser)]
#[command(name = "ingrid")]
#[command(about = "Ingrid - Label Review\nConfirm or correct machine topic labels one post at a time")]
#[command(version)]
struct Cli {
  /// Config file (defaults to ingrid.json or .ingrid.json in the current directory)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Table of posts to review
  #[arg(long, global = true, env = "INGRID_INPUT")]
  input: Option<PathBuf>,

  /// Where labelled rows are saved (never the input file)
  #[arg(long, global = true, env = "INGRID_OUTPUT")]
  output: Option<PathBuf>,

  /// Start from the input file even if a previous save exists
  #[arg(long, global = true)]
  no_resume: bool,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Review posts one at a time
  Review {
    /// Post number to start at (defaults to the first unlabelled post when resuming)
    #[arg(short, long)]
    start: Option<usize>,
  },
  /// Show all posts with their labels; disagreements are highlighted
  Grid {
    /// Show only posts where your label differs from the machine label
    #[arg(short, long)]
    flagged: bool,
  },
  /// Set the label of one post and save immediately
  Edit {
    /// Post number as shown in the grid
    number: usize,
    /// Your label (use "" to clear it)
    label: String,
  },
  /// Show progress and accuracy
  Status,
  /// Write the current labels to the output file
  Save,
  /// Show the topic codebook
  Codebook,
  /// Write a default ingrid.json to the current directory
  Init {
    /// Overwrite an existing ingrid.json
    #[arg(short, long)]
    force: bool,
  },
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("ingrid=debug,warn")
    } else {
      EnvFilter::new("warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      bentley::error(&format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  if let Commands::Init { force } = cli.command {
    return commands::init::handle(force);
  }

  let overrides =
    Overrides { config: cli.config, input: cli.input, output: cli.output, no_resume: cli.no_resume };
  let config = overrides.resolve()?;

  match cli.command {
    Commands::Review { start } => commands::review::handle(&config, start),
    Commands::Grid { flagged } => commands::grid::handle(&config, flagged),
    Commands::Edit { number, label } => commands::edit::handle(&config, number, label),
    Commands::Status => commands::status::handle(&config),
    Commands::Save => commands::save::handle(&config),
    Commands::Codebook => commands::codebook::handle(&config),
    Commands::Init { .. } => Ok(()),
  }
}
