//! cinegrade - export color grades as Camera Raw presets and .cube LUTs

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cinegrade_core::library::Category;

mod commands;
mod config;

use config::ExportConfig;

#[derive(Parser)]
#[command(name = "cinegrade")]
#[command(author, version, about = "Export color grades as XMP presets and 3D LUTs")]
#[command(long_about = "
Turns a grade (analyzer JSON or a built-in library look) into a Camera Raw
.xmp preset and a 33x33x33 .cube LUT.

Examples:
  cinegrade export analysis.json                 # Write <name>.xmp and <name>.cube
  cinegrade export analysis.json -o looks --no-xmp
  cinegrade export analysis.json --title \"Night Shift\"
  cinegrade library list --category studio
  cinegrade library export christopher-nolan -o looks
  cinegrade library export all --exposure-only
  cinegrade summary analysis.json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an analyzer result as .xmp and .cube
    #[command(visible_alias = "e")]
    Export(ExportArgs),

    /// Browse or export the built-in grade library
    #[command(visible_alias = "lib")]
    Library(LibraryArgs),

    /// Print a short plain-text summary of an analyzer result
    Summary(SummaryArgs),
}

/// Output switches shared by every exporting command.
#[derive(Args, Debug, Clone, Default)]
struct OutputArgs {
    /// Output directory (default: $CINEGRADE_OUT_DIR or .)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the .xmp preset
    #[arg(long)]
    no_xmp: bool,

    /// Skip the .cube LUT
    #[arg(long)]
    no_cube: bool,

    /// Bake exposure only into the LUT
    #[arg(long)]
    exposure_only: bool,

    /// Generator name for the LUT header (default: $CINEGRADE_GENERATOR)
    #[arg(long)]
    generator: Option<String>,
}

impl OutputArgs {
    /// Environment defaults overridden by flags.
    fn to_config(&self) -> ExportConfig {
        let mut config = ExportConfig::default();
        if let Some(dir) = &self.output {
            config.out_dir = dir.clone();
        }
        if let Some(generator) = &self.generator {
            config.generator = generator.clone();
        }
        config.write_xmp = !self.no_xmp;
        config.write_cube = !self.no_cube;
        if self.exposure_only {
            config.stages = cinegrade_core::Stages::ExposureOnly;
        }
        config
    }
}

#[derive(Args)]
struct ExportArgs {
    /// Analyzer JSON ({presetName, description, parameters})
    input: PathBuf,

    /// Override the preset title
    #[arg(short, long)]
    title: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct LibraryArgs {
    #[command(subcommand)]
    command: LibraryCommand,
}

#[derive(Subcommand)]
enum LibraryCommand {
    /// List library grades
    #[command(visible_alias = "ls")]
    List {
        /// Only show one category: director, studio
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Export one library grade by id, or `all`
    Export {
        /// Grade id (see `library list`) or `all`
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct SummaryArgs {
    /// Analyzer JSON
    input: PathBuf,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Export(args) => commands::export::run(args, cli.verbose),
        Commands::Library(args) => match args.command {
            LibraryCommand::List { category } => commands::library::run_list(category, cli.verbose),
            LibraryCommand::Export { id, output } => {
                commands::library::run_export(&id, &output.to_config(), cli.verbose)
            }
        },
        Commands::Summary(args) => commands::summary::run(args),
    }
}
