//! mplsg CLI - Command-line interface for building MPLS query graphs
//!
//! Reads a network model and a reachability query, lowers both into one typed
//! graph and prints it for inspection or hands it on as JSON.

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use config::MplsgConfig;
use output::OutputFormat;

/// Lower MPLS networks and reachability queries into typed graphs.
#[derive(Parser)]
#[command(name = "mplsg")]
#[command(author, version)]
#[command(about = "Lower MPLS networks and reachability queries into typed graphs")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  mplsg build net.json \"<> R1 <>\" 0           Print graph edges
  mplsg build net.json \"<ip> R1 .* <ip>\" 2 --format json -o graph.json
  mplsg batch jobs.json -j 8                   Build many graphs in parallel")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Config file (default: .mplsgrc.toml in the current directory)
    #[arg(long, global = true, env = "MPLSG_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph for one network, query and failure budget
    #[command(visible_alias = "b")]
    Build {
        /// Network model (JSON)
        network: PathBuf,

        /// Query, e.g. "<ip> R1 .* R4 <ip>"
        query: String,

        /// Maximum number of failed links
        k: u32,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tag router-path wildcards by their own quantifier
        #[arg(long)]
        quantifier_path_types: bool,

        /// Fail on destinations without a rule instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Build the graphs of every job in a manifest, in parallel
    Batch {
        /// Job manifest (JSON)
        manifest: PathBuf,

        /// Number of worker threads (default: one per CPU)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => MplsgConfig::load_file(path),
        None => MplsgConfig::load(std::path::Path::new(".")),
    };

    // CLI flag > config default > edges
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    });

    let use_color = config
        .use_color()
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(use_color);

    match cli.command {
        Commands::Build {
            network,
            query,
            k,
            output,
            quantifier_path_types,
            strict,
        } => {
            let mut build = config.build.clone();
            build.quantifier_path_types |= quantifier_path_types;
            build.strict_destinations |= strict;
            commands::build::run(&network, &query, k, output.as_deref(), format, &build)
        }
        Commands::Batch { manifest, threads } => {
            commands::batch::run(&manifest, threads, format, &config.build)
        }
    }
}
