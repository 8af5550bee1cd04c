//! qaoakit Command-Line Interface
//!
//! Builds, converts and inspects QAOA cost Hamiltonians from the shell.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::OutputFormat;
use commands::{experiment, graph, prepare, random, ring};

/// qaoakit - cost Hamiltonians, graphs and datasets for QAOA
#[derive(Parser)]
#[command(name = "qaoakit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ring-of-disagrees Hamiltonian on n vertices
    Ring {
        /// Number of vertices
        #[arg(short = 'n', long = "size")]
        n: usize,
    },

    /// Random diagonal Hamiltonian
    Random {
        /// Number of qubits
        #[arg(short = 'n', long = "nqubits")]
        n: usize,

        /// RNG seed (random if omitted)
        #[arg(short, long, env = "QAOAKIT_SEED")]
        seed: Option<u64>,
    },

    /// Clustered-data experiment: sample clusters, compute distances, build the Hamiltonian
    Experiment {
        /// Experiment file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Override the seed from the experiment file
        #[arg(short, long, env = "QAOAKIT_SEED")]
        seed: Option<u64>,
    },

    /// Convert a Hamiltonian file to its interaction graph
    Graph {
        /// Hamiltonian file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Also write the graph in Graphviz DOT format
        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Program preparing a computational basis state
    Prepare {
        /// Bit string, qubit 0 first (e.g. 101)
        #[arg(long)]
        state: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;
    let output = cli.output.as_deref();

    // Execute command
    let result = match cli.command {
        Commands::Ring { n } => ring::execute(n, format, output),
        Commands::Random { n, seed } => random::execute(n, seed, format, output),
        Commands::Experiment { config, seed } => experiment::execute(&config, seed, format, output),
        Commands::Graph { input, dot } => graph::execute(&input, dot.as_deref(), format, output),
        Commands::Prepare { state } => prepare::execute(&state, format, output),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
