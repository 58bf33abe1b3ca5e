//! CLI frontend for the seer oracles.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "seer",
    about = "Seer: stateful stochastic oracles and their driver",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log oracle internals to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping a combined oracle in every parity, then request messages from it
    Run {
        /// Requests per flip (default: random in 10..=20)
        #[arg(short, long)]
        q: Option<u32>,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Effective calls before the oracle is exhausted
        #[arg(short, long, default_value = "20")]
        countdown: u32,

        /// Number of requests after the pings
        #[arg(short, long, default_value = "30")]
        requests: u32,

        /// Log file to write
        #[arg(short, long, default_value = "log.txt")]
        output: PathBuf,

        /// Write the log as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Send requests to a single seer variant
    Request {
        /// Variant name (seer, tmSeer, volatileSeer, tmVolatileSeer, combined)
        variant: String,

        /// Requests per flip
        #[arg(short, long, default_value = "10")]
        q: u32,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of requests to send
        #[arg(short = 'n', long, default_value = "10")]
        count: u32,

        /// Message handed to the oracle with each request
        #[arg(short, long, default_value = "Lorem ipsum dolor.")]
        message: String,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "seer_core=debug,seer=debug",
        _ => "seer_core=trace,seer=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            q,
            seed,
            countdown,
            requests,
            output,
            json,
        } => commands::run::run(&commands::run::RunArgs {
            q,
            seed,
            countdown,
            requests,
            output,
            json,
        }),
        Commands::Request {
            variant,
            q,
            seed,
            count,
            message,
        } => commands::request::run(&variant, q, seed, count, &message),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
