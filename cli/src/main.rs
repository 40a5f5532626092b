use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use wikiknn_cli::{load_documents, run_interactive, run_neighbors, run_vocabulary};
use wikiknn_core::{build_matrix, neighbor_count, DEFAULT_VOCAB_SIZE};

#[derive(Parser)]
#[command(name = "wikiknn")]
#[command(about = "Find similar articles by bag-of-words distance", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the articles, pick one, print its nearest neighbors
    Interactive {
        /// Article file or directory of .xml files
        #[arg(long)]
        input: PathBuf,
        /// Number of most frequent words used as features
        #[arg(long, default_value_t = DEFAULT_VOCAB_SIZE)]
        vocab_size: usize,
        /// Number of neighbors to print
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        k: i64,
        /// Leave out files missing a title or text marker instead of failing
        #[arg(long, default_value_t = false)]
        skip_malformed: bool,
    },
    /// Print the nearest neighbors of one article
    Neighbors {
        #[arg(long)]
        input: PathBuf,
        /// Title of the query article
        #[arg(long)]
        title: String,
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        k: i64,
        #[arg(long, default_value_t = DEFAULT_VOCAB_SIZE)]
        vocab_size: usize,
        /// Emit JSON instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
        #[arg(long, default_value_t = false)]
        skip_malformed: bool,
    },
    /// Print the most frequent words of the corpus with their counts
    Vocabulary {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 20)]
        top: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
        #[arg(long, default_value_t = false)]
        skip_malformed: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match cli.command {
        Commands::Interactive { input, vocab_size, k, skip_malformed } => {
            let k = neighbor_count(k)?;
            let matrix = build_matrix(&load_documents(&input, skip_malformed)?, vocab_size)?;
            let stdin = io::stdin();
            run_interactive(&matrix, k, &mut stdin.lock(), &mut io::stdout().lock())?;
        }
        Commands::Neighbors { input, title, k, vocab_size, json, skip_malformed } => {
            let k = neighbor_count(k)?;
            let matrix = build_matrix(&load_documents(&input, skip_malformed)?, vocab_size)?;
            run_neighbors(&matrix, &title, k, json, &mut io::stdout().lock())?;
        }
        Commands::Vocabulary { input, top, json, skip_malformed } => {
            run_vocabulary(&load_documents(&input, skip_malformed)?, top, json, &mut io::stdout().lock())?;
        }
    }
    Ok(())
}
