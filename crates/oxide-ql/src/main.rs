//! oxide-ql CLI
//!
//! Command-line tool for inspecting bind variables of SQL batches.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oxide_ql_core::lexer::DEFAULT_CHUNK_SIZE;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

use oxide_ql::prelude::*;

/// Inspect the bind variables and tokens of SQL statement batches.
#[derive(Parser)]
#[command(name = "oxide-ql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File holding the batch (stdin if not specified or `-`).
    #[arg(short, long, env = "OXIDE_QL_FILE")]
    file: Option<PathBuf>,

    /// Increase verbosity; three or more enable scan and parse traces.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Memory limit in bytes for statement text held by parse trees.
    #[arg(long, env = "OXIDE_QL_MEM_LIMIT")]
    mem_limit: Option<usize>,

    /// Treat the batch as internally issued.
    #[arg(long)]
    internal: bool,

    /// Treat the parse as a reparse attempt.
    #[arg(long)]
    reparsed: bool,

    /// Bytes the scanner requests per read (1 to 1048576).
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    chunk_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List each statement's bind variables with their positions.
    Binds {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dump the token stream.
    Tokens,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = SessionConfig {
        mem_limit: cli.mem_limit,
        internal: cli.internal,
        reparsed: cli.reparsed,
        chunk_size: cli.chunk_size,
    };
    debug!(?config, "session");

    let input = read_input(cli.file.as_deref())?;
    let tracker = config.mem_tracker();
    let mut ctx = config.context(input, &tracker);

    match cli.command {
        Commands::Binds { json } => {
            let report = BindsReport::collect(&mut ctx, config.chunk_size)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }

        Commands::Tokens => {
            for token in collect_tokens(&mut ctx, config.chunk_size)? {
                println!("{:>5}..{:<5} {}", token.start, token.end, token.kind);
            }
        }
    }

    Ok(())
}
