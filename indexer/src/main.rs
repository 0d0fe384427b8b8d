use anyhow::Result;
use boolidx_indexer::{build_index_dir, index_stats, BuildOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "boolidx-indexer")]
#[command(about = "Build and inspect a boolean-retrieval inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from every file under a corpus directory
    Build {
        /// Corpus root (directory or single file)
        #[arg(long)]
        input: PathBuf,
        /// Output index directory
        #[arg(long, default_value = "./index")]
        output: PathBuf,
        /// Fail unless the index has exactly this many terms
        #[arg(long)]
        expected_terms: Option<usize>,
    },
    /// Print document, term and posting counts of a built index
    Stats {
        /// Index directory
        #[arg(long, default_value = "./index")]
        index: PathBuf,
        /// Number of most frequent terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, expected_terms } => {
            let report = build_index_dir(&BuildOptions { input, output, expected_terms })?;
            println!("Indexed {} documents, {} terms.", report.num_docs, report.num_terms);
        }
        Commands::Stats { index, top, json } => {
            let stats = index_stats(&index, top)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("documents: {}", stats.num_docs);
                println!("terms:     {}", stats.num_terms);
                println!("postings:  {}", stats.num_postings);
                for t in &stats.top_terms {
                    println!("{:>8} {:>10} {}", t.doc_freq, t.total_freq, t.term);
                }
            }
        }
    }
    Ok(())
}
