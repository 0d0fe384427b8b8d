use anyhow::{bail, Context, Result};
use boolidx_searcher::{ResultOrder, Searcher};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "boolidx-searcher")]
#[command(about = "Answer AND/OR boolean queries against a built index", long_about = None)]
struct Args {
    /// Index directory path (falls back to BOOLIDX_INDEX, then ./index)
    #[arg(long)]
    index: Option<PathBuf>,
    /// How to list matching documents
    #[arg(long, value_enum, default_value_t = ResultOrder::Path)]
    order: ResultOrder,
    /// File with one query per line
    #[arg(long)]
    queries: Option<PathBuf>,
    /// Look up query terms exactly as typed instead of normalizing them
    #[arg(long, default_value_t = false)]
    raw_terms: bool,
    /// Queries such as "ducks AND water"; read from stdin when none are given
    query: Vec<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    let index_dir = args
        .index
        .or_else(|| std::env::var("BOOLIDX_INDEX").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./index"));
    let searcher = Searcher::open(&index_dir, !args.raw_terms)?;

    let mut queries = args.query;
    if let Some(file) = &args.queries {
        let text = fs::read_to_string(file).with_context(|| format!("reading queries from {}", file.display()))?;
        queries.extend(text.lines().map(str::to_string));
    }
    if queries.is_empty() {
        for line in io::stdin().lock().lines() {
            queries.push(line?);
        }
    }

    let stdout = io::stdout();
    let failed = searcher.run_queries(&queries, args.order, &mut stdout.lock(), &mut io::stderr())?;
    if failed > 0 {
        bail!("{failed} of {} queries failed", queries.len());
    }
    Ok(())
}
