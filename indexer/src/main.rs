use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search::{Document, Engine};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query the local search cache", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a search cache from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output cache file
        #[arg(long)]
        cache: String,
    },
    /// Query an existing search cache
    Search {
        /// Cache file produced by `build`
        #[arg(long)]
        cache: String,
        /// Free-text query
        #[arg(long)]
        query: String,
        /// Number of hits to return
        #[arg(long, default_value_t = 5)]
        top_k: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, cache } => build(&input, &cache),
        Commands::Search { cache, query, top_k } => run_query(&cache, &query, top_k),
    }
}

fn build(input: &str, cache: &str) -> Result<()> {
    let engine = Engine::new();
    for file in collect_inputs(Path::new(input)) {
        let docs = read_docs(&file)?;
        tracing::info!(file = %file.display(), num_docs = docs.len(), "ingesting");
        engine.upsert_many(docs);
    }
    engine.save(cache)?;
    tracing::info!(cache, num_docs = engine.doc_count(), "cache build complete");
    Ok(())
}

fn run_query(cache: &str, query: &str, top_k: usize) -> Result<()> {
    let engine = Engine::new();
    engine.load(cache)?;
    let hits = engine.search(query, top_k);
    println!("{}", serde_json::to_string_pretty(&hits)?);
    Ok(())
}

fn collect_inputs(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    }
    files
}

fn read_docs(file: &Path) -> Result<Vec<Document>> {
    let f = File::open(file).with_context(|| format!("open {}", file.display()))?;
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let reader = BufReader::new(f);
        let mut docs = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: Document = serde_json::from_str(&line)
                .with_context(|| format!("parse document in {}", file.display()))?;
            docs.push(doc);
        }
        Ok(docs)
    } else {
        let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse {}", file.display()))?;
        let docs = match json {
            serde_json::Value::Array(_) => serde_json::from_value(json)?,
            serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
            _ => Vec::new(),
        };
        Ok(docs)
    }
}
