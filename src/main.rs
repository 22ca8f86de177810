mod dataset;
mod export;
mod input;
mod parser;
mod stats;
mod vocab;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use dataset::Dataset;
use input::{PlainTextExtractor, TextExtractor};
use stats::RunSummary;
use vocab::HeadingVocabulary;

#[derive(Parser)]
#[command(name = "fir_processor", about = "Tabulate FIR text extractions into a dataset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a folder of .txt extractions into CSV plus a JSON backup
    Run {
        /// Folder of per-document .txt extractions (env: FIR_INPUT_DIR)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// CSV output path (env: FIR_OUT_CSV)
        #[arg(long)]
        out_csv: Option<PathBuf>,
        /// JSON backup path (env: FIR_OUT_BACKUP)
        #[arg(long)]
        out_backup: Option<PathBuf>,
        /// Vocabulary JSON file; defaults to the built-in FIR field set
        #[arg(long)]
        vocab: Option<PathBuf>,
        /// Max documents to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print the effective vocabulary and the column order it defines
    Vocab {
        /// Vocabulary JSON file; defaults to the built-in FIR field set
        #[arg(long)]
        vocab: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Config::builder()
        .add_source(config::Environment::with_prefix("FIR"))
        .build()
        .unwrap_or_default();

    match cli.command {
        Commands::Run {
            input,
            out_csv,
            out_backup,
            vocab,
            limit,
        } => {
            let input_dir =
                input.unwrap_or_else(|| setting_path(&settings, "input_dir", "input_txt"));
            let csv_path =
                out_csv.unwrap_or_else(|| setting_path(&settings, "out_csv", "output/fir_dataset.csv"));
            let backup_path = out_backup
                .unwrap_or_else(|| setting_path(&settings, "out_backup", "output/fir_backup.json"));

            // Vocabulary misconfiguration aborts here, before any document.
            let vocab = load_vocab(vocab.as_deref())?;
            info!(headings = vocab.len(), msg = "vocabulary loaded");

            let mut paths = list_text_files(&input_dir)?;
            if let Some(n) = limit {
                paths.truncate(n);
            }
            if paths.is_empty() {
                println!("No .txt files found in {:?}. Nothing to do.", input_dir);
                return Ok(());
            }
            println!("Processing {} documents from {:?}...", paths.len(), input_dir);

            let (dataset, summary) = process_batch(&paths, &vocab);

            export::write_csv(&dataset, &csv_path)
                .with_context(|| format!("writing {:?}", csv_path))?;
            export::write_backup(&dataset, &backup_path)
                .with_context(|| format!("writing {:?}", backup_path))?;

            summary.print(dataset.heading_column_count());
            println!("Dataset: {:?}", csv_path);
            println!("Backup:  {:?}", backup_path);
        }
        Commands::Vocab { vocab } => {
            let vocab = load_vocab(vocab.as_deref())?;
            println!("{} headings (column order):", vocab.len());
            for (pos, entry) in vocab.entries().iter().enumerate() {
                if entry.aliases.is_empty() {
                    println!("{:>3}  {}", pos + 1, entry.canonical);
                } else {
                    println!("{:>3}  {}  (also: {})", pos + 1, entry.canonical, entry.aliases.join(", "));
                }
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

/// Extract and group documents in parallel chunks, then funnel the
/// records through a single-threaded reduce that owns the schema union.
fn process_batch(paths: &[PathBuf], vocab: &HeadingVocabulary) -> (Dataset, RunSummary) {
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut dataset = Dataset::new(vocab);
    let mut summary = RunSummary::default();

    for chunk in paths.chunks(256) {
        let records: Vec<_> = chunk
            .par_iter()
            .map(|path| {
                let doc = PlainTextExtractor.extract(path);
                parser::process_document(&doc, vocab)
            })
            .collect();

        for record in records {
            summary.record(&record);
            dataset.push(record);
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    (dataset, summary)
}

fn load_vocab(path: Option<&Path>) -> Result<HeadingVocabulary> {
    let vocab = match path {
        Some(p) => HeadingVocabulary::from_json_file(p)
            .with_context(|| format!("loading vocabulary from {:?}", p))?,
        None => HeadingVocabulary::default_fir()?,
    };
    Ok(vocab)
}

fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = std::fs::read_dir(dir).with_context(|| format!("reading {:?}", dir))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("txt")) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn setting_path(settings: &Config, key: &str, default: &str) -> PathBuf {
    settings
        .get_string(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
