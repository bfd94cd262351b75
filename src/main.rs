//! Horos CLI - Score-to-Segmentation Engine
//!
//! Command-line interface for segmenting score files and evaluating
//! segmentations.

use clap::{Args, Parser, Subcommand};
use horos::{
    score_columns, BatchSummary, CalibrationMode, ColumnLayout, Config, Document,
    DocumentOutcome, HorosError, LabelParser, LabelScheme, Pipeline, Result, WindowSize,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "horos")]
#[command(author = "Horos Contributors")]
#[command(version)]
#[command(about = "Score-to-segmentation engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment documents from boundary scores
    Segment {
        /// Input JSON file (one document or an array of documents)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Segment documents and score them against their references
    Evaluate {
        /// Input JSON file (documents with "reference" boundaries)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        /// Pk/WindowDiff window size in units, or "auto"
        #[arg(short = 'k', long)]
        window_size: Option<WindowSize>,

        /// Distance within which boundaries count as matching
        #[arg(long)]
        tolerance: Option<usize>,
    },

    /// Score BIO/BILOU span labels (blank-line separated blocks of columns)
    Spans {
        /// The file to score
        file: PathBuf,

        /// Use BIO mode instead of BILOU
        #[arg(long)]
        bio: bool,

        /// Index of the column holding gold labels (negative counts from the end)
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        gold_column: isize,

        /// Index of the column holding system labels (negative counts from the end)
        #[arg(long, default_value = "-2", allow_hyphen_values = true)]
        sys_column: isize,

        /// Regular expression with named groups "action" and (optionally) "type"
        #[arg(long, default_value = horos::labels::DEFAULT_LABEL_PATTERN)]
        label_regex: String,
    },
}

/// Options shared by commands that run the engine.
#[derive(Args)]
struct EngineArgs {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calibration: identity, zscore, rank, smooth[:sigma]
    #[arg(long)]
    calibration: Option<CalibrationMode>,

    /// Keep every boundary scoring at least this value
    #[arg(short, long, conflicts_with = "segments")]
    threshold: Option<f64>,

    /// Produce exactly this many segments
    #[arg(short, long)]
    segments: Option<usize>,

    /// Minimum units per segment
    #[arg(short, long)]
    min_length: Option<usize>,
}

impl EngineArgs {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(mode) = self.calibration {
            config.calibration = mode;
        }
        if let Some(threshold) = self.threshold {
            config.selection.threshold = Some(threshold);
            config.selection.target_segment_count = None;
        }
        if let Some(segments) = self.segments {
            config.selection.target_segment_count = Some(segments);
            config.selection.threshold = None;
        }
        if let Some(min_length) = self.min_length {
            config.selection.min_segment_length = min_length;
        }

        Ok(config)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentInput {
    Many(Vec<Document>),
    One(Document),
}

#[derive(Serialize)]
struct EvaluationOutput<'a> {
    documents: &'a [DocumentOutcome],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<BatchSummary>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Segment { input, engine } => segment_documents(input, engine),

        Commands::Evaluate {
            input,
            engine,
            window_size,
            tolerance,
        } => evaluate_documents(input, engine, window_size, tolerance, cli.verbose),

        Commands::Spans {
            file,
            bio,
            gold_column,
            sys_column,
            label_regex,
        } => score_spans(file, bio, gold_column, sys_column, label_regex),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let text = fs::read_to_string(path)?;
    let documents = match serde_json::from_str::<DocumentInput>(&text)? {
        DocumentInput::Many(docs) => docs,
        DocumentInput::One(doc) => vec![doc],
    };
    info!("Loaded {} documents from {}", documents.len(), path.display());
    Ok(documents)
}

/// Logs which document a failure came from.
fn in_document(index: usize, document: &Document, err: HorosError) -> HorosError {
    let name = document
        .id
        .clone()
        .unwrap_or_else(|| format!("#{}", index));
    error!("Document {} failed", name);
    err
}

fn run_all(
    pipeline: &Pipeline,
    documents: &[Document],
    progress: &ProgressBar,
) -> Result<Vec<DocumentOutcome>> {
    let outcomes: Vec<Result<DocumentOutcome>> = documents
        .par_iter()
        .enumerate()
        .map(|(i, doc)| {
            let outcome = pipeline.run(doc).map_err(|e| in_document(i, doc, e));
            progress.inc(1);
            outcome
        })
        .collect();
    progress.finish_and_clear();

    outcomes.into_iter().collect()
}

fn segment_documents(input: PathBuf, engine: EngineArgs) -> Result<()> {
    let pipeline = Pipeline::new(engine.load_config()?)?;
    let documents = load_documents(&input)?;

    let outcomes = run_all(&pipeline, &documents, &ProgressBar::hidden())?;
    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }

    Ok(())
}

fn evaluate_documents(
    input: PathBuf,
    engine: EngineArgs,
    window_size: Option<WindowSize>,
    tolerance: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let start_time = Instant::now();

    let mut config = engine.load_config()?;
    if let Some(window_size) = window_size {
        config.evaluation.window_size = window_size;
    }
    if let Some(tolerance) = tolerance {
        config.evaluation.boundary_tolerance = tolerance;
    }
    let pipeline = Pipeline::new(config)?;
    let documents = load_documents(&input)?;

    if let Some(missing) = documents.iter().position(|d| d.reference.is_none()) {
        return Err(HorosError::Config(format!(
            "document #{} has no reference boundaries",
            missing
        )));
    }

    let progress = if verbose {
        let bar = ProgressBar::new(documents.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} documents")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let outcomes = run_all(&pipeline, &documents, &progress)?;
    let summary = BatchSummary::from_outcomes(&outcomes);

    let output = EvaluationOutput {
        documents: &outcomes,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(
        "Evaluated {} documents in {:.2?}",
        outcomes.len(),
        start_time.elapsed()
    );

    Ok(())
}

fn score_spans(
    file: PathBuf,
    bio: bool,
    gold_column: isize,
    sys_column: isize,
    label_regex: String,
) -> Result<()> {
    let parser = LabelParser::new(&label_regex)?;
    let scheme = if bio { LabelScheme::Bio } else { LabelScheme::Bilou };
    let layout = ColumnLayout {
        gold: gold_column,
        system: sys_column,
    };

    let text = fs::read_to_string(&file)?;
    let total = score_columns(&text, &parser, layout, scheme)?;

    info!(
        "{} true positives, {} gold spans, {} system spans",
        total.true_positives, total.gold, total.system
    );
    println!(
        "P: {}\tR: {}\t F: {}",
        total.precision(),
        total.recall(),
        total.f1()
    );

    Ok(())
}
