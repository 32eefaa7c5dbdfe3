use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use parasim::config::load_stopwords_file;
use parasim::{
    CsvSink, ParasimConfig, Pipeline, StopWordSource, VocabularySource, load_directory,
    render_table,
};

/// Find paraphrases of original documents with MinHash and LSH.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory with `*-original.txt` and `*-paraphrase.txt` files
    #[arg(long, env = "PARASIM_INPUT")]
    input: Option<PathBuf>,

    /// CSV file results are appended to
    #[arg(long, env = "PARASIM_OUTPUT")]
    output: Option<PathBuf>,

    /// Write the full run report (results and counts) as JSON
    #[arg(long, env = "PARASIM_REPORT")]
    report: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, env = "PARASIM_CONFIG")]
    config: Option<PathBuf>,

    /// Newline-delimited stop-word file, replaces the configured list
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Signature length
    #[arg(long)]
    num_hashes: Option<usize>,

    /// LSH bands; must divide the signature length
    #[arg(long)]
    num_bands: Option<usize>,

    /// Largest Jaccard distance kept, in [0, 1]
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of ranked results
    #[arg(long)]
    top_k: Option<usize>,

    /// Hash-family seed
    #[arg(long)]
    seed: Option<u64>,

    /// Build the vocabulary from all tokens, stop words included
    #[arg(long)]
    unfiltered_vocabulary: bool,

    /// Run every stage on one thread
    #[arg(long)]
    sequential: bool,

    /// Skip the console table
    #[arg(long)]
    no_table: bool,

    /// Log filter, e.g. `info` or `parasim=debug,index=trace`
    #[arg(long, env = "PARASIM_LOG", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Layer CLI flags over the file (or built-in defaults).
    fn apply(&self, mut cfg: ParasimConfig) -> ParasimConfig {
        if let Some(dir) = &self.input {
            cfg.input.dir = Some(dir.clone());
        }
        if let Some(csv) = &self.output {
            cfg.output.csv = Some(csv.clone());
        }
        if let Some(n) = self.num_hashes {
            cfg.perceptual.num_hashes = n;
        }
        if let Some(seed) = self.seed {
            cfg.perceptual.seed = seed;
        }
        if self.unfiltered_vocabulary {
            cfg.perceptual.vocabulary_source = VocabularySource::Unfiltered;
        }
        if let Some(b) = self.num_bands {
            cfg.index.num_bands = b;
        }
        if let Some(t) = self.threshold {
            cfg.matcher.distance_threshold = t;
        }
        if let Some(k) = self.top_k {
            cfg.matcher.top_k = k;
        }
        if self.sequential {
            cfg.use_parallel = false;
        }
        if self.no_table {
            cfg.output.table = false;
        }
        cfg
    }
}

fn init_tracing(filter: &str, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    let file_cfg = match &cli.config {
        Some(path) => ParasimConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ParasimConfig::default(),
    };
    let cfg = cli.apply(file_cfg);

    let mut pipeline_cfg = cfg.pipeline_config()?;
    if let Some(path) = &cli.stopwords {
        let words = load_stopwords_file(path)?;
        info!(path = %path.display(), words = words.len(), "stopwords_loaded");
        pipeline_cfg.canonical.stopwords = StopWordSource::Custom(words);
    }
    let pipeline = Pipeline::new(pipeline_cfg).context("invalid configuration")?;

    let Some(dir) = cfg.input.dir.as_ref() else {
        bail!("no input directory: pass --input or set input.dir in the config file");
    };
    let docs = load_directory(dir, &cfg.input.ingest_config())
        .with_context(|| format!("reading {}", dir.display()))?;

    let report = pipeline.run(docs)?;

    if cfg.output.table {
        println!("{}", render_table(&report.results));
    }
    if let Some(csv) = &cfg.output.csv {
        CsvSink::new(csv).append(&report.results)?;
    }
    if let Some(path) = &cli.report {
        let file = File::create(path)
            .with_context(|| format!("creating report {}", path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &report)
            .with_context(|| format!("writing report {}", path.display()))?;
        out.flush()
            .with_context(|| format!("writing report {}", path.display()))?;
    }

    info!(
        documents = report.documents_in,
        dropped = report.dropped_empty.len(),
        vocabulary = report.vocabulary_size,
        candidates = report.candidate_pairs,
        kept = report.scored_pairs,
        results = report.results.len(),
        "run_summary"
    );
    Ok(())
}
