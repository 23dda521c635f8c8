//! Command-line interface for callshift-rs
//!
//! Analyzes the language shift between two quarters of a company's earnings
//! calls. Progress events stream to stderr as JSON lines; the final payload
//! goes to stdout or `--output`.
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! callshift --prev BHARTI_Q2_2026 --curr BHARTI_Q3_2026 --transcripts ./transcripts
//! ```

use anyhow::Context;
use callshift_llm::{GeminiConfig, GeminiProvider};
use callshift_pipeline::{
    AnalysisPipeline, ChannelSink, FileTranscriptSource, PipelineConfig,
};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "callshift")]
#[command(about = "Earnings-call language-shift analysis", long_about = None)]
struct Args {
    /// Previous quarter transcript key, e.g. BHARTI_Q2_2026
    #[arg(long)]
    prev: String,

    /// Current quarter transcript key, e.g. BHARTI_Q3_2026
    #[arg(long)]
    curr: String,

    /// Directory of {TICKER}_{QUARTER}.txt transcript files
    #[arg(long, default_value = "transcripts")]
    transcripts: PathBuf,

    /// Write the payload to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override the model identifier
    #[arg(long)]
    model: Option<String>,
}

fn gemini_config() -> anyhow::Result<GeminiConfig> {
    let api_key = env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;

    let mut config = GeminiConfig::new(api_key);
    match env::var("GEMINI_API_BASE") {
        Ok(base) => config = config.with_api_base(base),
        Err(_) => eprintln!("Warning: GEMINI_API_BASE not set, using default"),
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,callshift_pipeline=info".to_string()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let provider =
        GeminiProvider::with_config(gemini_config()?).context("Gemini provider setup failed")?;

    let mut config = PipelineConfig::builder();
    if let Some(model) = &args.model {
        config = config.model(model);
    }

    let pipeline = AnalysisPipeline::builder()
        .provider(Arc::new(provider))
        .transcripts(Arc::new(FileTranscriptSource::new(&args.transcripts)))
        .config(config.build()?)
        .build()?;

    // Progress events become JSON lines on stderr
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let sink = ChannelSink::new(tx);
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Ok(line) = serde_json::to_string(&event) {
                eprintln!("{line}");
            }
        }
    });

    info!(prev = %args.prev, curr = %args.curr, "starting analysis");
    let result = pipeline.run(&args.prev, &args.curr, &sink).await;
    drop(sink);
    printer.await.context("progress printer task failed")?;

    let payload = result?;
    let rendered = serde_json::to_string_pretty(&payload)?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &rendered)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "payload written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
