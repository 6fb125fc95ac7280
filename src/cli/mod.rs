// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, hands a PipelineConfig to Layer 2 and prints what
// comes back. Nothing here computes anything.
//
// Three commands are supported:
//   1. `run`       — the full question pipeline
//   2. `segment`   — passages only, no model calls
//   3. `summarize` — summary only
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

pub mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, RunArgs, SegmentArgs, SummarizeArgs};

use crate::application::pipeline_use_case::PipelineUseCase;
use report::Report;

#[derive(Parser, Debug)]
#[command(
    name = "doc-quiz",
    version,
    about = "Split a PDF/DOCX document into passages, generate unique quiz questions and answer them."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching handler.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)       => run_pipeline(args),
            Commands::Segment(args)   => run_segment(args),
            Commands::Summarize(args) => run_summarize(args),
        }
    }
}

/// `run`: stream the report while the pipeline works.
fn run_pipeline(args: RunArgs) -> Result<()> {
    let use_case = PipelineUseCase::new(args.into())?;
    tracing::debug!("Config: {}", serde_json::to_string(use_case.config()).unwrap_or_default());

    let mut report = Report::new();
    let outcome = use_case.execute(|event| {
        if let Some(text) = report.render(&event) {
            print!("{text}");
        }
    })?;

    print!("{}", report.finish(&outcome));
    Ok(())
}

/// `segment`: print passages with their word counts.
fn run_segment(args: SegmentArgs) -> Result<()> {
    let use_case = PipelineUseCase::new(args.into())?;
    let document = use_case.load_document()?;
    let passages = use_case.segment(&document)?;

    for p in &passages {
        println!("Passage {} ({} words):\n{}\n", p.number(), p.word_count, p.text);
    }
    println!("{} passages", passages.len());
    Ok(())
}

/// `summarize`: print the summary of the document head.
fn run_summarize(args: SummarizeArgs) -> Result<()> {
    let use_case = PipelineUseCase::new(args.into())?;
    let document = use_case.load_document()?;
    let summary  = use_case.summarize(&document)?;

    println!("Summary: {summary}");
    Ok(())
}
