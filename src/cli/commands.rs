// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands and all their flags:
//
//   run        — full pipeline: extract, summarise, segment,
//                generate unique questions, answer them
//   segment    — extract and print the passages only
//   summarize  — extract and print the summary only
//
// Flags are converted into the application-layer
// PipelineConfig here, so Layer 2 never sees clap types.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::pipeline_use_case::PipelineConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate (and answer) unique quiz questions for a document
    Run(RunArgs),

    /// Print the passages a document is split into
    Segment(SegmentArgs),

    /// Print a short summary of the document's opening text
    Summarize(SummarizeArgs),
}

/// The document and how it is cut into passages.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Document to process (.pdf, .docx or UTF-8 text)
    #[arg(long, short)]
    pub input: PathBuf,

    /// Passages stay below this many words
    /// (a single longer sentence becomes its own passage)
    #[arg(long, default_value_t = 200)]
    pub max_words: usize,
}

/// Where the hosted models live.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the inference API; the model id is appended
    #[arg(long, env = "HF_API_BASE", default_value = "https://api-inference.huggingface.co/models")]
    pub api_base: String,

    /// Bearer token for the inference API
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,
}

/// Summary model settings.
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(long, default_value = "t5-small")]
    pub summary_model: String,

    #[arg(long, default_value_t = 150)]
    pub summary_max_length: usize,

    #[arg(long, default_value_t = 30)]
    pub summary_min_length: usize,

    /// Only this many leading characters are summarised
    #[arg(long, default_value_t = 1000)]
    pub summary_input_chars: usize,
}

/// All arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub summary: SummaryArgs,

    /// Questions to aim for per passage; extra ones are dropped
    #[arg(long, default_value_t = 3)]
    pub min_questions: usize,

    /// Token the question model puts between questions
    #[arg(long, default_value = "<sep>")]
    pub separator: String,

    /// Task prefix prepended to every question-generation input
    #[arg(long, default_value = "generate questions: ")]
    pub question_prefix: String,

    #[arg(long, default_value = "valhalla/t5-base-qg-hl")]
    pub qg_model: String,

    #[arg(long, default_value = "deepset/roberta-base-squad2")]
    pub qa_model: String,

    /// Also write the extracted text to this file
    #[arg(long)]
    pub save_text: Option<PathBuf>,

    /// Skip the summary step
    #[arg(long)]
    pub no_summary: bool,

    /// Generate questions only, do not answer them
    #[arg(long)]
    pub no_answers: bool,
}

/// All arguments for the `segment` command.
#[derive(Args, Debug)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// All arguments for the `summarize` command.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub summary: SummaryArgs,
}

/// Fill the shared sections of a PipelineConfig.
fn apply_common(
    cfg:     &mut PipelineConfig,
    input:   InputArgs,
    api:     Option<ApiArgs>,
    summary: Option<SummaryArgs>,
) {
    cfg.input     = input.input;
    cfg.max_words = input.max_words;

    if let Some(api) = api {
        cfg.api_base     = api.api_base;
        cfg.api_token    = api.api_token;
        cfg.timeout_secs = api.timeout_secs;
    }

    if let Some(s) = summary {
        cfg.summary_model       = s.summary_model;
        cfg.summary_max_length  = s.summary_max_length;
        cfg.summary_min_length  = s.summary_min_length;
        cfg.summary_input_chars = s.summary_input_chars;
    }
}

/// Convert CLI RunArgs into the application-layer PipelineConfig.
impl From<RunArgs> for PipelineConfig {
    fn from(a: RunArgs) -> Self {
        let mut cfg = PipelineConfig {
            summarize:       !a.no_summary,
            answer:          !a.no_answers,
            min_questions:   a.min_questions,
            separator:       a.separator,
            question_prefix: a.question_prefix,
            qg_model:        a.qg_model,
            qa_model:        a.qa_model,
            save_text:       a.save_text,
            ..PipelineConfig::default()
        };
        apply_common(&mut cfg, a.input, Some(a.api), Some(a.summary));
        cfg
    }
}

impl From<SegmentArgs> for PipelineConfig {
    fn from(a: SegmentArgs) -> Self {
        let mut cfg = PipelineConfig {
            summarize: false,
            answer:    false,
            ..PipelineConfig::default()
        };
        apply_common(&mut cfg, a.input, None, None);
        cfg
    }
}

impl From<SummarizeArgs> for PipelineConfig {
    fn from(a: SummarizeArgs) -> Self {
        let mut cfg = PipelineConfig {
            answer: false,
            ..PipelineConfig::default()
        };
        apply_common(&mut cfg, a.input, Some(a.api), Some(a.summary));
        cfg
    }
}
