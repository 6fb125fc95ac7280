// ============================================================
// Layer 2 — PipelineUseCase
// ============================================================
// Orchestrates one document run in order:
//
//   Step 1: Load + clean the input file     (Layer 4 - data)
//   Step 2: Save extracted text (optional)  (Layer 6 - infra)
//   Step 3: Summarise the head (optional)   (Layer 5 - ml)
//   Step 4: Segment into passages           (Layer 4 - data)
//   Step 5: Generate unique questions       (Layer 5 - ml)
//   Step 6: Answer each unique question     (Layer 5 - ml)
//
// Results are handed to the caller as PipelineEvents while the
// run progresses, so the CLI can print each passage as soon as
// it is done. If a later stage fails, whatever was already
// reported stays reported — there is no rollback.
//
// The services and the document-wide dedup state live in a
// PipelineContext that exists for exactly one document run.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{loader::source_for, segmenter::TextSegmenter};
use crate::domain::document::Document;
use crate::domain::error::PipelineError;
use crate::domain::passage::Passage;
use crate::domain::question::{AnsweredQuestion, PassageQuestions, Question};
use crate::domain::traits::{QuestionAnsweringService, QuestionGenerator, TextGenerationService};
use crate::infra::inference_client::{ClientSettings, InferenceClient};
use crate::infra::text_store::TextStore;
use crate::ml::aggregator::QuestionAggregator;
use crate::ml::answering::AnswerStage;
use crate::ml::question_generator::PromptedQuestionGenerator;
use crate::ml::summarizer::Summarizer;

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Everything a run needs, independent of how it was supplied
// (CLI flags, env vars). Serialisable so it can be logged; the
// API token is never written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input:               PathBuf,
    pub save_text:           Option<PathBuf>,
    pub summarize:           bool,
    pub answer:              bool,
    pub max_words:           usize,
    pub min_questions:       usize,
    pub separator:           String,
    pub question_prefix:     String,
    pub summary_max_length:  usize,
    pub summary_min_length:  usize,
    pub summary_input_chars: usize,
    pub api_base:            String,
    #[serde(skip_serializing, default)]
    pub api_token:           Option<String>,
    pub timeout_secs:        u64,
    pub qg_model:            String,
    pub summary_model:       String,
    pub qa_model:            String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input:               PathBuf::from("document.pdf"),
            save_text:           None,
            summarize:           true,
            answer:              true,
            max_words:           200,
            min_questions:       3,
            separator:           "<sep>".to_string(),
            question_prefix:     "generate questions: ".to_string(),
            summary_max_length:  150,
            summary_min_length:  30,
            summary_input_chars: 1000,
            api_base:            "https://api-inference.huggingface.co/models".to_string(),
            api_token:           None,
            timeout_secs:        120,
            qg_model:            "valhalla/t5-base-qg-hl".to_string(),
            summary_model:       "t5-small".to_string(),
            qa_model:            "deepset/roberta-base-squad2".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Reject values that would make the run meaningless.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_words == 0 {
            return Err(PipelineError::Config("max_words must be greater than 0".into()));
        }
        if self.min_questions == 0 {
            return Err(PipelineError::Config("min_questions must be greater than 0".into()));
        }
        if self.separator.is_empty() {
            return Err(PipelineError::Config("separator must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(PipelineError::Config("timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_base:     self.api_base.clone(),
            api_token:    self.api_token.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn summarizer(&self) -> Summarizer {
        Summarizer::new(
            self.summary_max_length,
            self.summary_min_length,
            self.summary_input_chars,
        )
    }
}

// ─── Events & Results ─────────────────────────────────────────────────────────
/// Progress reported to the caller while a document is processed.
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    Loaded(&'a Document),
    Summary(&'a str),
    Segmented(&'a [Passage]),
    Passage {
        passage:   &'a Passage,
        questions: &'a PassageQuestions,
    },
    Answered(&'a AnsweredQuestion),
}

/// Everything a completed run produced.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    pub summary:     Option<String>,
    pub passages:    Vec<Passage>,
    pub per_passage: Vec<PassageQuestions>,
    pub unique:      Vec<Question>,
    pub answered:    Vec<AnsweredQuestion>,
}

// ─── Services & Context ───────────────────────────────────────────────────────
/// The external capabilities a run may call.
pub struct Services<'a> {
    pub questions: &'a dyn QuestionGenerator,
    pub summary:   Option<&'a dyn TextGenerationService>,
    pub answers:   Option<&'a dyn QuestionAnsweringService>,
}

/// Per-document state: the services plus the dedup and answer
/// records. Created at the start of a run, dropped at its end.
pub struct PipelineContext<'a> {
    services:   Services<'a>,
    aggregator: QuestionAggregator,
    answers:    AnswerStage,
}

impl<'a> PipelineContext<'a> {
    pub fn new(services: Services<'a>, min_questions: usize) -> Self {
        Self {
            services,
            aggregator: QuestionAggregator::new(min_questions),
            answers:    AnswerStage::new(),
        }
    }
}

/// HTTP-backed services built from the configuration.
pub struct HttpServices {
    questions: PromptedQuestionGenerator<InferenceClient>,
    summary:   Option<InferenceClient>,
    answers:   Option<InferenceClient>,
}

impl HttpServices {
    pub fn connect(cfg: &PipelineConfig) -> Result<Self> {
        let settings = cfg.client_settings();

        let qg_client = InferenceClient::new(&settings, &cfg.qg_model, "question-generation")?;
        let questions = PromptedQuestionGenerator::new(qg_client)
            .with_prefix(cfg.question_prefix.as_str())
            .with_separator(cfg.separator.as_str());

        let summary = if cfg.summarize {
            Some(InferenceClient::new(&settings, &cfg.summary_model, "summarization")?)
        } else {
            None
        };

        let answers = if cfg.answer {
            Some(InferenceClient::new(&settings, &cfg.qa_model, "question-answering")?)
        } else {
            None
        };

        Ok(Self { questions, summary, answers })
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            questions: &self.questions,
            summary:   self.summary.as_ref().map(|s| s as &dyn TextGenerationService),
            answers:   self.answers.as_ref().map(|a| a as &dyn QuestionAnsweringService),
        }
    }
}

// ─── PipelineUseCase ──────────────────────────────────────────────────────────
pub struct PipelineUseCase {
    config: PipelineConfig,
}

impl PipelineUseCase {
    /// Create a use case; fails on an invalid configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Full run against the configured HTTP services.
    pub fn execute<F>(&self, on_event: F) -> Result<PipelineOutcome>
    where
        F: FnMut(PipelineEvent<'_>),
    {
        let document = self.load_document()?;
        let http     = HttpServices::connect(&self.config)?;
        self.run_document(&document, http.services(), on_event)
    }

    /// Step 1 on its own: extract and clean the input file.
    pub fn load_document(&self) -> Result<Document> {
        tracing::info!("Loading '{}'", self.config.input.display());
        source_for(&self.config.input)
            .load()
            .with_context(|| format!("Cannot load '{}'", self.config.input.display()))
    }

    /// Step 4 on its own: split a document into passages.
    pub fn segment(&self, document: &Document) -> Result<Vec<Passage>> {
        let segmenter = TextSegmenter::new(self.config.max_words)?;
        Ok(segmenter.segment(&document.text))
    }

    /// Step 3 on its own, against the configured summary model.
    pub fn summarize(&self, document: &Document) -> Result<String> {
        let client = InferenceClient::new(
            &self.config.client_settings(),
            &self.config.summary_model,
            "summarization",
        )?;
        self.config.summarizer().summarize(&client, &document.text)
    }

    /// Steps 2–6 for an already loaded document.
    pub fn run_document<F>(
        &self,
        document:     &Document,
        services:     Services<'_>,
        mut on_event: F,
    ) -> Result<PipelineOutcome>
    where
        F: FnMut(PipelineEvent<'_>),
    {
        let cfg = &self.config;

        if document.is_blank() {
            return Err(PipelineError::Extraction(format!(
                "'{}' contains no usable text",
                document.source
            ))
            .into());
        }
        on_event(PipelineEvent::Loaded(document));

        let mut ctx     = PipelineContext::new(services, cfg.min_questions);
        let mut outcome = PipelineOutcome::default();

        // ── Step 2: Side file ────────────────────────────────────────────────
        if let Some(path) = &cfg.save_text {
            TextStore::new(path).save(document)?;
        }

        // ── Step 3: Summary ──────────────────────────────────────────────────
        if cfg.summarize {
            if let Some(service) = ctx.services.summary {
                let summary = cfg.summarizer().summarize(service, &document.text)?;
                on_event(PipelineEvent::Summary(&summary));
                outcome.summary = Some(summary);
            }
        }

        // ── Step 4: Passages ─────────────────────────────────────────────────
        outcome.passages = self.segment(document)?;
        tracing::info!(
            "'{}' split into {} passages (max_words={})",
            document.source,
            outcome.passages.len(),
            cfg.max_words
        );
        on_event(PipelineEvent::Segmented(&outcome.passages));

        // ── Step 5: Unique questions, one passage at a time ──────────────────
        outcome.per_passage = ctx.aggregator.generate_each(
            &outcome.passages,
            ctx.services.questions,
            |passage, questions| on_event(PipelineEvent::Passage { passage, questions }),
        )?;
        outcome.unique = outcome
            .per_passage
            .iter()
            .flat_map(|pq| pq.fresh.iter().cloned())
            .collect();
        tracing::info!("{} unique questions", outcome.unique.len());

        // ── Step 6: Answers ──────────────────────────────────────────────────
        if cfg.answer {
            if let Some(service) = ctx.services.answers {
                outcome.answered = ctx.answers.answer_each(
                    &outcome.unique,
                    &outcome.passages,
                    service,
                    |answered| on_event(PipelineEvent::Answered(answered)),
                )?;
                tracing::info!("{} questions answered", ctx.answers.answered_count());
            }
        }

        Ok(outcome)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::testing::{DownService, EchoAnswerer, ScriptedGenerator};

    fn config(max_words: usize, min_questions: usize) -> PipelineConfig {
        PipelineConfig {
            max_words,
            min_questions,
            ..PipelineConfig::default()
        }
    }

    /// Compact record of the events a run emitted
    fn event_log(event: &PipelineEvent<'_>) -> String {
        match event {
            PipelineEvent::Loaded(d)        => format!("loaded {}", d.source),
            PipelineEvent::Summary(s)       => format!("summary {s}"),
            PipelineEvent::Segmented(ps)    => format!("segmented {}", ps.len()),
            PipelineEvent::Passage { passage, questions } => {
                format!("passage {} {}", passage.index, questions.fresh.len())
            }
            PipelineEvent::Answered(a)      => format!("answered {}", a.question.text),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(PipelineUseCase::new(config(0, 3)).is_err());
        assert!(PipelineUseCase::new(config(10, 0)).is_err());

        let mut cfg = PipelineConfig::default();
        cfg.separator.clear();
        assert!(matches!(cfg.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_api_token_is_not_serialised() {
        let cfg = PipelineConfig {
            api_token: Some("secret".into()),
            ..PipelineConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_end_to_end_with_fakes() {
        let use_case = PipelineUseCase::new(config(5, 2)).unwrap();
        let doc      = Document::new("doc.txt", "Sentence one. Sentence two. Sentence three.");

        let qg = ScriptedGenerator::new()
            .respond("Sentence one. Sentence two.", "Q1?<sep>Q2?<sep>")
            .respond("Sentence three.", "Q2?<sep>Q3?");
        let summary = ScriptedGenerator::new()
            .respond(&doc.text, "A summary.");
        let qa = EchoAnswerer::default();

        let services = Services {
            questions: &qg,
            summary:   Some(&summary),
            answers:   Some(&qa),
        };

        let mut log = Vec::new();
        let outcome = use_case
            .run_document(&doc, services, |e| log.push(event_log(&e)))
            .unwrap();

        assert_eq!(outcome.summary.as_deref(), Some("A summary."));
        assert_eq!(outcome.passages.len(), 2);

        let unique: Vec<&str> = outcome.unique.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(unique, vec!["Q1?", "Q2?", "Q3?"]);
        assert_eq!(outcome.per_passage[1].candidates, vec!["Q2?", "Q3?"]);

        // One QA call per unique question, context from its passage
        assert_eq!(qa.call_count(), 3);
        assert_eq!(outcome.answered[2].answer.text, "Q3? @ Sentence");
        assert_eq!(outcome.answered[2].passage_index(), 1);

        assert_eq!(
            log,
            vec![
                "loaded doc.txt",
                "summary A summary.",
                "segmented 2",
                "passage 0 2",
                "passage 1 1",
                "answered Q1?",
                "answered Q2?",
                "answered Q3?",
            ]
        );
    }

    #[test]
    fn test_summary_and_answers_can_be_skipped() {
        let cfg = PipelineConfig {
            summarize: false,
            answer:    false,
            ..config(50, 1)
        };
        let use_case = PipelineUseCase::new(cfg).unwrap();
        let doc      = Document::new("doc.txt", "Only one passage here.");
        let qg       = ScriptedGenerator::new().respond(&doc.text, "Q?");
        let qa       = EchoAnswerer::default();

        let services = Services {
            questions: &qg,
            summary:   None,
            answers:   Some(&qa),
        };
        let outcome = use_case.run_document(&doc, services, |_| {}).unwrap();

        assert!(outcome.summary.is_none());
        assert!(outcome.answered.is_empty());
        assert_eq!(qa.call_count(), 0);
        assert_eq!(outcome.unique.len(), 1);
    }

    #[test]
    fn test_blank_document_fails_before_any_stage() {
        let use_case = PipelineUseCase::new(config(5, 1)).unwrap();
        let qg       = ScriptedGenerator::new();
        let services = Services {
            questions: &qg,
            summary:   None,
            answers:   None,
        };

        let mut events = 0;
        let err = use_case
            .run_document(&Document::new("empty.pdf", "  "), services, |_| events += 1)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Extraction(_))
        ));
        assert_eq!(events, 0);
        assert_eq!(qg.call_count(), 0);
    }

    #[test]
    fn test_answer_service_failure_keeps_earlier_events() {
        let cfg      = PipelineConfig { summarize: false, ..config(50, 1) };
        let use_case = PipelineUseCase::new(cfg).unwrap();
        let doc      = Document::new("doc.txt", "Some text.");
        let qg       = ScriptedGenerator::new().respond(&doc.text, "Q?");

        let services = Services {
            questions: &qg,
            summary:   None,
            answers:   Some(&DownService),
        };

        let mut log = Vec::new();
        let err = use_case
            .run_document(&doc, services, |e| log.push(event_log(&e)))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ServiceUnavailable { .. })
        ));
        // The passage report was already handed out before the failure
        assert_eq!(log.last().map(String::as_str), Some("passage 0 1"));
    }

    #[test]
    fn test_save_text_writes_side_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_text.txt");
        let cfg  = PipelineConfig {
            save_text: Some(path.clone()),
            summarize: false,
            answer:    false,
            ..config(50, 1)
        };
        let use_case = PipelineUseCase::new(cfg).unwrap();
        let qg       = ScriptedGenerator::new();
        let services = Services {
            questions: &qg,
            summary:   None,
            answers:   None,
        };

        use_case
            .run_document(&Document::new("doc.txt", "Saved text."), services, |_| {})
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Saved text.");
    }

    #[test]
    fn test_load_document_from_text_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "Hello   world.").unwrap();

        let cfg = PipelineConfig {
            input: path,
            ..PipelineConfig::default()
        };
        let doc = PipelineUseCase::new(cfg).unwrap().load_document().unwrap();
        assert_eq!(doc.text, "Hello world.");
    }
}
