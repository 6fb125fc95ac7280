// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concrete implementations of the outside world:
//
//   inference_client.rs — blocking HTTP client for the hosted
//                         question-generation, summarisation
//                         and question-answering models.
//                         Implements TextGenerationService and
//                         QuestionAnsweringService from Layer 3.
//
//   text_store.rs       — writes the extracted document text to
//                         a side file on request.
//
// Keeping these here means the rest of the crate can be tested
// with in-memory fakes and the HTTP backend can be swapped
// (e.g. a local model server) by implementing the same traits.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// HTTP client for the model services
pub mod inference_client;

/// Extracted-text side file
pub mod text_store;
