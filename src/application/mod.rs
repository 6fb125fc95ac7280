// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer sequences the other layers for one document run.
//
// Rules for this layer:
//   - No PDF parsing or HTTP requests here (that's Layers 4
//     and 6); HttpServices only wires Layer 6 clients together
//     from the run's configuration
//   - No printing here (that's Layer 1), only PipelineEvents
//   - Only workflow coordination and run-scoped state
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Extract → summarise → segment → question → answer
pub mod pipeline_use_case;
