use thiserror::Error;

/// Fatal pipeline errors surfaced to callers.
///
/// Oracle failures are deliberately absent: the pipeline recovers from them
/// by degrading to heuristic-only extraction, so they never reach the
/// caller as errors (see `ExtractionMetadata::method`).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "input text too short to extract from: {length} chars after whitespace normalization (minimum {minimum})"
    )]
    EmptyInput { length: usize, minimum: usize },
}
