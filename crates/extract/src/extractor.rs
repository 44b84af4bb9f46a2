use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Extraction provider error: {0}")]
    Provider(String),
    #[error("Extraction returned an empty summary")]
    EmptySummary,
    #[error("Summary is not a JSON array of entries: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstraction over the structured-extraction service.
///
/// Implementations accept the raw PDF bytes of a bank statement and return
/// the summary text: a JSON array of debit entries, possibly wrapped in a
/// Markdown code fence.
pub trait StatementExtractor: Send + Sync {
    fn extract(&self, pdf: &[u8]) -> Result<String, ExtractError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set summary and counts how often it was asked.
pub struct MockExtractor {
    pub summary: String,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockExtractor {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl StatementExtractor for MockExtractor {
    fn extract(&self, _pdf: &[u8]) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.summary.clone())
    }
}
