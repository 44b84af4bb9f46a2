use std::path::Path;
use tarifa_classify::{Classification, Classifier};
use tarifa_core::StatementEntry;
use thiserror::Error;

use crate::cache::{CacheEntry, SummaryCache};
use crate::extractor::{ExtractError, StatementExtractor};
use crate::hash;
use crate::summary;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Statement extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// The result of a single statement processing run.
#[derive(Debug)]
pub struct StatementReport {
    /// SHA-256 hex digest of the uploaded file.
    pub content_hash: String,
    /// Whether the summary came from the cache instead of the extractor.
    pub cached: bool,
    /// Entries as decoded from the summary, before classification.
    pub entries: Vec<StatementEntry>,
    pub classification: Classification,
}

/// Orchestrates: hash → cache lookup → extract → decode → cache store → classify.
pub struct StatementPipeline<E: StatementExtractor, C: SummaryCache> {
    extractor: E,
    cache: C,
    classifier: Classifier,
}

impl<E: StatementExtractor, C: SummaryCache> StatementPipeline<E, C> {
    pub fn new(extractor: E, cache: C, classifier: Classifier) -> Self {
        Self {
            extractor,
            cache,
            classifier,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Process a statement on disk.
    pub async fn process_file(&self, path: &Path) -> Result<StatementReport, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("statement.pdf");
        self.process_bytes(file_name, &bytes)
    }

    /// Process raw statement bytes (an upload already in memory).
    pub fn process_bytes(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<StatementReport, PipelineError> {
        // 1. Hash for the content-addressed cache key.
        let content_hash = hash::to_hex(&hash::sha256_bytes(data));
        let key = hash::key_for_hex(&content_hash);

        // 2. Cache lookup. A broken cache only costs an extraction.
        let cached_summary = match self.cache.get(&key) {
            Ok(Some(entry)) => {
                tracing::info!("Cache hit for {file_name} ({key})");
                Some(entry.summary)
            }
            Ok(None) => {
                tracing::info!("Cache miss for {file_name} ({key})");
                None
            }
            Err(e) => {
                tracing::warn!("Cache get error for {file_name}: {e}");
                None
            }
        };
        let cached = cached_summary.is_some();

        // 3. Extract on a miss, then decode.
        let (summary, entries) = match cached_summary {
            Some(summary) => {
                let entries = summary::decode_entries(&summary)?;
                (summary, entries)
            }
            None => {
                tracing::info!("Extracting {file_name} ({} bytes)", data.len());
                let summary = summary::clean_summary(&self.extractor.extract(data)?);
                let entries = summary::decode_entries(&summary)?;
                (summary, entries)
            }
        };

        // 4. Only summaries that decoded are worth keeping.
        if !cached {
            let entry = CacheEntry {
                summary,
                file_name: file_name.to_string(),
                file_size: data.len() as u64,
                content_hash: content_hash.clone(),
            };
            match self.cache.set(&key, entry) {
                Ok(()) => tracing::info!("Cached summary for {file_name} ({key})"),
                Err(e) => tracing::warn!("Cache set error for {file_name}: {e}"),
            }
        }

        // 5. Classify.
        let classification = self.classifier.classify(&entries);

        Ok(StatementReport {
            content_hash,
            cached,
            entries,
            classification,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, MemoryCache};
    use crate::extractor::MockExtractor;
    use tarifa_classify::{KeywordConfig, COLLAPSE};

    const SUMMARY: &str = r#"```json
[
  {"name": "TARIFA BANCARIA", "subtitle": "CESTA B.EXPRESSO2", "date": "13/1/2017", "doc": "110117", "value": "-13,50"},
  {"name": "IOF", "subtitle": null, "date": "2/1/2017", "doc": "000000", "value": "-0,87"},
  {"name": "COMPRA DESCONHECIDA", "subtitle": null, "date": "5/1/2017", "doc": "1", "value": "-10,00"}
]
```"#;

    fn classifier() -> Classifier {
        Classifier::new(&KeywordConfig::new(["TARIFA"], ["IOF"]))
    }

    fn pipeline(summary: &str) -> StatementPipeline<MockExtractor, MemoryCache> {
        StatementPipeline::new(MockExtractor::new(summary), MemoryCache::new(), classifier())
    }

    struct FailingExtractor;

    impl StatementExtractor for FailingExtractor {
        fn extract(&self, _pdf: &[u8]) -> Result<String, ExtractError> {
            Err(ExtractError::Provider("upload rejected".to_string()))
        }
    }

    struct BrokenCache;

    impl SummaryCache for BrokenCache {
        fn get(&self, _key: &str) -> Result<Option<CacheEntry>, CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }
        fn set(&self, _key: &str, _entry: CacheEntry) -> Result<(), CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }
    }

    #[test]
    fn process_bytes_classifies_extracted_entries() {
        let p = pipeline(SUMMARY);
        let report = p.process_bytes("extrato.pdf", b"%PDF-1.4 fake").unwrap();

        assert!(!report.cached);
        assert_eq!(report.content_hash.len(), 64);
        let stored = p.cache().get(&hash::key_for_hex(&report.content_hash)).unwrap();
        assert_eq!(stored.unwrap().content_hash, report.content_hash);
        assert_eq!(report.entries.len(), 3);

        let c = &report.classification;
        assert_eq!(c.collapse().entries[0].date, "13/01/2017");
        assert_eq!(c.total(COLLAPSE).unwrap().fixed2(), "13.50");
        assert_eq!(c.table("IOF").unwrap().len(), 1);
        assert_eq!(c.unmatched_count(), 1);
    }

    #[test]
    fn second_run_is_served_from_cache() {
        let p = pipeline(SUMMARY);
        let first = p.process_bytes("extrato.pdf", b"same bytes").unwrap();
        let second = p.process_bytes("renamed.pdf", b"same bytes").unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(p.extractor().calls(), 1);
        assert_eq!(first.content_hash, second.content_hash);
        assert_eq!(first.classification, second.classification);

        let stored = p
            .cache()
            .get(&hash::cache_key(b"same bytes"))
            .unwrap()
            .unwrap();
        assert_eq!(stored.file_name, "extrato.pdf");
        assert_eq!(stored.file_size, 10);
        assert!(!stored.summary.contains("```"));
    }

    #[test]
    fn different_bytes_miss_the_cache() {
        let p = pipeline(SUMMARY);
        p.process_bytes("a.pdf", b"one").unwrap();
        let report = p.process_bytes("a.pdf", b"two").unwrap();
        assert!(!report.cached);
        assert_eq!(p.extractor().calls(), 2);
        assert_eq!(p.cache().len(), 2);
    }

    #[test]
    fn extractor_failure_propagates() {
        let p = StatementPipeline::new(FailingExtractor, MemoryCache::new(), classifier());
        let err = p.process_bytes("x.pdf", b"x").unwrap_err();
        assert!(matches!(err, PipelineError::Extract(ExtractError::Provider(_))));
        assert!(p.cache().is_empty());
    }

    #[test]
    fn undecodable_summary_is_not_cached() {
        let p = pipeline("Sorry, I could not read this file.");
        let err = p.process_bytes("x.pdf", b"x").unwrap_err();
        assert!(matches!(err, PipelineError::Extract(ExtractError::Decode(_))));
        assert!(p.cache().is_empty());
    }

    #[test]
    fn broken_cache_falls_back_to_extraction() {
        let p = StatementPipeline::new(MockExtractor::new(SUMMARY), BrokenCache, classifier());
        let report = p.process_bytes("x.pdf", b"x").unwrap();
        assert!(!report.cached);
        assert_eq!(report.classification.collapse().len(), 1);
    }

    #[tokio::test]
    async fn process_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extrato-jan.pdf");
        tokio::fs::write(&path, b"%PDF-1.4 january").await.unwrap();

        let p = pipeline(SUMMARY);
        let report = p.process_file(&path).await.unwrap();

        assert_eq!(report.content_hash, hash::to_hex(&hash::sha256_bytes(b"%PDF-1.4 january")));
        let stored = p.cache().get(&hash::cache_key(b"%PDF-1.4 january")).unwrap().unwrap();
        assert_eq!(stored.file_name, "extrato-jan.pdf");
    }

    #[tokio::test]
    async fn process_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(SUMMARY);
        let err = p.process_file(&dir.path().join("absent.pdf")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
