pub mod cache;
pub mod extractor;
pub mod hash;
pub mod pipeline;
pub mod summary;

pub use cache::{CacheEntry, CacheError, MemoryCache, SummaryCache};
pub use extractor::{ExtractError, MockExtractor, StatementExtractor};
pub use hash::{cache_key, key_for_hex, sha256_bytes, to_hex};
pub use pipeline::{PipelineError, StatementPipeline, StatementReport};
pub use summary::{clean_summary, decode_entries};
