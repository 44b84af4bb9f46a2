pub mod config;
pub mod engine;
pub mod matcher;
pub mod normalize;

pub use config::{ConfigError, KeywordConfig};
pub use engine::{classify, CategoryTable, Classification, Classifier, RejectedEntry, COLLAPSE};
pub use matcher::{find_match, is_included, KeywordSet, MatchText};
pub use normalize::standardize;
