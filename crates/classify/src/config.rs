use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse keyword TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The two keyword lists that drive classification.
///
/// ```toml
/// collapsed = ["TARIFA", "IOF"]
/// categories = ["JUROS", "ENCARGOS"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Keywords of the collapse bucket, checked before any category.
    pub collapsed: Vec<String>,
    /// Category names, each matched as its own keyword. Earlier entries win
    /// ties.
    pub categories: Vec<String>,
}

impl KeywordConfig {
    pub fn new<S: Into<String>>(
        collapsed: impl IntoIterator<Item = S>,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            collapsed: collapsed.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(
            "Loaded {} collapsed and {} category keywords from {}",
            config.collapsed.len(),
            config.categories.len(),
            path.display()
        );
        Ok(config)
    }
}
