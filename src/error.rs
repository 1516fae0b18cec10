//! Error types for heading index processing

use std::fmt;

/// Errors caused by the indexing configuration itself.
///
/// None of these are recoverable inside a document pass: they propagate out
/// of [`crate::pipeline::index_document`] and the host decides whether to
/// skip or fail the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A style specification token could not be parsed.
    MalformedToken { token: String, position: usize },
    /// A style token references a symbol outside the known style set.
    UnknownStyleSymbol {
        symbol: String,
        token: String,
        position: usize,
    },
    /// The document nests deeper than the configured style levels.
    MissingLevelStyle { level: u32 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MalformedToken { token, position } => {
                write!(
                    f,
                    "Malformed index style token '{}' at position {}",
                    token, position
                )
            }
            ConfigurationError::UnknownStyleSymbol {
                symbol,
                token,
                position,
            } => {
                write!(
                    f,
                    "Unknown index style symbol '{}' in token '{}' at position {}",
                    symbol, token, position
                )
            }
            ConfigurationError::MissingLevelStyle { level } => {
                write!(
                    f,
                    "No index style defined in the configuration: level = {}",
                    level
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Top-level error for a document pass: either the configuration is bad or
/// the markup boundary failed while serializing the rewritten tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexingError {
    Configuration(ConfigurationError),
    Markup(String),
}

impl fmt::Display for IndexingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexingError::Configuration(err) => write!(f, "{}", err),
            IndexingError::Markup(msg) => write!(f, "Markup error: {}", msg),
        }
    }
}

impl std::error::Error for IndexingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexingError::Configuration(err) => Some(err),
            IndexingError::Markup(_) => None,
        }
    }
}

impl From<ConfigurationError> for IndexingError {
    fn from(err: ConfigurationError) -> Self {
        IndexingError::Configuration(err)
    }
}
