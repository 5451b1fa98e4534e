use thiserror::Error;

use crate::layout::OverlapPair;

/// Result type used throughout the alignment engine.
pub type Result<T> = std::result::Result<T, AlignError>;

/// Errors surfaced while ingesting or resolving a slide.
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("configuration error: {message}")]
    Configuration { message: String },
    #[error("malformed component `{id}`: {reason}")]
    MalformedComponent { id: String, reason: String },
    #[error("{} overlap(s) unresolved after {iterations} iteration(s)", unresolved.len())]
    UnresolvedOverlap {
        iterations: usize,
        unresolved: Vec<OverlapPair>,
    },
    #[error("invalid deck document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("slide {index}: {source}")]
    Slide {
        index: usize,
        #[source]
        source: Box<AlignError>,
    },
}

impl AlignError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::MalformedComponent {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn in_slide(self, index: usize) -> Self {
        match self {
            Self::Slide { .. } => self,
            other => Self::Slide {
                index,
                source: Box::new(other),
            },
        }
    }

    /// Strips any slide wrapper and returns the underlying error.
    pub fn root(&self) -> &AlignError {
        match self {
            Self::Slide { source, .. } => source.root(),
            other => other,
        }
    }
}
