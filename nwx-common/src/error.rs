//! Common error types for NWX
//!
//! Fatal conditions surface as [`Error`]. Conditions the assembler recovers
//! from locally are reported as [`Degradation`] values next to the output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for NWX operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across NWX crates
#[derive(Error, Debug)]
pub enum Error {
    /// Qcode absent from the vocabulary snapshot
    #[error("Not found: qcode '{qcode}' in scheme '{scheme}'")]
    NotFound { qcode: String, scheme: String },

    /// Hierarchy walk revisited a qcode or exceeded the depth bound
    #[error("Hierarchy walk aborted at '{qcode}' after {depth} hops")]
    CycleOrDepthExceeded { qcode: String, depth: usize },

    /// Rewrite or reference lookup hit a missing link
    #[error("Broken chain: item '{0}' not found")]
    BrokenChain(String),

    /// No snapshot available for a referenced scheme
    #[error("Missing vocabulary: {0}")]
    MissingVocabulary(String),

    /// Unparseable instant
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Content item lacks a mandatory identifier (id or type)
    #[error("Missing identifier: {0}")]
    MissingIdentifier(String),

    /// Content repository collaborator failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wire serialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding error (wraps toml::de::Error)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A condition recovered during assembly
///
/// Each variant mirrors a recoverable [`Error`] kind and records the fallback
/// that was applied instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// Tag dropped from output
    NotFound { qcode: String, scheme: String },
    /// Ancestor promotion skipped for this tag
    CycleOrDepthExceeded { qcode: String },
    /// Rewrite chain stopped at `last_known`
    BrokenChain { missing: String, last_known: String },
    /// Fields derived from this scheme omitted
    MissingVocabulary { scheme: String },
    /// Field emitted with the default timestamp
    MalformedTimestamp { field: String, raw: String },
}

impl Degradation {
    /// Map a recoverable error onto its degradation record
    ///
    /// Returns None for fatal error kinds.
    pub fn from_error(err: &Error) -> Option<Self> {
        match err {
            Error::NotFound { qcode, scheme } => Some(Degradation::NotFound {
                qcode: qcode.clone(),
                scheme: scheme.clone(),
            }),
            Error::CycleOrDepthExceeded { qcode, .. } => {
                Some(Degradation::CycleOrDepthExceeded { qcode: qcode.clone() })
            }
            Error::MissingVocabulary(scheme) => Some(Degradation::MissingVocabulary {
                scheme: scheme.clone(),
            }),
            _ => None,
        }
    }
}

/// Value produced with or without a fallback
///
/// Replaces catch-and-log around collaborator lookups: callers always get a
/// usable value, and tests can assert on the degraded path directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    /// Primary path succeeded
    Ok(T),
    /// Fallback value used
    Degraded(T, Degradation),
}

impl<T> Resolved<T> {
    /// The value, regardless of path
    pub fn value(&self) -> &T {
        match self {
            Resolved::Ok(v) | Resolved::Degraded(v, _) => v,
        }
    }

    /// Consume into the value, discarding the degradation
    pub fn into_value(self) -> T {
        match self {
            Resolved::Ok(v) | Resolved::Degraded(v, _) => v,
        }
    }

    /// Degradation record if the fallback was used
    pub fn degradation(&self) -> Option<&Degradation> {
        match self {
            Resolved::Ok(_) => None,
            Resolved::Degraded(_, d) => Some(d),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Resolved::Degraded(..))
    }

    /// Push any degradation into `sink` and return the value
    pub fn record(self, sink: &mut Vec<Degradation>) -> T {
        match self {
            Resolved::Ok(v) => v,
            Resolved::Degraded(v, d) => {
                sink.push(d);
                v
            }
        }
    }
}
