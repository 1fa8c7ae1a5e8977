//! Error types for loading, validating, rendering and serving a result set

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for the view-model pipeline
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Anything that stops a gallery from being built at startup
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The input file could not be read or is not a valid result document
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Every record that failed validation, collected in one pass
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid object record(s):", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// One problem with one input record
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Position of the record in the input `objects` array
    pub object: usize,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object #{}: {}", self.object, self.kind)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViolationKind {
    #[error("class index {class} out of range (0..{classes})")]
    ClassOutOfRange { class: i64, classes: usize },

    #[error("label index {label} out of range (0..{classes})")]
    LabelOutOfRange { label: i64, classes: usize },

    #[error("score {score} at position {position} is outside [0, 1]")]
    ScoreOutOfRange { position: usize, score: f64 },

    #[error("score vector is empty")]
    EmptyScores,

    #[error("score vector has {scores} ranked entries but only {classes} classes are defined")]
    TooManyScores { scores: usize, classes: usize },

    #[error("duplicate object id {0:?}")]
    DuplicateId(String),
}

/// A raw file requested by the gallery could not be served
#[derive(Error, Debug)]
pub enum FileError {
    #[error("open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stat {path}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read {path}: is a directory")]
    IsDirectory { path: String },
}

/// The page template failed to compile or render
#[derive(Error, Debug)]
#[error("template error: {0}")]
pub struct RenderError(#[from] minijinja::Error);
