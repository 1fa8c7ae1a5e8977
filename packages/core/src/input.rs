//! Input document schema.
//!
//! Result files come in two record shapes produced by different generations of
//! the exporting tool. Both are accepted, record by record, and normalized into
//! [`InputObject`] before anything else looks at them.

use crate::classes::ClassSet;
use crate::error::LoadError;
use serde::Deserialize;
use std::path::Path;

/// Top-level input file: `{ "classes": [...], "objects": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct InputDocument {
    pub classes: ClassSet,
    #[serde(default)]
    pub objects: Vec<RawRecord>,
}

impl InputDocument {
    pub fn from_slice(path: &Path, bytes: &[u8]) -> Result<Self, LoadError> {
        serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_slice(path, &bytes)
    }

    /// Splits the document into the class set and normalized records
    pub fn into_parts(self) -> (ClassSet, Vec<InputObject>) {
        let objects = self.objects.into_iter().map(InputObject::from).collect();
        (self.classes, objects)
    }
}

/// One record as it appears on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    ScoreVector(ScoreVectorRecord),
    SingleScore(SingleScoreRecord),
}

/// `{ filePath, class, label?, scores: [..] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreVectorRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub file_path: String,
    pub class: i64,
    #[serde(default)]
    pub label: Option<i64>,
    pub scores: Vec<f64>,
}

/// `{ id?, file, class, label?, score }`
#[derive(Debug, Clone, Deserialize)]
pub struct SingleScoreRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub file: String,
    pub class: i64,
    #[serde(default)]
    pub label: Option<i64>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scores {
    /// Confidence of the predicted class only
    Single(f64),
    /// One score per class, aligned with the class set
    PerClass(Vec<f64>),
}

/// Normalized input record
#[derive(Debug, Clone, PartialEq)]
pub struct InputObject {
    pub id: Option<String>,
    pub file_path: String,
    pub class: i64,
    pub label: Option<i64>,
    pub scores: Scores,
}

impl From<ScoreVectorRecord> for InputObject {
    fn from(record: ScoreVectorRecord) -> Self {
        Self {
            id: record.id,
            file_path: record.file_path,
            class: record.class,
            label: record.label,
            scores: Scores::PerClass(record.scores),
        }
    }
}

impl From<SingleScoreRecord> for InputObject {
    fn from(record: SingleScoreRecord) -> Self {
        Self {
            id: record.id,
            file_path: record.file,
            class: record.class,
            label: record.label,
            scores: Scores::Single(record.score),
        }
    }
}

impl From<RawRecord> for InputObject {
    fn from(record: RawRecord) -> Self {
        match record {
            RawRecord::ScoreVector(record) => record.into(),
            RawRecord::SingleScore(record) => record.into(),
        }
    }
}
