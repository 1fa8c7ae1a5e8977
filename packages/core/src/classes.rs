use serde::{Deserialize, Serialize};

/// Ordered class names; the index is the class identity everywhere else
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassSet {
    names: Vec<String>,
}

impl ClassSet {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves a raw index from the input file. Negative and out-of-range
    /// indices resolve to `None`; the valid range is `0..len`.
    pub fn index(&self, raw: i64) -> Option<usize> {
        usize::try_from(raw).ok().filter(|&i| i < self.names.len())
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Render-ready class metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub index: usize,
    pub name: String,
    pub color: String,
}
