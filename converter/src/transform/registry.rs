//! Registry of ids seen during one run.
//!
//! Owned by the coordinator and threaded through every category, so
//! uniqueness holds across all sources rather than within one file.

use std::collections::HashMap;

/// Where an id was first accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenAt {
    pub source: String,
    pub row_number: usize,
}

/// Ids accepted so far, with their first location.
#[derive(Debug, Default)]
pub struct IdRegistry {
    seen: HashMap<String, SeenAt>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id` for a row. On collision returns the original claim untouched.
    pub fn claim(&mut self, id: &str, source: &str, row_number: usize) -> Result<(), SeenAt> {
        if let Some(first) = self.seen.get(id) {
            return Err(first.clone());
        }
        self.seen.insert(
            id.to_string(),
            SeenAt {
                source: source.to_string(),
                row_number,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
