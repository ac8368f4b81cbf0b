//! Poem identifier - opaque string key for an engagement record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a poem in the catalog.
///
/// The catalog itself lives outside this subsystem; the id is treated as an
/// opaque string and used as the unique key of the poem's engagement record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoemId(String);

impl PoemId {
    /// Create a new PoemId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check if the id is empty (never valid as a record key)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PoemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PoemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PoemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
