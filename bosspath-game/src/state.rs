use serde::{Deserialize, Serialize};

/// Mutable run state owned by the path engine.
///
/// `defeated` is an ordered set: insertion order is kept for diagnostics and
/// no id appears twice. Availability and convergence are derived from it and
/// the roster, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathState {
    pub seed: String,
    #[serde(default)]
    pub defeated: Vec<String>,
}

impl PathState {
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            defeated: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_defeated(&self, id: &str) -> bool {
        self.defeated.iter().any(|d| d == id)
    }

    /// Insert `id` if absent. Returns whether the set changed.
    pub(crate) fn insert_defeated(&mut self, id: &str) -> bool {
        if self.is_defeated(id) {
            return false;
        }
        self.defeated.push(id.to_string());
        true
    }

    /// Serialize the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
