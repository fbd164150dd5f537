//! Error types surfaced by the path engine and roster loading.
use thiserror::Error;

/// Caller errors raised by selection and pool mutation.
///
/// Both variants indicate a bug in the calling code: an id that was never part
/// of the roster, or a selection request after the run has already ended.
/// Retrying with the same input reproduces the same error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("boss '{id}' is not part of the roster")]
    UnknownBoss { id: String },
    #[error("no bosses remain to select for seed {seed}")]
    EmptyPool { seed: String },
}

impl PathError {
    pub(crate) fn unknown(id: &str) -> Self {
        Self::UnknownBoss { id: id.to_string() }
    }
}

/// Errors raised when a roster catalogue violates its invariants.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster must contain at least one boss")]
    Empty,
    #[error("roster entry at position {index} has a blank id")]
    BlankId { index: usize },
    #[error("boss id '{id}' appears more than once")]
    DuplicateId { id: String },
    #[error("roster JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = PathError::unknown("Mimic");
        assert_eq!(err.to_string(), "boss 'Mimic' is not part of the roster");

        let err = PathError::EmptyPool {
            seed: "ABC123".into(),
        };
        assert!(err.to_string().contains("ABC123"));

        let err = RosterError::DuplicateId { id: "Pride".into() };
        assert!(err.to_string().contains("Pride"));
    }

    #[test]
    fn parse_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RosterError = parse.into();
        assert!(matches!(err, RosterError::Parse(_)));
    }
}
