//! Error handling for the map editor core
//!
//! One error type for every editor operation. Registry refusals, model lookups and
//! persistence failures all end up here so the session boundary can report them
//! uniformly instead of letting them reach the frame loop.

use crate::entity::Handle;
use crate::persistence::PersistenceError;

/// Main error type for the editor core
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    // Registry refusals
    #[error("Prop limit of {limit} reached, cannot place more props")]
    CapacityExceeded { limit: usize },

    #[error("Host failed to spawn model {model} after {attempts} attempt(s)")]
    SpawnFailed { model: i32, attempts: u32 },

    #[error("Model {hash} does not resolve to a loadable asset")]
    InvalidModel { hash: i32 },

    #[error("Handle {0} is not managed by the editor")]
    UnknownHandle(Handle),

    // Metadata validation
    #[error("Identification '{0}' is already in use")]
    DuplicateIdentifier(String),

    #[error("Identification '{0}' is invalid")]
    InvalidIdentifier(String),

    #[error("Operation not supported for {category}: {operation}")]
    WrongCategory {
        category: &'static str,
        operation: &'static str,
    },

    // Configuration
    #[error("Invalid config: {field} ({reason})")]
    InvalidConfig { field: String, reason: String },

    // Files
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Type alias for Results in the editor core
pub type EditorResult<T> = Result<T, EditorError>;

impl From<std::io::Error> for EditorError {
    fn from(error: std::io::Error) -> Self {
        EditorError::Persistence(PersistenceError::from(error))
    }
}

// Helper functions for common error patterns

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_editor<F>(self, f: F) -> EditorResult<T>
    where
        F: FnOnce() -> EditorError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_editor<F>(self, f: F) -> EditorResult<T>
    where
        F: FnOnce() -> EditorError,
    {
        self.ok_or_else(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditorError::CapacityExceeded { limit: 2048 };
        assert_eq!(
            err.to_string(),
            "Prop limit of 2048 reached, cannot place more props"
        );
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_editor(|| EditorError::UnknownHandle(Handle(12)));
        assert!(matches!(result, Err(EditorError::UnknownHandle(Handle(12)))));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: EditorError = io.into();
        assert!(matches!(err, EditorError::Persistence(PersistenceError::Io(_))));
    }
}
