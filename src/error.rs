//! Domain errors for question selection

use thiserror::Error;

/// Terminal failures of a selection request.
///
/// Everything past the resolver is total, so these are the only ways a
/// well-formed request can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Framework ID is required")]
    MissingFrameworkId,

    #[error("Framework not found: {id}")]
    FrameworkNotFound { id: String },

    #[error("No questions found in the selected framework: {framework_name}")]
    EmptyQuestionPool {
        framework_id: String,
        framework_name: String,
    },
}

impl SelectionError {
    /// Stable machine-readable kind, used in logs and error envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFrameworkId => "missing_framework_id",
            Self::FrameworkNotFound { .. } => "framework_not_found",
            Self::EmptyQuestionPool { .. } => "empty_question_pool",
        }
    }
}
