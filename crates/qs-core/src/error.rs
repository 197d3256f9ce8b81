use std::path::PathBuf;

use crate::difficulty::Difficulty;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading a quiz catalog or a player roster.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A question carries a point value that is not a positive integer.
    #[error("question {index} of \"{theme}\" ({difficulty}) has invalid points: {points}")]
    InvalidPoints {
        /// Theme the question belongs to.
        theme: String,
        /// Difficulty tier of the question.
        difficulty: Difficulty,
        /// Position of the question within its tier.
        index: usize,
        /// The rejected point value, as written in the document.
        points: f64,
    },

    /// Two themes share the same name.
    #[error("theme already exists: \"{0}\"")]
    DuplicateTheme(String),

    /// Two players share the same name.
    #[error("player already exists: \"{0}\"")]
    DuplicatePlayer(String),
}
