use std::path::PathBuf;

/// Errors raised while parsing answer sets or touching the on-disk store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown question id '{key}'")]
    UnknownQuestion { key: String },

    #[error("answer for '{key}' must be a string or a number")]
    InvalidAnswerValue { key: String },

    #[error("answers must be a JSON object")]
    NotAnObject,

    #[error("diagnostic '{name}' not found")]
    DiagnosticNotFound { name: String },

    #[error("invalid diagnostic name '{name}'")]
    InvalidName { name: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
