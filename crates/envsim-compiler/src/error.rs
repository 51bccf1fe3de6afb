use thiserror::Error;

/// Errors that can abort compilation. Integrity problems in the *output*
/// (dangling links, unreferenced properties) are not represented here —
/// those are warnings surfaced by `envsim-env`'s `validate_integrity`,
/// never fatal.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("malformed scene: invalid {field}: {message}")]
    MalformedScene { field: String, message: String },

    #[error("failed to read scene file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        CompileError::MalformedScene {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
