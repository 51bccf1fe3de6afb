use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RosterError>;
