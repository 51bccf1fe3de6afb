use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{kind} file not found under {dir} (looked for {candidates:?})")]
    MissingFile {
        kind: &'static str,
        dir: String,
        candidates: &'static [&'static str],
    },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("link references unknown property id {0:?}")]
    DanglingLink(String),

    #[error(transparent)]
    Spatial(#[from] envsim_spatial::SpatialError),
}

pub type Result<T> = std::result::Result<T, EnvError>;
