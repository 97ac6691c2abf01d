use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TrialMatchError {
    #[error("{entity} not found: {id}\n\n{suggestion}")]
    NotFound {
        entity: String,
        id: String,
        suggestion: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}
