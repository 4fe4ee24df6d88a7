use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing schedule files. Layout itself never fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schedule JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
