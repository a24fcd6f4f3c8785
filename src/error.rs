use std::path::PathBuf;

/// Everything that can stop a generation run.
#[derive(thiserror::Error, Debug)]
pub enum GenError {
    /// Bad command-line value or scenario parameter. Raised before any computation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A required input file (the input-deck template) is absent.
    #[error("missing input file: {}", path.display())]
    MissingInput { path: PathBuf },
    /// An output file could not be created or written.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Scenario config or run summary could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
