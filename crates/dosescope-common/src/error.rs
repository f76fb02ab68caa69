use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoseError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Could not read compound manifest {path}: {reason}")]
    ManifestRead { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for DoseError {
    fn from(e: serde_json::Error) -> Self {
        DoseError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DoseError>;
