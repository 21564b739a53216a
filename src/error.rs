// Error types shared by the library modules. The interactive layer wraps
// these in `anyhow::Error`; only `PromptError::Interrupted` is allowed to
// end a session.

use reqwest::StatusCode;
use thiserror::Error;

/// Registry lookups that name a chain, module or endpoint we do not know.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown chain '{0}'")]
    UnknownChain(String),

    #[error("no endpoint '{endpoint}' in module '{module}' for chain '{chain}'")]
    NotFound {
        chain: String,
        module: String,
        endpoint: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("missing value for path parameter '{0}'")]
    MissingParameter(String),
}

/// Failures of a single GET against a chain's REST API.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PromptError {
    /// The user cancelled (Ctrl-C) or input ended.
    #[error("interrupted by user")]
    Interrupted,

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a menu answer was rejected. The display text is what the user sees
/// before being asked again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("❌ Please enter a valid number")]
    InvalidNumber,

    #[error("❌ Please enter a number between 1 and {max}")]
    OutOfRange { max: usize },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("field '{field}' is not an integer: {value}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("vote total does not fit in 128 bits")]
    Overflow,

    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
}
