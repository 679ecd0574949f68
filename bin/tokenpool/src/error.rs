use tokenpool_ops::{AddressError, ArtifactError, DeployError, EncodingError, ValidationError};

/// Error types for the tokenpool CLI
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to load an input file
    #[error("Failed to load input file '{file}': {source}")]
    InputLoad {
        /// The file path that failed to load
        file: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse JSON content
    #[error("Failed to parse JSON from '{file}': {source}")]
    JsonParse {
        /// The file path where JSON parsing failed
        file: String,
        /// The underlying JSON parsing error
        source: serde_json::Error,
    },

    /// Failed to serialize output
    #[error("Failed to serialize output: {0}")]
    JsonSerialize(serde_json::Error),

    /// Failed to write an output file
    #[error("Failed to write output file '{file}': {source}")]
    OutputWrite {
        /// The file path that failed to write
        file: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Batch metadata flag required for `safe-json` output is absent
    #[error("--{0} is required for safe-json output")]
    MissingMetadata(&'static str),

    /// Invalid command line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed address or salt
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Contract bytecode unavailable
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// ABI encoding failure
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Deployment assembly failure
    #[error(transparent)]
    Deploy(#[from] DeployError),

    /// Any other failure of the transaction pipeline
    #[error(transparent)]
    Ops(#[from] tokenpool_ops::Error),
}

/// Result type for the tokenpool CLI
pub type Result<T> = std::result::Result<T, Error>;
