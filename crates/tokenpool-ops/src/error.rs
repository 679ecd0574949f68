//! Error types for the transaction assembly pipeline.

use std::path::PathBuf;

use alloy_primitives::hex::FromHexError;

use crate::FieldPath;

/// Why a hex value could not be read as an address or salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The value does not start with `0x`.
    #[error("missing 0x prefix")]
    MissingPrefix,
    /// The value decodes to the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    Length {
        /// Required byte length
        expected: usize,
        /// Byte length of the supplied value
        actual: usize,
    },
    /// The value has an odd number of hex digits.
    #[error("odd number of hex digits ({digits})")]
    OddLength {
        /// Number of hex digits after the prefix
        digits: usize,
    },
    /// The value contains non-hex characters.
    #[error("contains non-hex characters")]
    NonHex,
}

/// The constraint a rejected field failed to satisfy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    /// A required field is absent, null, or (for placeholders) empty.
    #[error("missing required field")]
    Missing,
    /// The JSON type of the field is wrong.
    #[error("expected {expected}, found {found}")]
    WrongType {
        /// Expected JSON type
        expected: &'static str,
        /// Actual JSON type
        found: &'static str,
    },
    /// Not a `0x`-prefixed 20-byte address.
    #[error("expected a 0x-prefixed 20-byte address: {0}")]
    Address(FormatError),
    /// Not a `0x`-prefixed 32-byte salt.
    #[error("expected a 0x-prefixed 32-byte salt: {0}")]
    Salt(FormatError),
    /// A decimal string could not be parsed.
    #[error("`{0}` is not a decimal integer string")]
    NotDecimal(String),
    /// A number lies outside its permitted range.
    #[error("`{value}` is out of range: {constraint}")]
    OutOfRange {
        /// Offending value as supplied
        value: String,
        /// Human readable constraint, e.g. `0..=18`
        constraint: String,
    },
    /// A string is not one of the accepted enum values.
    #[error("`{value}` is not one of {allowed}")]
    UnknownVariant {
        /// Offending value as supplied
        value: String,
        /// Accepted values
        allowed: &'static str,
    },
    /// Any other constraint violation.
    #[error("{0}")]
    Invalid(String),
}

/// A structured validation failure naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid `{path}`: {kind}")]
pub struct ValidationError {
    /// Path of the offending field inside the input document
    pub path: FieldPath,
    /// The failed constraint
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a new validation error at `path`.
    pub fn new(path: FieldPath, kind: ValidationErrorKind) -> Self {
        Self { path, kind }
    }
}

/// Result type for input validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Which input of an address prediction was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AddressRole {
    /// The contract performing the deployment
    #[display("deployer")]
    Deployer,
    /// The account calling the deployer
    #[display("sender")]
    Sender,
}

/// Address or salt rejected at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The deployer or sender address is malformed.
    #[error("invalid {role} address `{value}`: {reason}")]
    InvalidAddress {
        /// Which address was rejected
        role: AddressRole,
        /// The supplied value
        value: String,
        /// Why it was rejected
        reason: FormatError,
    },
    /// The salt is malformed.
    #[error("invalid salt `{value}`: {reason}")]
    InvalidSalt {
        /// The supplied value
        value: String,
        /// Why it was rejected
        reason: FormatError,
    },
}

/// Failure to encode call data or constructor arguments.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// An embedded interface descriptor failed to parse.
    #[error("malformed interface descriptor for {contract}: {source}")]
    Descriptor {
        /// Contract whose descriptor is malformed
        contract: &'static str,
        /// Parse failure
        source: serde_json::Error,
    },
    /// The function is not part of the interface.
    #[error("function `{function}` not found in {contract} interface")]
    UnknownFunction {
        /// Interface name
        contract: &'static str,
        /// Requested function
        function: String,
    },
    /// The interface has no constructor.
    #[error("{contract} interface has no constructor")]
    MissingConstructor {
        /// Interface name
        contract: &'static str,
    },
    /// Wrong number of arguments for the function.
    #[error("{contract}.{function} expects {expected} arguments, {given} given")]
    ArgumentCount {
        /// Interface name
        contract: &'static str,
        /// Function name, or `constructor`
        function: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        given: usize,
    },
    /// An argument does not match its declared type.
    #[error("{contract}.{function} argument mismatch: {source}")]
    ArgumentType {
        /// Interface name
        contract: &'static str,
        /// Function name, or `constructor`
        function: String,
        /// ABI type check failure
        source: alloy_dyn_abi::Error,
    },
}

/// Violation of a batch construction invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// Transactions and method names do not line up.
    #[error("batch has {transactions} transactions but {function_names} function names")]
    LengthMismatch {
        /// Number of supplied transactions
        transactions: usize,
        /// Number of supplied function names
        function_names: usize,
    },
    /// A batch must contain at least one transaction.
    #[error("batch has no transactions")]
    Empty,
}

/// Failure to load contract bytecode.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// No artifact directory configured and no bytecode preloaded.
    #[error("no bytecode available for {0}")]
    Unavailable(&'static str),
    /// The artifact file could not be read.
    #[error("failed to read artifact '{}': {source}", path.display())]
    Read {
        /// Artifact file path
        path: PathBuf,
        /// I/O failure
        source: std::io::Error,
    },
    /// The artifact file is not JSON.
    #[error("failed to parse artifact '{}': {source}", path.display())]
    Parse {
        /// Artifact file path
        path: PathBuf,
        /// JSON failure
        source: serde_json::Error,
    },
    /// The artifact has no bytecode entry.
    #[error("artifact '{}' has no bytecode", path.display())]
    MissingBytecode {
        /// Artifact file path
        path: PathBuf,
    },
    /// The bytecode entry is not valid hex.
    #[error("artifact '{}' has malformed bytecode: {source}", path.display())]
    InvalidBytecode {
        /// Artifact file path
        path: PathBuf,
        /// Hex decoding failure
        source: FromHexError,
    },
}

/// Stage of a deployment at which assembly failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DeployStage {
    /// Input validation
    #[display("validate")]
    Validate,
    /// Token init code and transaction
    #[display("encode token deployment")]
    EncodeToken,
    /// Address prediction, pool init code and transaction
    #[display("encode pool deployment")]
    EncodePool,
}

/// Failure during deployment assembly, tagged with the failing stage.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct DeployError {
    /// Stage that failed
    pub stage: DeployStage,
    /// Underlying failure
    #[source]
    pub source: Box<Error>,
}

impl DeployError {
    /// Wraps `source` as a failure of `stage`.
    pub fn new(stage: DeployStage, source: impl Into<Error>) -> Self {
        Self { stage, source: Box::new(source.into()) }
    }
}

/// Top level error for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Address or salt rejected at the point of use
    #[error(transparent)]
    Address(#[from] AddressError),
    /// ABI encoding failure
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// Batch construction invariant violated
    #[error(transparent)]
    Batch(#[from] BatchError),
    /// Bytecode could not be loaded
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    /// Deployment assembly failure
    #[error(transparent)]
    Deploy(#[from] DeployError),
}

/// Result type for the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
