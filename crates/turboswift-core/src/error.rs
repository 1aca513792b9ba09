//! Error types for the TurboSwift pipeline
//!
//! Parsing and execution failures return `Result<T, Error>`.
//! Turbalance findings are not errors; see [`crate::diagnostics`].

use thiserror::Error;

/// TurboSwift error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A contract-level token did not match what the grammar expects
    #[error("Expected '{expected}' at token {index}, got '{found}'")]
    Syntax {
        index: usize,
        expected: String,
        found: String,
    },

    /// A method body contains a token run that is not a known statement
    #[error("Unrecognized statement in '{method}' at body token {index}: '{token}'")]
    UnrecognizedStatement {
        method: String,
        index: usize,
        token: String,
    },

    /// Integer literal does not fit in an i64
    #[error("Invalid integer literal '{0}'")]
    InvalidInteger(String),

    /// Name could not be resolved on the current object
    #[error("Undefined reference '{0}'")]
    UndefinedReference(String),

    /// A constructor binding resolved to something that cannot be constructed
    #[error("'{0}' is not a callable class")]
    NotCallable(String),

    /// A call target resolved to a plain value instead of an object
    #[error("'{0}' is not an object")]
    NotAnObject(String),

    /// The host object exposes neither a settable property nor a method
    #[error("Method '{method}' not found on host object '{target}'")]
    MethodNotFound { method: String, target: String },

    /// The receiver's contract has no such method
    #[error("Method '{method}' not found in contract '{contract}'")]
    MethodNotFoundInContract { method: String, contract: String },

    /// A method was called on a namespace object
    #[error("No contract for method call '{0}'")]
    NoContract(String),

    /// Interpreted calls nested deeper than the configured limit
    #[error("Call depth limit of {0} exceeded")]
    CallDepthExceeded(usize),

    /// Failure raised by a host bridge adapter
    #[error("Host error: {0}")]
    Host(String),

    /// Writing `print` output failed
    #[error("Failed to write program output: {0}")]
    Output(String),

    /// The configured entry contract is not part of the program
    #[error("Contract {0} not found")]
    MissingEntryContract(String),

    /// The entry contract lacks the configured entry method
    #[error("Function {method} not found in contract {contract}")]
    MissingEntryMethod { contract: String, method: String },
}

impl Error {
    /// Build a syntax error for the token at `index`, rendering end of input as `EOF`
    pub(crate) fn syntax(index: usize, expected: impl Into<String>, found: Option<&str>) -> Self {
        Error::Syntax {
            index,
            expected: expected.into(),
            found: found.unwrap_or("EOF").to_string(),
        }
    }

    /// Whether this error was raised before any statement ran
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::Syntax { .. } | Error::UnrecognizedStatement { .. } | Error::InvalidInteger(_)
        )
    }
}

/// Result type alias for TurboSwift operations
pub type Result<T> = std::result::Result<T, Error>;
