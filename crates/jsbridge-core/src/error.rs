use std::io::Error as IoError;

use thiserror::Error;

/// Errors raised while bridging values into and out of the script engine.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// An object-only operation was applied to a primitive value.
    #[error("{operation} requires an object, found {found}")]
    NotAnObject {
        /// Operation that was attempted
        operation: &'static str,
        /// `typeof` of the receiver
        found: &'static str,
    },

    /// The engine refused to define a property.
    #[error("Property '{name}' was rejected: {reason}")]
    PropertyRejected {
        /// Property name
        name: String,
        /// Engine-provided reason
        reason: String,
    },

    /// A value could not be converted between native and script form.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Script evaluation threw or hit a runtime limit.
    #[error("JavaScript error: {0}")]
    Script(String),

    /// Evaluation did not finish within the configured time.
    #[error("Execution timed out after {0} ms")]
    Timeout(u64),

    /// Configuration could not be read, parsed or serialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// The blocking evaluation task could not be joined.
    #[error("Task join failed: {0}")]
    Join(String),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
