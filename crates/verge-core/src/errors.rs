//! Error types for Verge.

use thiserror::Error;

/// Unified error type for all Verge operations.
#[derive(Error, Debug)]
pub enum VergeError {
    /// I/O errors (file reading, report writing)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Edge-list parse errors, with the 1-based line number
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Graph construction and validation errors
    #[error("Graph error: {0}")]
    Graph(String),

    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Device cluster errors (provisioning, dispatch, teardown)
    #[error("Cluster error in {context}: {message}")]
    Cluster { context: String, message: String },

    /// Mathematical/numerical errors (NaN weights, invalid scales)
    #[error("Numerical error: {0}")]
    Numerical(String),
}

impl VergeError {
    /// Creates a parse error for a specific input line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        VergeError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Creates a graph construction error.
    pub fn graph(message: impl Into<String>) -> Self {
        VergeError::Graph(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        VergeError::Config(message.into())
    }

    /// Creates a cluster error with context.
    pub fn cluster(context: impl Into<String>, message: impl Into<String>) -> Self {
        VergeError::Cluster {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Creates a numerical error.
    pub fn numerical(message: impl Into<String>) -> Self {
        VergeError::Numerical(message.into())
    }
}

/// Result type alias for Verge operations.
pub type Result<T> = std::result::Result<T, VergeError>;
