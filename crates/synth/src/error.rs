use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for synthesis operations
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors that stop a synthesis run
#[derive(Error, Debug)]
pub enum SynthError {
    /// No method header found, or a parameter lacks a type and a name
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// A list or tree literal could not be decoded
    #[error("Invalid {kind} literal `{literal}`: {reason}")]
    InvalidLiteral {
        kind: &'static str,
        literal: String,
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The report document could not be read
    #[error("Report error: {0}")]
    Report(String),

    /// The generated artifact could not be persisted
    #[error("Failed to write artifact to {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SynthError {
    /// Create a malformed signature error
    pub fn malformed_signature(msg: impl Into<String>) -> Self {
        Self::MalformedSignature(msg.into())
    }

    /// Create an invalid literal error
    pub fn invalid_literal(
        kind: &'static str,
        literal: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidLiteral {
            kind,
            literal: literal.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a report error
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }
}

/// Conditions recovered locally; the run continues and the caller receives them
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SynthWarning {
    /// A failing row carried no usable actual value and was dropped
    #[error("row {row}: actual value not found, row skipped")]
    MissingActualValue { row: usize },

    /// Parameter type outside the recognized set; token passed through verbatim
    #[error("unhandled parameter type `{type_name}` at position {position}, passing `{token}` through")]
    UnsupportedParameterType {
        position: usize,
        type_name: String,
        token: String,
    },

    /// Return type outside the recognized set; expected value passed through verbatim
    #[error("unhandled return type `{type_name}`, passing expected value through")]
    UnsupportedReturnType { type_name: String },

    /// A token did not have the shape its declared type expects
    #[error("unexpected format for {type_name} parameter at position {position}: `{token}` ({reason})")]
    MalformedArgument {
        position: usize,
        type_name: String,
        token: String,
        reason: String,
    },
}
