//! Error types for property binding
//!
//! Every failure surfaced by resolution or binding is reported through
//! [`Error`]. There is no partial-success mode: the first failing property
//! aborts the whole binding call.

use thiserror::Error;

use crate::types::PropertyType;

/// Binding error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Resolved lookup key is absent from the source
    #[error("No property \"{key}\" found in given properties")]
    MissingProperty { key: String },

    /// Textual value could not be parsed into the declared type
    #[error("Property \"{key}\" could not be converted to {expected} (value is {value}): {reason}")]
    ConversionFailure {
        key: String,
        expected: PropertyType,
        value: String,
        reason: String,
    },

    /// Converted value rejected by its validator
    #[error("Property \"{key}\" value is invalid (value is {value})")]
    InvalidProperty { key: String, value: String },

    /// Contract is not a bindable accessor shape
    #[error("Invalid contract '{contract}': {message}")]
    ContractShape { contract: String, message: String },

    /// Descriptor construction with missing parts
    #[error("Invalid property descriptor: {0}")]
    InvalidDescriptor(String),

    /// Property source file not found
    #[error("Property source not found: {0}")]
    FileNotFound(String),

    /// Property source could not be parsed
    #[error("Failed to parse property source: {0}")]
    SourceParse(String),
}

impl Error {
    /// Create a contract shape error
    pub fn contract_shape(contract: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ContractShape {
            contract: contract.into(),
            message: message.into(),
        }
    }

    /// Lookup key of the offending property, for binding errors
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::MissingProperty { key }
            | Error::ConversionFailure { key, .. }
            | Error::InvalidProperty { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this error came from a single property rather than the contract or source
    pub fn is_property_error(&self) -> bool {
        self.key().is_some()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
