//! Validation and Submit Errors
//!
//! Field-level errors are recovered locally and collected in an [`ErrorMap`];
//! only [`SubmitError`] reaches the caller as a failed submission.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Category of a field error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RequiredFieldMissing,
    InvalidFormat,
    Mismatch,
    PolicyViolation,
}

/// A single field failure with its human-readable message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Empty or whitespace-only input
    #[error("{0}")]
    RequiredFieldMissing(String),

    /// Input does not have the expected shape
    #[error("{0}")]
    InvalidFormat(String),

    /// Input differs from the value it must repeat
    #[error("{0}")]
    Mismatch(String),

    /// Well-formed input rejected by a configured rule
    #[error("{0}")]
    PolicyViolation(String),
}

impl FieldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::RequiredFieldMissing(_) => ErrorKind::RequiredFieldMissing,
            FieldError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            FieldError::Mismatch(_) => ErrorKind::Mismatch,
            FieldError::PolicyViolation(_) => ErrorKind::PolicyViolation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FieldError::RequiredFieldMissing(m)
            | FieldError::InvalidFormat(m)
            | FieldError::Mismatch(m)
            | FieldError::PolicyViolation(m) => m,
        }
    }

    /// Same kind, different message
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            FieldError::RequiredFieldMissing(_) => FieldError::RequiredFieldMissing(message),
            FieldError::InvalidFormat(_) => FieldError::InvalidFormat(message),
            FieldError::Mismatch(_) => FieldError::Mismatch(message),
            FieldError::PolicyViolation(_) => FieldError::PolicyViolation(message),
        }
    }
}

/// Failure reported by the external submit collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Submit failed: {0}")]
    ExternalSubmitFailure(String),
}

/// Field name to error mapping; only invalid fields have an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: BTreeMap<String, FieldError>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    pub fn add_error(&mut self, field: impl Into<String>, error: FieldError) {
        self.errors.insert(field.into(), error);
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldError> {
        self.errors.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(FieldError::message)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }
}
