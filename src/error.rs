//! Error types.

use thiserror::Error;

use crate::types::{Field, RecordId};

/// The initial load failed. Never retried locally.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {0}")]
    Status(u16),
    /// The body was not a JSON array of records.
    #[error("invalid records payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A required editable field was empty or malformed at commit time.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn required(field: Field, title: &str) -> Self {
        Self {
            field,
            message: format!("Please input {title}!"),
        }
    }

    pub fn not_a_number(field: Field, title: &str) -> Self {
        Self {
            field,
            message: format!("{title} must be a number"),
        }
    }
}

/// Every field-level failure of one save attempt.
#[derive(Debug, Clone, Default, Error, PartialEq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The failure reported against `field`, if any.
    pub fn for_field(&self, field: Field) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A command could not be carried out.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("record {0} is not being edited")]
    NotEditing(RecordId),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidPageSize { var: &'static str, value: String },
    #[error("{var} must be one of alias-edit, remove; got {value:?}")]
    InvalidDeleteMode { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
