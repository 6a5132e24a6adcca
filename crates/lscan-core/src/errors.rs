//! Structured error types shared across lscan crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`LscanError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (modulus, index, bounds, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the lscan engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LscanError {
    /// The modulus does not define a character group (q < 1).
    #[error("invalid modulus: {0}")]
    InvalidModulus(ErrorInfo),
    /// The character index lies outside `[0, phi(q))`.
    #[error("invalid character index: {0}")]
    InvalidCharacterIndex(ErrorInfo),
    /// Height bounds, step or sample counts are malformed.
    #[error("invalid range: {0}")]
    InvalidRange(ErrorInfo),
    /// The evaluation backend failed for a specific point.
    #[error("evaluation error: {0}")]
    Evaluation(ErrorInfo),
    /// Worker pool construction or scheduling failures.
    #[error("dispatch error: {0}")]
    Dispatch(ErrorInfo),
    /// Configuration loading and validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LscanError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LscanError::InvalidModulus(info)
            | LscanError::InvalidCharacterIndex(info)
            | LscanError::InvalidRange(info)
            | LscanError::Evaluation(info)
            | LscanError::Dispatch(info)
            | LscanError::Config(info)
            | LscanError::Serde(info) => info,
        }
    }

    /// Returns the stable family label used when the error is serialized.
    pub fn family(&self) -> &'static str {
        match self {
            LscanError::InvalidModulus(_) => "InvalidModulus",
            LscanError::InvalidCharacterIndex(_) => "InvalidCharacterIndex",
            LscanError::InvalidRange(_) => "InvalidRange",
            LscanError::Evaluation(_) => "Evaluation",
            LscanError::Dispatch(_) => "Dispatch",
            LscanError::Config(_) => "Config",
            LscanError::Serde(_) => "Serde",
        }
    }

    /// Builds the error raised for a modulus below one.
    pub fn invalid_modulus(modulus: u64) -> Self {
        LscanError::InvalidModulus(
            ErrorInfo::new("modulus_lt_one", "modulus must be at least 1")
                .with_context("modulus", modulus),
        )
    }

    /// Builds the error raised for a character index outside the group.
    pub fn invalid_character_index(modulus: u64, index: u64, group_size: u64) -> Self {
        LscanError::InvalidCharacterIndex(
            ErrorInfo::new(
                "character_index_out_of_range",
                "character index exceeds the size of the character group",
            )
            .with_context("modulus", modulus)
            .with_context("index", index)
            .with_context("group_size", group_size)
            .with_hint("valid indices are 0..phi(q)"),
        )
    }
}
