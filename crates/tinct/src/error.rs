//! Error types for style loading and generation.
//!
//! This module provides [`StyleError`], the error type returned by every
//! fallible operation in the crate, and [`ErrorKind`], the closed taxonomy the
//! [`StyleManager`](crate::StyleManager) reports through its last-error
//! accessors.
//!
//! `StyleError` carries paths and underlying sources for diagnostics. Callers
//! that only need to branch on the category use [`StyleError::kind`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Closed set of error categories.
///
/// Every [`StyleError`] maps onto exactly one kind. `NoError` is what the
/// manager reports after a successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorKind {
    /// The last operation succeeded.
    #[default]
    NoError,
    /// Missing, ambiguous or malformed style descriptor, missing required
    /// fields, or missing resource variant declarations.
    StyleDescriptor,
    /// Missing or malformed theme XML, wrong tags, missing name or value.
    ThemeDescriptor,
    /// CSS template file absent, or a malformed template token.
    Template,
    /// An output directory or output file could not be written.
    Export,
    /// A resource variant could not be generated.
    ResourceGeneration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NoError => write!(f, "no error"),
            ErrorKind::StyleDescriptor => write!(f, "style descriptor error"),
            ErrorKind::ThemeDescriptor => write!(f, "theme descriptor error"),
            ErrorKind::Template => write!(f, "template error"),
            ErrorKind::Export => write!(f, "export error"),
            ErrorKind::ResourceGeneration => write!(f, "resource generation error"),
        }
    }
}

/// Error type for all style operations.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The style descriptor could not be found, parsed or validated.
    #[error("style descriptor error{}: {message}", location(.path))]
    StyleDescriptor {
        /// Descriptor file or style directory, when known.
        path: Option<PathBuf>,
        /// What was wrong.
        message: String,
    },

    /// A theme file could not be read or validated.
    #[error("theme descriptor error{}: {message}", location(.path))]
    ThemeDescriptor {
        /// Theme file, when known.
        path: Option<PathBuf>,
        /// What was wrong.
        message: String,
    },

    /// A template could not be processed.
    #[error("template error: {0}")]
    Template(String),

    /// Generated output could not be written.
    #[error("export error: cannot write {}: {source}", .path.display())]
    Export {
        /// The file or directory that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A resource variant could not be generated.
    #[error("resource generation error: {variant}: {} ({source})", .path.display())]
    ResourceGeneration {
        /// Variant name (output subdirectory).
        variant: String,
        /// The file or directory that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl StyleError {
    /// Creates a style descriptor error without a path.
    pub fn descriptor(message: impl Into<String>) -> Self {
        StyleError::StyleDescriptor {
            path: None,
            message: message.into(),
        }
    }

    /// Creates a theme descriptor error for the given file.
    pub fn theme(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        StyleError::ThemeDescriptor {
            path: Some(path.into()),
            message: message.into(),
        }
    }

    /// Creates a template error.
    pub fn template(message: impl Into<String>) -> Self {
        StyleError::Template(message.into())
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StyleError::StyleDescriptor { .. } => ErrorKind::StyleDescriptor,
            StyleError::ThemeDescriptor { .. } => ErrorKind::ThemeDescriptor,
            StyleError::Template(_) => ErrorKind::Template,
            StyleError::Export { .. } => ErrorKind::Export,
            StyleError::ResourceGeneration { .. } => ErrorKind::ResourceGeneration,
        }
    }
}

/// The error state retained by the manager between operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastError {
    /// Error category, `NoError` after a successful operation.
    pub kind: ErrorKind,
    /// Human readable description, empty for `NoError`.
    pub message: String,
}

impl LastError {
    /// Returns true if no error is recorded.
    pub fn is_ok(&self) -> bool {
        self.kind == ErrorKind::NoError
    }
}

impl From<&StyleError> for LastError {
    fn from(err: &StyleError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
