//! # Error Module
//!
//! Every failure the resolver can report is a variant of [`SecurityError`].
//! A fresh value is built for each occurrence and carries the path, method or
//! token that caused it. [`SecurityError::kind`] collapses the variants into the
//! four [`ErrorKind`]s callers are expected to branch on:
//!
//! | Kind | Variants | Caller policy |
//! |------|----------|---------------|
//! | [`ErrorKind::MissingArgument`] | `SchemaNotProvided`, `PathNotProvided`, `OperationNotProvided` | programmer error, propagate |
//! | [`ErrorKind::InvalidArgumentType`] | `SchemaNotObject`, `PathNotString`, `InvalidMethod` | programmer error, propagate |
//! | [`ErrorKind::StructuralAbsence`] | `NoPathInSchema`, `NoComponentsFound`, `NoSecuritySchemesFound` | document cannot answer the question |
//! | [`ErrorKind::NotFound`] | `PathNotFound`, `OperationNotFound` | benign "no answer" |
//!
//! The public boundary ([`crate::get_security`]) turns `NotFound` into `Ok(None)`.

use thiserror::Error;

/// Coarse classification of a [`SecurityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was not supplied.
    MissingArgument,
    /// An argument was supplied with the wrong shape.
    InvalidArgumentType,
    /// The document lacks a substructure the resolution needs.
    StructuralAbsence,
    /// The requested path or method is not declared.
    NotFound,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::MissingArgument => "MissingArgument",
            ErrorKind::InvalidArgumentType => "InvalidArgumentType",
            ErrorKind::StructuralAbsence => "StructuralAbsence",
            ErrorKind::NotFound => "NotFound",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised while resolving operation security.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("schema is not provided")]
    SchemaNotProvided,

    #[error("path is not provided")]
    PathNotProvided,

    #[error("operation is not provided")]
    OperationNotProvided,

    #[error("schema must be an object")]
    SchemaNotObject,

    #[error("path must be a string")]
    PathNotString,

    /// The method token is not one of the eight HTTP verbs.
    #[error(
        "operation must be a string with value 'get', 'put', 'post', 'delete', 'head', 'options', 'patch' or 'trace' (got '{0}')"
    )]
    InvalidMethod(String),

    #[error("there is no path in the schema")]
    NoPathInSchema,

    #[error("schema doesn't contain the path '{0}'")]
    PathNotFound(String),

    #[error("path '{path}' doesn't contain the operation '{method}'")]
    OperationNotFound {
        /// Path key that was found
        path: String,
        /// Lowercase verb that was missing on it
        method: String,
    },

    #[error("no components field is found in the schema")]
    NoComponentsFound,

    #[error("no security schemes field is found in the components field")]
    NoSecuritySchemesFound,
}

impl SecurityError {
    /// Classify this error into one of the four [`ErrorKind`]s.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SecurityError::SchemaNotProvided
            | SecurityError::PathNotProvided
            | SecurityError::OperationNotProvided => ErrorKind::MissingArgument,
            SecurityError::SchemaNotObject
            | SecurityError::PathNotString
            | SecurityError::InvalidMethod(_) => ErrorKind::InvalidArgumentType,
            SecurityError::NoPathInSchema
            | SecurityError::NoComponentsFound
            | SecurityError::NoSecuritySchemesFound => ErrorKind::StructuralAbsence,
            SecurityError::PathNotFound(_) | SecurityError::OperationNotFound { .. } => {
                ErrorKind::NotFound
            }
        }
    }

    /// `true` for the benign "not declared" outcomes.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result alias used across the resolver.
pub type Result<T> = std::result::Result<T, SecurityError>;
