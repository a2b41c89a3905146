//! Error types for uidl
//!
//! All modules use `UidlResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for uidl operations
pub type UidlResult<T> = Result<T, UidlError>;

/// All errors that can occur in uidl
#[derive(Error, Debug)]
pub enum UidlError {
    // Schema errors
    #[error("{file}:{line}:{column}: {message}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Duplicate type declaration: {name} (first declared in {first}, again in {second})")]
    DuplicateType {
        name: String,
        first: String,
        second: String,
    },

    #[error("Unknown type {name} referenced by {referenced_by}")]
    UnknownType { name: String, referenced_by: String },

    #[error("{owner} cannot {relation} {target}: {reason}")]
    InvalidSupertype {
        owner: String,
        relation: &'static str,
        target: String,
        reason: String,
    },

    #[error("Inheritance cycle detected at {0}")]
    InheritanceCycle(String),

    #[error("Duplicate member {member} in {owner}")]
    DuplicateMember { owner: String, member: String },

    #[error("Invalid default for {owner}.{property}: {reason}")]
    InvalidDefault {
        owner: String,
        property: String,
        reason: String,
    },

    #[error("Invalid package name '{0}'")]
    InvalidPackage(String),

    #[error("Reference type *{name} used by {referenced_by} is not referenceable")]
    NotReferenceable { name: String, referenced_by: String },

    #[error("No schema files (*.{extension}) found in {path}")]
    NoSchemaFiles { path: PathBuf, extension: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl UidlError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error at a source position
    pub fn parse(
        file: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Check if the error comes from the schema sources rather than the environment
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. }
                | Self::DuplicateType { .. }
                | Self::UnknownType { .. }
                | Self::InvalidSupertype { .. }
                | Self::InheritanceCycle(_)
                | Self::DuplicateMember { .. }
                | Self::NotReferenceable { .. }
                | Self::InvalidDefault { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoSchemaFiles { .. } => {
                Some("Check the source directory or set generator.extension in uidl.toml")
            }
            Self::NotReferenceable { .. } => {
                Some("Mark the class (or one of its ancestors) as referenceable")
            }
            Self::InvalidPackage(_) => {
                Some("Use dot-separated identifiers, e.g. --package org.example.dto")
            }
            Self::ConfigInvalid { .. } => Some("Run: uidl config init --force"),
            Self::InheritanceCycle(_) => Some("A class must not extend itself, directly or indirectly"),
            _ => None,
        }
    }
}
