/*!
 * Error types for the subcensor application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during subtitle reading and writing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The subtitle file could not be read
    #[error("Failed to read subtitle file {path}: {message}")]
    ReadFailed {
        /// Path of the subtitle file
        path: PathBuf,
        /// Underlying I/O message
        message: String,
    },

    /// A censored subtitle file could not be written
    #[error("Failed to write subtitle file {path}: {message}")]
    WriteFailed {
        /// Path of the output file
        path: PathBuf,
        /// Underlying I/O message
        message: String,
    },
}

/// Errors that can occur while building profanity filters
#[derive(Error, Debug)]
pub enum FilterError {
    /// A regex pattern failed to compile
    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern as supplied
        pattern: String,
        /// Compiler diagnostic
        message: String,
    },

    /// A regex filter configuration file could not be loaded
    #[error("Failed to load regex configuration: {0}")]
    ConfigLoad(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from filter construction
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
