//! Error types for asm-convert
//!
//! Defines all error types used throughout the library.

use crate::core::locus::Locus;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for asm-convert operations
#[derive(Debug, Error)]
pub enum AsmConvertError {
    /// Input file errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Remote mapping service errors
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Report conversion errors
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Errors raised while opening or reading the input table
#[derive(Debug, Error)]
pub enum InputError {
    /// Input file missing or unreadable
    #[error("File cannot be opened: {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading lines
    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors that can occur while parsing a single input row
///
/// Never fatal: the driver reports and skips the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocusParseError {
    /// A data row passed the blank-line filter but lacks the end column
    #[error("Malformed row at line {line}: expected 3 columns, found {columns}: '{content}'")]
    MalformedRow {
        line: usize,
        columns: usize,
        content: String,
    },
}

/// Failures talking to the remote mapping service
///
/// Never fatal: the classifier folds every variant into a failed mapping.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Network or client-side failure
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Non-success HTTP status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body was not the expected mapping document
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Errors that can occur while producing the report
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The formatter was handed a locus the cache never resolved
    #[error("No mapping result cached for {0}")]
    Unresolved(Locus),

    /// Output write error
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type alias for asm-convert operations
pub type Result<T> = std::result::Result<T, AsmConvertError>;

/// Result type alias for input operations
pub type InputResult<T> = std::result::Result<T, InputError>;

/// Result type alias for mapping service calls
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Result type alias for conversion operations
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;
