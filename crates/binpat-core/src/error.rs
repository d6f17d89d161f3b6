//! Error types for binary pattern generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building domains, encoding or decoding patterns.
#[derive(Debug, Error)]
pub enum BinpatError {
    // === Dataset Shape Errors ===
    /// A record's pattern length differs from the length fixed by the first record.
    #[error(
        "pattern {line} length ({actual}) is different from previous patterns length ({expected})"
    )]
    PatternLengthMismatch {
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// The label column does not exist for this record.
    #[error("record {line} has {fields} field(s), too few to extract a label")]
    MissingLabel { line: u64, fields: usize },

    // === File System Errors ===
    /// Failed to open the input dataset.
    #[error("failed to open input {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output file.
    #[error("failed to create output {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a line from the input.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// Failed to write encoded output.
    #[error("failed to write output: {source}")]
    Write {
        #[from]
        source: std::io::Error,
    },

    /// Failed to write an encoded record.
    #[error("failed to write record: {source}")]
    WriteRecord {
        #[from]
        source: csv::Error,
    },

    // === Configuration Errors ===
    /// Delimiter or comment marker is not a single byte.
    #[error("'{value}' is not a single-byte delimiter")]
    InvalidDelimiter { value: String },

    // === Decoding Errors ===
    /// Encoded pattern has the wrong number of bits.
    #[error("encoded pattern has {actual} bits, expected {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    /// A column block has more than one bit set.
    #[error("column {column} has {set} bits set, expected at most one")]
    NotOneHot { column: usize, set: usize },

    /// A loaded domain lists the same value twice.
    #[error("domain lists value '{value}' more than once")]
    DuplicateValue { value: String },

    /// A bit token is neither `0` nor `1`.
    #[error("invalid bit '{value}' at position {position}")]
    InvalidBit { position: usize, value: String },

    // === Export Errors ===
    /// Failed to serialize domains.
    #[error("failed to serialize domains: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type for binary pattern operations.
pub type Result<T> = std::result::Result<T, BinpatError>;
