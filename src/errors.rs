//! Unified application error type.
//! All modules (core, cli, export, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Input / schema
    // ---------------------------
    #[error("Input file is empty.")]
    EmptyInput,

    #[error("Missing required columns: '{datetime}' or '{name}'")]
    MissingRequiredColumns { datetime: String, name: String },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Schema mismatch at line {line}: expected {expected} fields, found {found}")]
    SchemaMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },

    // ---------------------------
    // Timestamps
    // ---------------------------
    #[error("Invalid date-time at line {line}: '{value}'")]
    InvalidDateTime { line: u64, value: String },

    #[error("Out-of-order timestamp at line {line}: {current} does not follow {previous}")]
    NonMonotonic {
        line: u64,
        previous: String,
        current: String,
    },

    #[error("Invalid number at line {line} in column '{column}': '{value}'")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
