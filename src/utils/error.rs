// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Workbook could not be read: {0}")]
    Workbook(#[from] calamine::Error), // Automatically convert calamine errors

    #[error("Delimited text could not be read: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input is neither a workbook nor UTF-8 text")]
    Encoding,

    #[error("Workbook contains no worksheet")]
    NoWorksheet,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not find team names row in the first {scanned} rows")]
    TeamRowNotFound { scanned: usize },
}

/// Failure of a single parse call, from raw bytes to a round.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Sheet decoding failed: {0}")]
    Sheet(#[from] SheetError),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Sheet decoding failed: {0}")]
    Sheet(#[from] SheetError),

    #[error("Parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
