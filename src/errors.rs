// Error types for trackside

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum TracksideError {
    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Setup storage errors
    #[snafu(display("Setup storage error: {reason}"))]
    SetupStorageError { reason: String },
    #[snafu(display("Error serializing setup {name}"))]
    SetupSerializeError {
        name: String,
        source: serde_json::Error,
    },
    #[snafu(display("Setup not found: {name}"))]
    SetupNotFound { name: String },
    #[snafu(display("File operation failed: {operation} - {reason}"))]
    FileOperationError { operation: String, reason: String },

    // Input documents handed to the CLI
    #[snafu(display("Error reading input file {path}"))]
    InputReadError { path: String, source: io::Error },
    #[snafu(display("Error parsing input file {path}"))]
    InputParseError {
        path: String,
        source: serde_json::Error,
    },

    // Batch diagnostics
    #[snafu(display("Error reading diagnostic requests"))]
    BatchReadError { source: io::Error },
    #[snafu(display("Error serializing diagnostic report"))]
    ReportSerializeError { source: serde_json::Error },
    #[snafu(display("Error writing diagnostic reports"))]
    WriterError { source: io::Error },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
}
