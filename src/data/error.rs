use thiserror::Error;

/// Failures the data layer reports by kind. I/O and parse errors from the
/// underlying readers travel as `anyhow` context chains instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Missing necessary columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Row {row}: cannot parse departure_time '{value}'")]
    InvalidDepartureTime { row: usize, value: String },
}
