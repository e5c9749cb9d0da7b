use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

/// Every way an export can stop early. All failures are fatal.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Wrong arguments")]
    WrongArguments,

    /// `--help` or `--version` output; not a failure
    #[error("{0}")]
    DisplayInfo(clap::Error),

    #[error("Error creating HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Error creating file {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error making GET request: {0}")]
    Request(#[source] reqwest::Error),

    #[error(
        "Failed request: {} {}",
        .0.as_u16(),
        .0.canonical_reason().unwrap_or("Unknown Status")
    )]
    Status(http::StatusCode),

    #[error("Error decoding JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Error writing to file: {0}")]
    Write(#[source] std::io::Error),
}
