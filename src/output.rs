use std::path::Path;
use tokio::{
    fs::{File, OpenOptions},
    io::BufWriter,
};

use crate::error::{ExportError, Result};

/// Name of the file every export is written to, relative to the working directory
pub const RESULT_FILE: &str = "result";

/// Represents a type that can be used as an output writer
pub type OutputWriter = BufWriter<File>;

/// Create the output file, truncating anything already there
pub async fn create_output_writer(path: &Path) -> Result<OutputWriter> {
    log::debug!("Using file for output: {}", path.display());

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|source| ExportError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("Output file opened successfully");
    Ok(BufWriter::new(file))
}
