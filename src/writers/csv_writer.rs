use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind};
use std::path::Path;
use tracing::info;

pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Fail with `OutputAlreadyExists` if something is already at `path`.
    pub fn ensure_absent(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(ProcessingError::OutputAlreadyExists {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Write headers and rows to a new file; never replaces an existing one.
    pub fn write_dataset(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => ProcessingError::OutputAlreadyExists {
                    path: path.to_path_buf(),
                },
                _ => ProcessingError::Io(e),
            })?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(BufWriter::new(file));

        writer.write_record(dataset.headers())?;
        for row in dataset.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;

        info!("Wrote {} rows to {}", dataset.len(), path.display());
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
