use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

pub struct DatasetReader {
    delimiter: u8,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load a delimited file with a header row.
    pub fn read(&self, path: &Path) -> Result<Dataset> {
        if !path.exists() {
            return Err(ProcessingError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes, path);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "No header row in '{}'",
                path.display()
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(
            "Loaded {} rows with {} columns from {}",
            rows.len(),
            headers.len(),
            path.display()
        );

        Ok(Dataset::new(path.to_path_buf(), headers, rows))
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode file bytes: honour a BOM, else UTF-8, else fall back to Windows-1252.
fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        if had_errors {
            warn!(
                "Invalid {} sequences in '{}' were replaced",
                encoding.name(),
                path.display()
            );
        }
        return text;
    }

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return text;
    }

    warn!(
        "'{}' is not valid UTF-8, decoding as {}",
        path.display(),
        WINDOWS_1252.name()
    );
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}
