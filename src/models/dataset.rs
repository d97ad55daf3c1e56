use crate::error::{ProcessingError, Result};
use crate::models::Record;
use crate::utils::constants::COUNTRY_COLUMN;
use std::path::PathBuf;

/// An in-memory table loaded from a delimited file.
///
/// Row order is the file order and is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    source: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(source: PathBuf, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source,
            headers,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Fail with `ColumnNotFound` unless `column` is a header.
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| ProcessingError::ColumnNotFound {
                column: column.to_string(),
                path: self.source.clone(),
            })
    }

    /// One pipeline record per row, taken from `column`.
    pub fn records_for_column(&self, column: &str) -> Result<Vec<Record>> {
        let index = self.require_column(column)?;

        Ok(self
            .rows
            .iter()
            .map(|row| Record::from_field(row.get(index).map(String::as_str).unwrap_or("")))
            .collect())
    }

    /// Store each record's country in the `country` column, adding the
    /// column at the end if the table does not have one yet.
    pub fn set_country_column(&mut self, records: &[Record]) -> Result<()> {
        if records.len() != self.rows.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Expected {} country values, got {}",
                self.rows.len(),
                records.len()
            )));
        }

        let index = match self.column_index(COUNTRY_COLUMN) {
            Some(index) => index,
            None => {
                self.headers.push(COUNTRY_COLUMN.to_string());
                self.headers.len() - 1
            }
        };

        let width = self.headers.len();
        for (row, record) in self.rows.iter_mut().zip(records) {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row[index] = record.country_field().to_string();
        }

        Ok(())
    }
}
