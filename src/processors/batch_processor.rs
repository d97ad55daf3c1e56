use crate::error::{ProcessingError, Result};
use crate::geocoding::{RateLimitedLookupClient, ReverseGeocoder};
use crate::models::Record;
use crate::utils::constants::DEFAULT_BATCH_SIZE;
use crate::utils::coordinates::normalize_coordinate;
use crate::utils::progress::ProgressReporter;
use std::fmt;
use tracing::{debug, info, warn};

/// Counters for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub total_rows: usize,
    pub batches: usize,
    pub lookups: usize,
    pub found: usize,
    pub not_found: usize,
    pub skipped: usize,
}

impl fmt::Display for ProcessingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows processed: {} in {} batches", self.total_rows, self.batches)?;
        writeln!(f, "Lookups issued: {}", self.lookups)?;
        writeln!(f, "  Country found: {}", self.found)?;
        writeln!(f, "  No country:    {}", self.not_found)?;
        write!(f, "Rows without a location: {}", self.skipped)
    }
}

/// Drives country lookups over a dataset in fixed-size, ordered batches.
pub struct BatchProcessor<'a, G> {
    client: &'a RateLimitedLookupClient<G>,
    batch_size: usize,
}

impl<'a, G: ReverseGeocoder> BatchProcessor<'a, G> {
    pub fn new(client: &'a RateLimitedLookupClient<G>) -> Self {
        Self {
            client,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Resolve the country of every record that has a location.
    ///
    /// Batches run strictly in order. A geocoding failure stops the run at
    /// the failing record: earlier records keep their new values, later ones
    /// are left untouched.
    pub async fn process(
        &self,
        records: &mut [Record],
        progress: Option<&ProgressReporter>,
    ) -> Result<ProcessingSummary> {
        if self.batch_size == 0 {
            return Err(ProcessingError::Config(
                "Batch size must be at least 1".to_string(),
            ));
        }

        let mut summary = ProcessingSummary {
            total_rows: records.len(),
            ..Default::default()
        };

        for (batch_index, batch) in records.chunks_mut(self.batch_size).enumerate() {
            let start = batch_index * self.batch_size;
            let end = start + batch.len();
            summary.batches += 1;

            announce(
                progress,
                &format!("Processing rows {} to {}...", start + 1, end),
            );

            for (offset, record) in batch.iter_mut().enumerate() {
                let Some(location) = record.location() else {
                    summary.skipped += 1;
                    if let Some(p) = progress {
                        p.increment(1);
                    }
                    continue;
                };

                let token = normalize_coordinate(location);
                summary.lookups += 1;

                let result = self
                    .client
                    .lookup_country(Some(token.as_ref()))
                    .await
                    .map_err(|e| {
                        warn!("Lookup failed at row {}: {}", start + offset + 1, e);
                        ProcessingError::Geocoding(e)
                    })?;

                if result.is_found() {
                    summary.found += 1;
                } else {
                    summary.not_found += 1;
                }
                record.country = Some(result.into_country());

                if let Some(p) = progress {
                    p.increment(1);
                }
            }
        }

        announce(
            progress,
            &format!(
                "Resolved {} of {} lookups ({} rows without a location)",
                summary.found, summary.lookups, summary.skipped
            ),
        );

        Ok(summary)
    }
}

/// Log lines written straight to stderr would tear a visible bar, so they go
/// through the bar while it is drawn.
fn announce(progress: Option<&ProgressReporter>, message: &str) {
    match progress.filter(|p| !p.is_silent()) {
        Some(p) => {
            debug!("{}", message);
            p.println(message);
            p.set_message(message);
        }
        None => info!("{}", message),
    }
}
