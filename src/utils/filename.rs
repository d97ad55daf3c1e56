use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Generate default output filename next to the input: {stem}-countries-{YYMMDD}.csv
pub fn generate_default_output_filename(input: &Path) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");

    let filename = format!("{}-countries-{:02}{:02}{:02}.csv", stem, year, month, day);
    match input.parent() {
        Some(parent) => parent.join(filename),
        None => PathBuf::from(filename),
    }
}
