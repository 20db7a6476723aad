// 📂 Loader - CSV → Vec<VisaRecord>
// Normalizes headers, drops fully-empty rows, projects to year/country/count

use crate::error::LoadError;
use crate::record::{VisaRecord, COUNTRY_COLUMN, ISSUED_COLUMN, YEAR_COLUMN};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters collected while loading (logged, and handed to the run summary)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub empty_rows_dropped: usize,
    /// Non-empty year/count cells that didn't parse and became absent
    pub cells_coerced: usize,
}

/// Normalize a header token: spaces become '_', '/', '.' and ',' are removed
///
/// Examples:
/// - "number of issued numerical" → "number_of_issued_numerical"
/// - "Regional code/name." → "Regional_codename"
pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '/' | '.' | ',' => None,
            other => Some(other),
        })
        .collect()
}

/// Load the visa table from a CSV file with a header row
pub fn load_csv(csv_path: &Path) -> Result<(Vec<VisaRecord>, LoadStats)> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open input CSV: {}", csv_path.display()))?;

    let (records, stats) = load_from_reader(file)
        .with_context(|| format!("Failed to load {}", csv_path.display()))?;

    info!(
        path = %csv_path.display(),
        rows_read = stats.rows_read,
        kept = records.len(),
        dropped = stats.empty_rows_dropped,
        coerced = stats.cells_coerced,
        "Loaded visa records"
    );

    Ok((records, stats))
}

/// Load from any reader (used by load_csv and by tests)
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<VisaRecord>, LoadStats)> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(normalize_column_name)
        .collect();
    debug!(columns = ?headers, "Normalized CSV header");

    let year_idx = column_index(&headers, YEAR_COLUMN)?;
    let country_idx = column_index(&headers, COUNTRY_COLUMN)?;
    let issued_idx = column_index(&headers, ISSUED_COLUMN)?;

    let mut stats = LoadStats::default();
    let mut records = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        // +2 because: 1-indexed + header row
        let row = result.with_context(|| format!("Failed to parse CSV line {}", line_num + 2))?;
        stats.rows_read += 1;

        if is_empty_row(&row) {
            stats.empty_rows_dropped += 1;
            continue;
        }

        let year_cell = row.get(year_idx).unwrap_or("");
        let issued_cell = row.get(issued_idx).unwrap_or("");

        let year = parse_year(year_cell);
        if year.is_none() && !year_cell.trim().is_empty() {
            stats.cells_coerced += 1;
            debug!(line = line_num + 2, value = year_cell, "Unparsable year");
        }

        let issued_count = parse_count(issued_cell);
        if issued_count.is_none() && !issued_cell.trim().is_empty() {
            stats.cells_coerced += 1;
            debug!(line = line_num + 2, value = issued_cell, "Unparsable issued count");
        }

        let country = row
            .get(country_idx)
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string);

        records.push(VisaRecord::new(year, country, issued_count));
    }

    if stats.cells_coerced > 0 {
        warn!(cells = stats.cells_coerced, "Malformed numeric cells loaded as absent");
    }

    Ok((records, stats))
}

fn column_index(headers: &[String], column: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| {
            anyhow::Error::from(LoadError::MissingColumn {
                column,
                available: headers.to_vec(),
            })
        })
}

/// A row is empty when every cell is blank
fn is_empty_row(row: &StringRecord) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Integer year; integral floats ("2017.0") are accepted too
fn parse_year(cell: &str) -> Option<i32> {
    let cell = cell.trim();
    if let Ok(year) = cell.parse::<i32>() {
        return Some(year);
    }

    match cell.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() <= i32::MAX as f64 => Some(value as i32),
        _ => None,
    }
}

fn parse_count(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// TESTS
// ============================================================================
