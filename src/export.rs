// 💾 Export - cleaned/enriched table → CSV
// Rows in input order, absent values as empty cells; identical input gives identical bytes

use crate::record::{
    format_count, VisaRecord, CONTINENT_COLUMN, COUNTRY_COLUMN, ISSUED_COLUMN, YEAR_COLUMN,
};
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One output row; field names are the CSV header
#[derive(Debug, Serialize)]
struct CleanedRow<'a> {
    year: Option<i32>,
    country: Option<&'a str>,
    #[serde(rename = "number_of_issued_numerical")]
    issued_count: Option<String>,
    continent: Option<&'a str>,
}

impl<'a> From<&'a VisaRecord> for CleanedRow<'a> {
    fn from(record: &'a VisaRecord) -> Self {
        CleanedRow {
            year: record.year,
            country: record.country.as_deref(),
            issued_count: record.issued_count.map(format_count),
            continent: record.continent.as_deref(),
        }
    }
}

/// Header written even for an empty table
pub const CLEANED_HEADER: [&str; 4] = [YEAR_COLUMN, COUNTRY_COLUMN, ISSUED_COLUMN, CONTINENT_COLUMN];

/// Serialize the table as CSV into any writer
pub fn write_records<W: Write>(writer: W, records: &[VisaRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(CLEANED_HEADER)
        .context("Failed to write CSV header")?;
    for record in records {
        wtr.serialize(CleanedRow::from(record))
            .context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Write the cleaned CSV (overwriting) and return the SHA-256 of its bytes
pub fn write_cleaned_csv(path: &Path, records: &[VisaRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;

    std::fs::write(path, &buffer)
        .with_context(|| format!("Failed to write cleaned CSV: {}", path.display()))?;

    let digest = format!("{:x}", Sha256::digest(&buffer));
    info!(
        path = %path.display(),
        rows = records.len(),
        sha256 = %digest,
        "Wrote cleaned CSV"
    );

    Ok(digest)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(records: &[VisaRecord]) -> String {
        let mut buffer = Vec::new();
        write_records(&mut buffer, records).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let records = vec![
            VisaRecord::new(Some(2017), Some("Japan".to_string()), Some(500.0))
                .with_continent(Some("Asia".to_string())),
            VisaRecord::new(Some(2017), Some("total".to_string()), Some(999999.0)),
            VisaRecord::new(None, None, Some(12.5)),
        ];

        assert_eq!(
            to_string(&records),
            "year,country,number_of_issued_numerical,continent\n\
             2017,Japan,500,Asia\n\
             2017,total,999999,\n\
             ,,12.5,\n"
        );
    }

    #[test]
    fn test_quotes_names_with_commas() {
        let records = vec![VisaRecord::new(
            Some(2017),
            Some("Korea, Republic of".to_string()),
            None,
        )];

        assert_eq!(
            to_string(&records),
            "year,country,number_of_issued_numerical,continent\n\
             2017,\"Korea, Republic of\",,\n"
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        assert_eq!(to_string(&[]), "year,country,number_of_issued_numerical,continent\n");
    }

    #[test]
    fn test_digest_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        let records = vec![VisaRecord::new(Some(2017), Some("Japan".to_string()), Some(1.0))];

        let first = write_cleaned_csv(&path, &records).unwrap();
        let first_bytes = std::fs::read(&path).unwrap();
        let second = write_cleaned_csv(&path, &records).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, std::fs::read(&path).unwrap());
        assert_eq!(first.len(), 64);
    }
}
