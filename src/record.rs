// 📋 Visa Record - One row of the visa issuance table
// Materialized once by the loader, replaced wholesale by each enrichment pass

use serde::Serialize;

/// Column names of the projected table (after header normalization)
pub const YEAR_COLUMN: &str = "year";
pub const COUNTRY_COLUMN: &str = "country";
pub const ISSUED_COLUMN: &str = "number_of_issued_numerical";
pub const CONTINENT_COLUMN: &str = "continent";

// ============================================================================
// VISA RECORD
// ============================================================================

/// VisaRecord - year / country / issued count, plus the continent added by enrichment
///
/// Every field may be absent: malformed numeric cells load as `None`, and the
/// continent stays `None` when the country can't be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisaRecord {
    pub year: Option<i32>,
    pub country: Option<String>,
    pub issued_count: Option<f64>,
    pub continent: Option<String>,
}

impl VisaRecord {
    /// Create a record as it comes out of the loader (no continent yet)
    pub fn new(year: Option<i32>, country: Option<String>, issued_count: Option<f64>) -> Self {
        VisaRecord {
            year,
            country,
            issued_count,
            continent: None,
        }
    }

    /// Replace the country, keeping everything else
    pub fn with_country(self, country: Option<String>) -> Self {
        VisaRecord { country, ..self }
    }

    /// Replace the continent, keeping everything else
    pub fn with_continent(self, continent: Option<String>) -> Self {
        VisaRecord { continent, ..self }
    }

    /// Country as &str (None when absent)
    pub fn country_name(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Format a count the way the cleaned CSV stores it
///
/// Integral values are written without a fractional part ("1234", not "1234.0").
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_replace_only_target_field() {
        let record = VisaRecord::new(Some(2017), Some("Japn".to_string()), Some(500.0));
        let record = record
            .with_country(Some("Japan".to_string()))
            .with_continent(Some("Asia".to_string()));

        assert_eq!(record.year, Some(2017));
        assert_eq!(record.country_name(), Some("Japan"));
        assert_eq!(record.issued_count, Some(500.0));
        assert_eq!(record.continent.as_deref(), Some("Asia"));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1234.0), "1234");
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(12.5), "12.5");
        assert_eq!(format_count(-3.0), "-3");
    }
}
