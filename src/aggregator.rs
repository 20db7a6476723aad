// 📊 Aggregator - three read-only grouping queries over the enriched table
//
// Sums follow SQL SUM semantics: absent values are skipped, and a group whose
// values are all absent sums to None.

use crate::record::VisaRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Literal rows in the source data that hold aggregates, not countries
pub const SENTINEL_COUNTRIES: [&str; 2] = ["total", "others"];

pub fn is_sentinel(country: &str) -> bool {
    SENTINEL_COUNTRIES.contains(&country)
}

// ============================================================================
// RESULT ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentYearTotal {
    pub year: Option<i32>,
    pub continent: String,
    pub visa_issued: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryTotal {
    pub country: String,
    pub visa_issued: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryYearTotal {
    pub year: Option<i32>,
    pub country: String,
    pub visa_issued: Option<f64>,
}

/// Add a value into an SQL-style running sum
fn accumulate(sum: &mut Option<f64>, value: Option<f64>) {
    if let Some(v) = value {
        *sum = Some(sum.unwrap_or(0.0) + v);
    }
}

/// Records with a non-sentinel country, paired with that country
fn country_rows<'a>(
    records: &'a [VisaRecord],
) -> impl Iterator<Item = (&'a VisaRecord, &'a str)> {
    records.iter().filter_map(|r| match r.country_name() {
        Some(country) if !is_sentinel(country) => Some((r, country)),
        _ => None,
    })
}

// ============================================================================
// QUERIES
// ============================================================================

/// a. Sum per (year, continent), rows without a continent excluded
///
/// Ordered by year (absent first), then continent.
pub fn continent_year_totals(records: &[VisaRecord]) -> Vec<ContinentYearTotal> {
    let mut groups: BTreeMap<(Option<i32>, &str), Option<f64>> = BTreeMap::new();

    for record in records {
        if let Some(continent) = record.continent.as_deref() {
            let sum = groups.entry((record.year, continent)).or_insert(None);
            accumulate(sum, record.issued_count);
        }
    }

    groups
        .into_iter()
        .map(|((year, continent), visa_issued)| ContinentYearTotal {
            year,
            continent: continent.to_string(),
            visa_issued,
        })
        .collect()
}

/// b. Top countries for one year, sentinels and absent countries excluded
///
/// Sorted by sum descending (absent sums last, ties by country name), then truncated.
pub fn top_countries(records: &[VisaRecord], year: i32, limit: usize) -> Vec<CountryTotal> {
    let mut groups: BTreeMap<&str, Option<f64>> = BTreeMap::new();

    for (record, country) in country_rows(records) {
        if record.year == Some(year) {
            let sum = groups.entry(country).or_insert(None);
            accumulate(sum, record.issued_count);
        }
    }

    let mut totals: Vec<CountryTotal> = groups
        .into_iter()
        .map(|(country, visa_issued)| CountryTotal {
            country: country.to_string(),
            visa_issued,
        })
        .collect();

    // Stable sort: equal sums keep the alphabetical order from the BTreeMap
    totals.sort_by(|a, b| descending_nulls_last(a.visa_issued, b.visa_issued));
    totals.truncate(limit);
    totals
}

/// c. Sum per (year, country), sentinels and absent countries excluded
///
/// Ordered by year ascending (absent first), then country.
pub fn country_year_totals(records: &[VisaRecord]) -> Vec<CountryYearTotal> {
    let mut groups: BTreeMap<(Option<i32>, &str), Option<f64>> = BTreeMap::new();

    for (record, country) in country_rows(records) {
        let sum = groups.entry((record.year, country)).or_insert(None);
        accumulate(sum, record.issued_count);
    }

    groups
        .into_iter()
        .map(|((year, country), visa_issued)| CountryYearTotal {
            year,
            country: country.to_string(),
            visa_issued,
        })
        .collect()
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(
        year: i32,
        country: &str,
        issued: f64,
        continent: Option<&str>,
    ) -> VisaRecord {
        VisaRecord::new(Some(year), Some(country.to_string()), Some(issued))
            .with_continent(continent.map(str::to_string))
    }

    fn sample_records() -> Vec<VisaRecord> {
        vec![
            create_test_record(2016, "Japan", 100.0, Some("Asia")),
            create_test_record(2016, "China", 300.0, Some("Asia")),
            create_test_record(2016, "France", 50.0, Some("Europe")),
            create_test_record(2017, "Japan", 500.0, Some("Asia")),
            create_test_record(2017, "China", 900.0, Some("Asia")),
            create_test_record(2017, "France", 70.0, Some("Europe")),
            create_test_record(2017, "Atlantis", 40.0, None),
            create_test_record(2017, "total", 999_999.0, None),
            create_test_record(2017, "others", 12_345.0, None),
        ]
    }

    #[test]
    fn test_continent_year_totals() {
        let totals = continent_year_totals(&sample_records());

        assert_eq!(
            totals,
            vec![
                ContinentYearTotal { year: Some(2016), continent: "Asia".into(), visa_issued: Some(400.0) },
                ContinentYearTotal { year: Some(2016), continent: "Europe".into(), visa_issued: Some(50.0) },
                ContinentYearTotal { year: Some(2017), continent: "Asia".into(), visa_issued: Some(1400.0) },
                ContinentYearTotal { year: Some(2017), continent: "Europe".into(), visa_issued: Some(70.0) },
            ]
        );
    }

    #[test]
    fn test_continent_totals_match_resolvable_year_total() {
        let records = sample_records();
        let totals = continent_year_totals(&records);

        for year in [2016, 2017] {
            let by_continent: f64 = totals
                .iter()
                .filter(|t| t.year == Some(year))
                .filter_map(|t| t.visa_issued)
                .sum();
            let direct: f64 = records
                .iter()
                .filter(|r| r.year == Some(year) && r.continent.is_some())
                .filter(|r| r.country_name().map_or(false, |c| !is_sentinel(c)))
                .filter_map(|r| r.issued_count)
                .sum();
            assert_eq!(by_continent, direct);
        }
    }

    #[test]
    fn test_top_countries_excludes_sentinels() {
        let top = top_countries(&sample_records(), 2017, 10);

        let names: Vec<&str> = top.iter().map(|t| t.country.as_str()).collect();
        assert_eq!(names, vec!["China", "Japan", "France", "Atlantis"]);
        assert!(top.iter().all(|t| !is_sentinel(&t.country)));
    }

    #[test]
    fn test_top_countries_limit_and_year() {
        let top = top_countries(&sample_records(), 2016, 2);

        assert_eq!(
            top,
            vec![
                CountryTotal { country: "China".into(), visa_issued: Some(300.0) },
                CountryTotal { country: "Japan".into(), visa_issued: Some(100.0) },
            ]
        );
        assert!(top_countries(&sample_records(), 1999, 10).is_empty());
    }

    #[test]
    fn test_top_countries_ties_and_absent_sums() {
        let records = vec![
            create_test_record(2017, "Peru", 10.0, None),
            create_test_record(2017, "Chile", 10.0, None),
            VisaRecord::new(Some(2017), Some("Chad".to_string()), None),
            create_test_record(2017, "Mali", 20.0, None),
        ];

        let top = top_countries(&records, 2017, 10);
        let names: Vec<&str> = top.iter().map(|t| t.country.as_str()).collect();

        assert_eq!(names, vec!["Mali", "Chile", "Peru", "Chad"]);
        assert_eq!(top[3].visa_issued, None);
    }

    #[test]
    fn test_country_year_totals_sums_duplicates_and_orders_by_year() {
        let mut records = sample_records();
        records.push(create_test_record(2015, "Japan", 1.0, Some("Asia")));
        records.push(create_test_record(2017, "Japan", 5.0, Some("Asia")));
        records.push(VisaRecord::new(Some(2017), None, Some(7.0)));

        let totals = country_year_totals(&records);

        let years: Vec<Option<i32>> = totals.iter().map(|t| t.year).collect();
        let mut sorted = years.clone();
        sorted.sort();
        assert_eq!(years, sorted);

        let japan_2017 = totals
            .iter()
            .find(|t| t.year == Some(2017) && t.country == "Japan")
            .unwrap();
        assert_eq!(japan_2017.visa_issued, Some(505.0));
        assert_eq!(totals.len(), 8);
        assert!(totals.iter().all(|t| !is_sentinel(&t.country)));
    }

    #[test]
    fn test_absent_year_groups_come_first() {
        let records = vec![
            create_test_record(2017, "Japan", 500.0, Some("Asia")),
            VisaRecord::new(None, Some("Japan".to_string()), Some(3.0))
                .with_continent(Some("Asia".to_string())),
        ];

        let continent_years: Vec<Option<i32>> =
            continent_year_totals(&records).iter().map(|t| t.year).collect();
        assert_eq!(continent_years, vec![None, Some(2017)]);

        let by_country = country_year_totals(&records);
        let country_years: Vec<Option<i32>> = by_country.iter().map(|t| t.year).collect();
        assert_eq!(country_years, vec![None, Some(2017)]);
        assert_eq!(by_country[0].visa_issued, Some(3.0));
    }

    #[test]
    fn test_all_absent_counts_sum_to_none() {
        let records = vec![
            VisaRecord::new(Some(2017), Some("Japan".to_string()), None)
                .with_continent(Some("Asia".to_string())),
        ];

        assert_eq!(continent_year_totals(&records)[0].visa_issued, None);
        assert_eq!(country_year_totals(&records)[0].visa_issued, None);
    }
}
