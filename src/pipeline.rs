// 🚚 Pipeline - load → clean → enrich → aggregate → visualize → write
// The job either writes all four outputs or returns the first fatal error

use crate::aggregator::{continent_year_totals, country_year_totals, top_countries};
use crate::config::PipelineConfig;
use crate::enricher::ContinentEnricher;
use crate::entities::CountryRegistry;
use crate::export::write_cleaned_csv;
use crate::loader::{load_csv, LoadStats};
use crate::normalizer::{CountryNormalizer, NormalizationSummary};
use crate::record::VisaRecord;
use crate::report::{continent_year_chart, top_countries_chart, year_map_chart, PlotlyScript};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// What a run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub load: LoadStats,
    pub records: usize,
    pub normalization: NormalizationSummary,
    pub unresolved_continents: usize,
    pub outputs: Vec<PathBuf>,
    /// SHA-256 of the cleaned CSV (equal across runs on identical input)
    pub cleaned_csv_sha256: String,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} rows read, {} records | {} | {} without continent | {} outputs",
            self.load.rows_read,
            self.records,
            self.normalization.summary(),
            self.unresolved_continents,
            self.outputs.len()
        )
    }
}

/// Clean and enrich a loaded table (normalizer then enricher)
pub fn clean_records(
    records: Vec<VisaRecord>,
    registry: &CountryRegistry,
    threshold: u8,
) -> (Vec<VisaRecord>, NormalizationSummary, usize) {
    let mut normalizer = CountryNormalizer::new(registry, threshold);
    let (records, normalization) = normalizer.normalize_records(records);

    let enricher = ContinentEnricher::new(registry);
    let (records, unresolved) = enricher.enrich_records(records);

    (records, normalization, unresolved)
}

/// Run the whole batch job
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    info!(input = %config.input().display(), output = %config.output_dir.display(), "Starting visa pipeline");

    // 1. Load
    let (records, load) = load_csv(config.input())?;

    // 2-3. Clean + enrich
    let registry = CountryRegistry::with_defaults();
    let (records, normalization, unresolved_continents) =
        clean_records(records, &registry, config.fuzzy_threshold);

    // 4. Aggregate
    let by_continent = continent_year_totals(&records);
    let top = top_countries(&records, config.top_year, config.top_limit);
    let by_country_year = country_year_totals(&records);
    info!(
        continent_groups = by_continent.len(),
        top_countries = top.len(),
        country_year_groups = by_country_year.len(),
        "Aggregated"
    );

    // 5. Visualize + write
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", config.output_dir.display())
    })?;

    let plotly = match &config.plotly_js {
        Some(path) => PlotlyScript::from_file(path)?,
        None => PlotlyScript::Cdn,
    };

    let continent_chart = config.continent_chart_path();
    continent_year_chart(&by_continent).write_html(&continent_chart, &plotly)?;

    let country_chart = config.country_chart_path();
    top_countries_chart(&top, config.top_year, config.top_limit)
        .write_html(&country_chart, &plotly)?;

    let year_map = config.year_map_path();
    year_map_chart(&by_country_year).write_html(&year_map, &plotly)?;

    let cleaned_csv = config.cleaned_csv_path();
    let cleaned_csv_sha256 = write_cleaned_csv(&cleaned_csv, &records)?;

    let summary = RunSummary {
        load,
        records: records.len(),
        normalization,
        unresolved_continents,
        outputs: vec![continent_chart, country_chart, year_map, cleaned_csv],
        cleaned_csv_sha256,
    };
    info!("{}", summary.summary());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_records_corrects_then_enriches() {
        let registry = CountryRegistry::with_defaults();
        let records = vec![
            VisaRecord::new(Some(2017), Some("Japan-ish-typo".to_string()), Some(500.0)),
            VisaRecord::new(Some(2017), Some("total".to_string()), Some(999999.0)),
            VisaRecord::new(Some(2017), Some("Andra".to_string()), Some(3.0)),
        ];

        let (records, normalization, unresolved) = clean_records(records, &registry, 85);

        assert_eq!(records[0].country_name(), Some("Japan"));
        assert_eq!(records[0].continent.as_deref(), Some("Asia"));
        assert_eq!(records[1].country_name(), Some("total"));
        assert_eq!(records[1].continent, None);
        assert_eq!(records[2].country_name(), Some("Russia"));
        assert_eq!(records[2].continent.as_deref(), Some("Europe"));
        assert_eq!(normalization.overridden, 1);
        assert_eq!(unresolved, 1);
    }
}
