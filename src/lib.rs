// Visa Stats - Core Library
// Exposes the pipeline stages for the CLI and for tests

pub mod config;
pub mod error;
pub mod record;
pub mod loader;
pub mod fuzzy;
pub mod entities;
pub mod normalizer;
pub mod enricher;
pub mod aggregator;
pub mod report;
pub mod export;
pub mod pipeline;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{LoadError, LookupError};
pub use record::VisaRecord;
pub use loader::{load_csv, load_from_reader, normalize_column_name, LoadStats};
pub use fuzzy::{extract_one, weighted_ratio, FuzzyMatch};
pub use entities::{Continent, CountryRegistry};
pub use normalizer::{Correction, CountryNormalizer, NormalizationSummary, COUNTRY_OVERRIDES};
pub use enricher::ContinentEnricher;
pub use aggregator::{
    continent_year_totals, country_year_totals, top_countries,
    ContinentYearTotal, CountryTotal, CountryYearTotal, SENTINEL_COUNTRIES,
};
pub use report::{continent_year_chart, top_countries_chart, year_map_chart, Figure, PlotlyScript};
pub use export::{write_cleaned_csv, write_records};
pub use pipeline::{clean_records, run, RunSummary};
