// ⚙️ Pipeline Configuration - fixed paths and tunables
// Defaults reproduce the fixed-path batch job; the CLI only overrides them

use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_PATH: &str = "input/visa_number_in_japan.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Minimum fuzzy score (0-100) for replacing a country name
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 85;

pub const DEFAULT_TOP_YEAR: i32 = 2017;
pub const DEFAULT_TOP_LIMIT: usize = 10;

// Output file names (fixed)
pub const CONTINENT_CHART_FILE: &str = "visa_number_in_japan_continent_2006_2017.html";
pub const COUNTRY_CHART_FILE: &str = "visa_number_in_japan_by_country_2017.html";
pub const YEAR_MAP_FILE: &str = "visa_number_in_japan_year_map.html";
pub const CLEANED_CSV_FILE: &str = "visa_number_in_japan_cleaned.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub fuzzy_threshold: u8,
    /// Year used by the top-countries query
    pub top_year: i32,
    pub top_limit: usize,
    /// Local plotly.js to inline into the charts (CDN when None)
    pub plotly_js: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_top(mut self, year: i32, limit: usize) -> Self {
        self.top_year = year;
        self.top_limit = limit;
        self
    }

    pub fn with_plotly_js(mut self, path: Option<PathBuf>) -> Self {
        self.plotly_js = path;
        self
    }

    pub fn continent_chart_path(&self) -> PathBuf {
        self.output_dir.join(CONTINENT_CHART_FILE)
    }

    pub fn country_chart_path(&self) -> PathBuf {
        self.output_dir.join(COUNTRY_CHART_FILE)
    }

    pub fn year_map_path(&self) -> PathBuf {
        self.output_dir.join(YEAR_MAP_FILE)
    }

    pub fn cleaned_csv_path(&self) -> PathBuf {
        self.output_dir.join(CLEANED_CSV_FILE)
    }

    pub fn input(&self) -> &Path {
        &self.input_path
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            top_year: DEFAULT_TOP_YEAR,
            top_limit: DEFAULT_TOP_LIMIT,
            plotly_js: None,
        }
    }
}
