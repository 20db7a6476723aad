// Typed failures for the pipeline stages
// Everything else travels as anyhow::Error with context

/// Loader failures that aren't plain I/O or CSV syntax errors
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Missing required column '{column}' (available: {})", available.join(", "))]
    MissingColumn {
        column: &'static str,
        available: Vec<String>,
    },
}

/// Country → continent resolution failures
///
/// Never escapes the enrichment pass: each one turns into an absent continent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Country is absent")]
    MissingCountry,

    #[error("Unknown country name: {0}")]
    UnknownCountry(String),

    #[error("No continent for country code: {0}")]
    UnmappedCode(String),

    #[error("Unknown continent code: {0}")]
    UnknownContinent(String),
}
