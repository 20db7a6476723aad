// 🏷️ Country Normalizer - raw country strings → canonical country names
//
// Two passes per name:
// 1. Fuzzy pass: best weighted-ratio match among the ISO names, kept if score >= threshold
// 2. Override pass: manual corrections for transliterations the fuzzy pass gets wrong
//
// The override table always wins: it's consulted with the raw string first,
// then with the fuzzy result.

use crate::entities::CountryRegistry;
use crate::fuzzy::extract_one;
use crate::record::VisaRecord;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Manual corrections for known-bad transliterated names (raw → canonical)
pub const COUNTRY_OVERRIDES: &[(&str, &str)] = &[
    ("Andra", "Russia"),
    ("Antigua Berbuda", "Antigua and Barbuda"),
    ("Barrane", "Bahrain"),
    ("Brush", "Bhutan"),
    ("Komoro", "Comoros"),
    ("Benan", "Benin"),
    ("Kiribass", "Kiribati"),
    ("Gaiana", "Guyana"),
    ("Court Jiboire", "Côte d'Ivoire"),
    ("Lesot", "Lesotho"),
    ("Macau travel certificate", "Macao"),
    ("Moldoba", "Moldova"),
    ("Naure", "Nauru"),
    ("Nigail", "Niger"),
    ("Palao", "Palau"),
    ("St. Christopher Navis", "Saint Kitts and Nevis"),
    ("Santa Principa", "Sao Tome and Principe"),
    ("Saechel", "Seychelles"),
    ("Slinum", "Saint Helena"),
    ("Swaji Land", "Eswatini"),
    ("Torque menistan", "Turkmenistan"),
    ("Tsubaru", "Zimbabwe"),
    ("Kosovo", "Kosovo"),
];

// ============================================================================
// CORRECTION RESULT
// ============================================================================

/// What happened to one country name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Correction {
    /// Fuzzy match at or above threshold
    Fuzzy { name: String, score: u8 },

    /// Manual override table entry
    Override { name: String },

    /// Left as is (best score below threshold, no override)
    Unchanged { best_score: u8 },
}

impl Correction {
    /// Resolve to the final name, given the raw input
    pub fn resolve(&self, raw: &str) -> String {
        match self {
            Correction::Fuzzy { name, .. } | Correction::Override { name } => name.clone(),
            Correction::Unchanged { .. } => raw.to_string(),
        }
    }
}

/// Per-run counters (rows, not distinct names)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationSummary {
    /// Fuzzy match that changed the name
    pub fuzzy_corrected: usize,
    pub overridden: usize,
    /// Exact matches plus names below the threshold
    pub unchanged: usize,
    pub missing_country: usize,
}

impl NormalizationSummary {
    pub fn summary(&self) -> String {
        format!(
            "Fuzzy: {}, Overrides: {}, Unchanged: {}, Missing: {}",
            self.fuzzy_corrected, self.overridden, self.unchanged, self.missing_country
        )
    }
}

// ============================================================================
// COUNTRY NORMALIZER
// ============================================================================

pub struct CountryNormalizer {
    canonical_names: Vec<&'static str>,
    overrides: HashMap<&'static str, &'static str>,

    /// Minimum score (0-100) for accepting a fuzzy match (default: 85)
    pub threshold: u8,

    /// Distinct raw names already corrected this run
    cache: HashMap<String, Correction>,
}

impl CountryNormalizer {
    pub fn new(registry: &CountryRegistry, threshold: u8) -> Self {
        CountryNormalizer {
            canonical_names: registry.canonical_names().collect(),
            overrides: COUNTRY_OVERRIDES.iter().copied().collect(),
            threshold,
            cache: HashMap::new(),
        }
    }

    /// Correct one raw country name (memoized)
    pub fn correct(&mut self, raw: &str) -> Correction {
        if let Some(hit) = self.cache.get(raw) {
            return hit.clone();
        }

        let correction = self.compute(raw);
        debug!(raw, ?correction, "Country correction");
        self.cache.insert(raw.to_string(), correction.clone());
        correction
    }

    fn compute(&self, raw: &str) -> Correction {
        // Pass 1: fuzzy
        let best = extract_one(raw, self.canonical_names.iter().copied());
        let best_score = best.as_ref().map_or(0, |m| m.score);
        let fuzzy = best.filter(|m| m.score >= self.threshold);

        let candidate = fuzzy.as_ref().map_or(raw, |m| m.choice);

        // Pass 2: overrides, raw key first
        let override_name = self
            .overrides
            .get(raw)
            .or_else(|| self.overrides.get(candidate));
        if let Some(name) = override_name {
            return Correction::Override {
                name: name.to_string(),
            };
        }

        match fuzzy {
            Some(m) => Correction::Fuzzy {
                name: m.choice.to_string(),
                score: m.score,
            },
            None => Correction::Unchanged { best_score },
        }
    }

    /// Normalize the country column of every record
    pub fn normalize_records(
        &mut self,
        records: Vec<VisaRecord>,
    ) -> (Vec<VisaRecord>, NormalizationSummary) {
        let mut summary = NormalizationSummary::default();

        let normalized = records
            .into_iter()
            .map(|record| {
                let Some(raw) = record.country.clone() else {
                    summary.missing_country += 1;
                    return record;
                };

                let correction = self.correct(&raw);
                match &correction {
                    Correction::Fuzzy { name, .. } if *name != raw => summary.fuzzy_corrected += 1,
                    Correction::Fuzzy { .. } => summary.unchanged += 1,
                    Correction::Override { .. } => summary.overridden += 1,
                    Correction::Unchanged { .. } => summary.unchanged += 1,
                }

                record.with_country(Some(correction.resolve(&raw)))
            })
            .collect();

        info!(distinct = self.cache.len(), "{}", summary.summary());
        (normalized, summary)
    }
}

// ============================================================================
// TESTS
// ============================================================================
