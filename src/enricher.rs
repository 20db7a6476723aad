// 🌏 Continent Enricher - country name → alpha-2 → continent code → continent name
// Any failure in the chain yields an absent continent; one bad row never aborts the batch

use crate::entities::{Continent, CountryRegistry};
use crate::error::LookupError;
use crate::record::VisaRecord;
use tracing::{debug, info};

pub struct ContinentEnricher<'a> {
    registry: &'a CountryRegistry,
}

impl<'a> ContinentEnricher<'a> {
    pub fn new(registry: &'a CountryRegistry) -> Self {
        ContinentEnricher { registry }
    }

    /// Full lookup chain, reporting which step failed
    pub fn resolve(&self, country: Option<&str>) -> Result<Continent, LookupError> {
        let name = country.ok_or(LookupError::MissingCountry)?;

        let alpha2 = self
            .registry
            .alpha2_for(name)
            .ok_or_else(|| LookupError::UnknownCountry(name.to_string()))?;

        let code = self
            .registry
            .continent_code_for(alpha2)
            .ok_or_else(|| LookupError::UnmappedCode(alpha2.to_string()))?;

        Continent::from_code(code).ok_or_else(|| LookupError::UnknownContinent(code.to_string()))
    }

    /// Continent name, or None when the chain fails (never errors)
    pub fn continent_name(&self, country: Option<&str>) -> Option<&'static str> {
        match self.resolve(country) {
            Ok(continent) => Some(continent.name()),
            Err(err) => {
                debug!(?country, error = %err, "Continent unresolved");
                None
            }
        }
    }

    /// Set the continent column on every record; returns how many stayed unresolved
    pub fn enrich_records(&self, records: Vec<VisaRecord>) -> (Vec<VisaRecord>, usize) {
        let mut unresolved = 0;

        let enriched: Vec<VisaRecord> = records
            .into_iter()
            .map(|record| {
                let continent = self.continent_name(record.country_name());
                if continent.is_none() {
                    unresolved += 1;
                }
                record.with_continent(continent.map(str::to_string))
            })
            .collect();

        info!(
            resolved = enriched.len() - unresolved,
            unresolved,
            "Assigned continents"
        );
        (enriched, unresolved)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(country: Option<&str>) -> VisaRecord {
        VisaRecord::new(Some(2017), country.map(str::to_string), Some(10.0))
    }

    #[test]
    fn test_resolve_canonical_name() {
        let registry = CountryRegistry::with_defaults();
        let enricher = ContinentEnricher::new(&registry);

        assert_eq!(enricher.resolve(Some("Japan")), Ok(Continent::Asia));
        assert_eq!(enricher.resolve(Some("Russian Federation")), Ok(Continent::Europe));
        assert_eq!(enricher.resolve(Some("Brazil")), Ok(Continent::SouthAmerica));
        assert_eq!(enricher.resolve(Some("Côte d'Ivoire")), Ok(Continent::Africa));
    }

    #[test]
    fn test_resolve_override_targets() {
        let registry = CountryRegistry::with_defaults();
        let enricher = ContinentEnricher::new(&registry);

        // Names the override table produces that aren't ISO short names
        assert_eq!(enricher.continent_name(Some("Russia")), Some("Europe"));
        assert_eq!(enricher.continent_name(Some("Moldova")), Some("Europe"));
        assert_eq!(enricher.continent_name(Some("Saint Helena")), Some("Africa"));
        assert_eq!(enricher.continent_name(Some("Kosovo")), Some("Europe"));
        assert_eq!(enricher.continent_name(Some("Macao")), Some("Asia"));
    }

    #[test]
    fn test_resolve_failures() {
        let registry = CountryRegistry::with_defaults();
        let enricher = ContinentEnricher::new(&registry);

        assert_eq!(enricher.resolve(None), Err(LookupError::MissingCountry));
        assert_eq!(
            enricher.resolve(Some("total")),
            Err(LookupError::UnknownCountry("total".to_string()))
        );
        assert_eq!(enricher.continent_name(Some("others")), None);
    }

    #[test]
    fn test_enrich_records_never_fails() {
        let registry = CountryRegistry::with_defaults();
        let enricher = ContinentEnricher::new(&registry);

        let records = vec![
            create_test_record(Some("Japan")),
            create_test_record(Some("total")),
            create_test_record(None),
            create_test_record(Some("Canada")),
        ];

        let (records, unresolved) = enricher.enrich_records(records);

        let continents: Vec<Option<&str>> =
            records.iter().map(|r| r.continent.as_deref()).collect();
        assert_eq!(
            continents,
            vec![Some("Asia"), None, None, Some("North America")]
        );
        assert_eq!(unresolved, 2);
    }
}
