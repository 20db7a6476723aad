// Reference Entities - countries and continents
//
// Static reference data behind the normalizer and the continent enricher.
// Each entity has a registry for normalization and lookups.

pub mod continent;
pub mod country;

pub use continent::Continent;
pub use country::CountryRegistry;
