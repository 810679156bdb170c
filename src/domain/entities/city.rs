//! Geographic catalog entry.

/// One row of the static city/country/time-zone table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityInfo {
    /// City name.
    pub city: &'static str,
    /// Country name.
    pub country: &'static str,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: &'static str,
    /// IANA time-zone identifier.
    pub time_zone: &'static str,
}

impl CityInfo {
    /// Returns true if `needle` (already lowercased) occurs in the city,
    /// country or country code.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [self.city, self.country, self.country_code]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl std::fmt::Display for CityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}
