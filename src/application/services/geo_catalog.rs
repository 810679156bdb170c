//! Static city and time-zone catalog.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::domain::entities::CityInfo;

use super::time_format;

macro_rules! city {
    ($city:expr, $country:expr, $code:expr, $tz:expr) => {
        CityInfo {
            city: $city,
            country: $country,
            country_code: $code,
            time_zone: $tz,
        }
    };
}

/// Table order is significant: lookups return the first match.
static CITIES: &[CityInfo] = &[
    city!("Tokyo", "Japan", "JP", "Asia/Tokyo"),
    city!("Osaka", "Japan", "JP", "Asia/Tokyo"),
    city!("Seoul", "South Korea", "KR", "Asia/Seoul"),
    city!("Shanghai", "China", "CN", "Asia/Shanghai"),
    city!("Hong Kong", "Hong Kong", "HK", "Asia/Hong_Kong"),
    city!("Taipei", "Taiwan", "TW", "Asia/Taipei"),
    city!("Singapore", "Singapore", "SG", "Asia/Singapore"),
    city!("Bangkok", "Thailand", "TH", "Asia/Bangkok"),
    city!("Jakarta", "Indonesia", "ID", "Asia/Jakarta"),
    city!("Manila", "Philippines", "PH", "Asia/Manila"),
    city!("Mumbai", "India", "IN", "Asia/Kolkata"),
    city!("Delhi", "India", "IN", "Asia/Kolkata"),
    city!("Kathmandu", "Nepal", "NP", "Asia/Kathmandu"),
    city!("Dubai", "United Arab Emirates", "AE", "Asia/Dubai"),
    city!("Istanbul", "Turkey", "TR", "Europe/Istanbul"),
    city!("Moscow", "Russia", "RU", "Europe/Moscow"),
    city!("London", "United Kingdom", "GB", "Europe/London"),
    city!("Dublin", "Ireland", "IE", "Europe/Dublin"),
    city!("Lisbon", "Portugal", "PT", "Europe/Lisbon"),
    city!("Paris", "France", "FR", "Europe/Paris"),
    city!("Berlin", "Germany", "DE", "Europe/Berlin"),
    city!("Amsterdam", "Netherlands", "NL", "Europe/Amsterdam"),
    city!("Madrid", "Spain", "ES", "Europe/Madrid"),
    city!("Rome", "Italy", "IT", "Europe/Rome"),
    city!("Athens", "Greece", "GR", "Europe/Athens"),
    city!("Reykjavik", "Iceland", "IS", "Atlantic/Reykjavik"),
    city!("Cairo", "Egypt", "EG", "Africa/Cairo"),
    city!("Nairobi", "Kenya", "KE", "Africa/Nairobi"),
    city!("Johannesburg", "South Africa", "ZA", "Africa/Johannesburg"),
    city!("New York", "United States", "US", "America/New_York"),
    city!("Chicago", "United States", "US", "America/Chicago"),
    city!("Denver", "United States", "US", "America/Denver"),
    city!("Los Angeles", "United States", "US", "America/Los_Angeles"),
    city!("Honolulu", "United States", "US", "Pacific/Honolulu"),
    city!("Toronto", "Canada", "CA", "America/Toronto"),
    city!("Vancouver", "Canada", "CA", "America/Vancouver"),
    city!("Mexico City", "Mexico", "MX", "America/Mexico_City"),
    city!("São Paulo", "Brazil", "BR", "America/Sao_Paulo"),
    city!("Buenos Aires", "Argentina", "AR", "America/Argentina/Buenos_Aires"),
    city!("Sydney", "Australia", "AU", "Australia/Sydney"),
    city!("Adelaide", "Australia", "AU", "Australia/Adelaide"),
    city!("Auckland", "New Zealand", "NZ", "Pacific/Auckland"),
];

/// Read-only catalog of destinations with their time zones.
#[derive(Debug, Clone)]
pub struct GeoCatalog {
    entries: &'static [CityInfo],
    home_zone: Tz,
    time_format: String,
}

impl GeoCatalog {
    /// Creates a catalog that measures deltas against `home_zone` and renders
    /// times with `time_format`. An unknown home zone falls back to UTC.
    #[must_use]
    pub fn new(home_zone: &str, time_format: impl Into<String>) -> Self {
        let home = time_format::parse_zone(home_zone).unwrap_or_else(|| {
            warn!(zone = home_zone, "Unknown home time zone, using UTC");
            Tz::UTC
        });

        Self {
            entries: CITIES,
            home_zone: home,
            time_format: time_format.into(),
        }
    }

    /// Every catalog entry, in table order.
    #[must_use]
    pub const fn entries(&self) -> &'static [CityInfo] {
        self.entries
    }

    /// Zone used when no reference is given.
    #[must_use]
    pub const fn home_zone(&self) -> Tz {
        self.home_zone
    }

    /// First entry whose country code equals `code`, ignoring ASCII case.
    #[must_use]
    pub fn info_for_country_code(&self, code: &str) -> Option<&'static CityInfo> {
        let code = code.trim();
        self.entries
            .iter()
            .find(|entry| entry.country_code.eq_ignore_ascii_case(code))
    }

    /// First entry using the time zone `zone_id`.
    #[must_use]
    pub fn info_for_time_zone(&self, zone_id: &str) -> Option<&'static CityInfo> {
        self.entries.iter().find(|entry| entry.time_zone == zone_id)
    }

    /// First entry whose city, country or code contains `query`,
    /// case-insensitively. Blank queries match nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Option<&'static CityInfo> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.matches_lowercase(&needle))
    }

    /// Local time in `zone_id` at `instant`, in the catalog's time format.
    #[must_use]
    pub fn time_string(&self, zone_id: &str, instant: DateTime<Utc>) -> Option<String> {
        time_format::time_string(zone_id, instant, &self.time_format)
    }

    /// `GMT+HH:MM` offset of `zone_id` at `instant`.
    #[must_use]
    pub fn gmt_offset_string(&self, zone_id: &str, instant: DateTime<Utc>) -> Option<String> {
        time_format::gmt_offset_string(zone_id, instant)
    }

    /// Difference between `zone_id` and `reference` (or the home zone).
    /// An unknown reference zone yields `None`.
    #[must_use]
    pub fn local_delta_string(
        &self,
        zone_id: &str,
        instant: DateTime<Utc>,
        reference: Option<&str>,
    ) -> Option<String> {
        let reference = match reference {
            Some(id) => time_format::parse_zone(id)?,
            None => self.home_zone,
        };
        time_format::local_delta_string(zone_id, instant, reference)
    }
}

impl Default for GeoCatalog {
    fn default() -> Self {
        Self::new("UTC", "%H:%M")
    }
}
