//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// Resolved destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical place name as returned by the geocoder
    pub name: String,
    /// Country name
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: Some(country),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// "Name, Country" when both parts are known, otherwise `None`
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match &self.country {
            Some(country) if !self.name.is_empty() && !country.is_empty() => {
                Some(format!("{}, {}", self.name, country))
            }
            _ => None,
        }
    }
}
