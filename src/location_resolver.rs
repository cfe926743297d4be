//! Location Resolution Module
//!
//! Resolves a free-text destination into a single structured Location.

use tracing::debug;

use crate::models::Location;
use crate::weather::GeocodingProvider;
use crate::{AdvisorError, Result};

/// Service for resolving destination names
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a city name via the geocoder, keeping only the first candidate
    pub async fn resolve(geocoder: &dyn GeocodingProvider, city: &str) -> Result<Location> {
        debug!("Geocoding location name: {}", city);

        let location = geocoder
            .geocode(city)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AdvisorError::not_found(city))?;

        debug!(
            "Resolved location: {} at ({})",
            location.name,
            location.format_coordinates()
        );

        Ok(location)
    }
}
