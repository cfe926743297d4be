//! Traveler health report

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-reported health state plus the intended trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Body temperature in Celsius, taken as reported
    pub temperature: f64,
    /// Symptoms in the order the traveler listed them
    pub symptoms: Vec<String>,
    /// Free-form notes
    pub other_notes: Option<String>,
    /// City as typed by the traveler
    pub destination_city: String,
    pub travel_date: NaiveDate,
}
