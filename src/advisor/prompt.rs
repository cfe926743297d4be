//! Reasoning request assembly

use chrono::NaiveDate;

use crate::models::{ForecastDay, HealthReport};

const NONE: &str = "none";

/// Flattened health and forecast facts that fill the advice prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningVariables {
    pub temperature: f64,
    /// Comma-separated, or "none"
    pub symptoms: String,
    /// Free-form notes, or "none"
    pub other: String,
    pub city: String,
    pub date: NaiveDate,
    pub forecast: ForecastDay,
}

impl ReasoningVariables {
    #[must_use]
    pub fn build(report: &HealthReport, forecast: &ForecastDay) -> Self {
        let symptoms = if report.symptoms.is_empty() {
            NONE.to_string()
        } else {
            report.symptoms.join(", ")
        };

        let other = report
            .other_notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .unwrap_or(NONE)
            .to_string();

        Self {
            temperature: report.temperature,
            symptoms,
            other,
            city: report.destination_city.clone(),
            date: report.travel_date,
            forecast: forecast.clone(),
        }
    }

    /// Temperatures always carry a decimal, e.g. `37.0°C`
    #[must_use]
    pub fn render_prompt(&self) -> String {
        format!(
            "You are a medical-travel advisor AI. Analyze the user's body temperature, symptoms, \
and the live weather forecast for their chosen travel destination.
Using your reasoning, decide if it is advisable for them to travel, explain why, and list any precautions.

Respond with:
- A clear decision (e.g., \"You should not travel\", \"You can travel with precautions\", or \"Safe to travel\").
- The reasoning (based on health + forecast).
- Practical precautions (like staying hydrated, wearing warm clothes, etc.).
- A short disclaimer about consulting a doctor if symptoms persist.

User health data:
- Body temperature: {temp:?}°C
- Symptoms: {symptoms}
- Other notes: {other}

Destination info:
- City: {city}
- Travel date: {date}
- Forecast: {min:?}°C–{max:?}°C, {description}

Write your advice in a friendly and empathetic tone.
",
            temp = self.temperature,
            symptoms = self.symptoms,
            other = self.other,
            city = self.city,
            date = self.date.format("%Y-%m-%d"),
            min = self.forecast.min,
            max = self.forecast.max,
            description = self.forecast.description,
        )
    }
}
