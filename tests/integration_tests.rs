//! Integration tests for the assessment pipeline and its HTTP surface

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use travel_health_advisor::advisor::{AssessmentError, AssessmentOrchestrator};
use travel_health_advisor::api::AppState;
use travel_health_advisor::reasoning::{ReasoningClient, ReasoningError, ReasoningProvider};
use travel_health_advisor::weather::{ForecastProvider, GeocodingProvider};
use travel_health_advisor::{AdvisorError, DailyForecastSeries, HealthReport, Location, web};

struct StaticGeocoder {
    results: Vec<Location>,
    calls: AtomicUsize,
}

#[async_trait]
impl GeocodingProvider for StaticGeocoder {
    async fn geocode(&self, _name: &str) -> travel_health_advisor::Result<Vec<Location>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }
}

struct FailingGeocoder;

#[async_trait]
impl GeocodingProvider for FailingGeocoder {
    async fn geocode(&self, _name: &str) -> travel_health_advisor::Result<Vec<Location>> {
        Err(AdvisorError::upstream("connection refused"))
    }
}

struct StaticForecast {
    series: Option<DailyForecastSeries>,
    calls: AtomicUsize,
}

#[async_trait]
impl ForecastProvider for StaticForecast {
    async fn daily_forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> travel_health_advisor::Result<DailyForecastSeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.series
            .clone()
            .ok_or_else(|| AdvisorError::upstream("API request failed with status: 503"))
    }
}

enum Reply {
    Text(&'static str),
    Unconfigured,
    Fail(&'static str),
}

struct ScriptedReasoning(Reply);

#[async_trait]
impl ReasoningProvider for ScriptedReasoning {
    async fn complete(&self, _prompt: &str) -> Result<String, ReasoningError> {
        match &self.0 {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Unconfigured => Err(ReasoningError::NotConfigured),
            Reply::Fail(msg) => Err(ReasoningError::Request(msg.to_string())),
        }
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Seven days 2025-06-07 .. 2025-06-13; 2025-06-10 is min 14 / max 22 / code 3
fn paris_week() -> DailyForecastSeries {
    DailyForecastSeries::new(
        date("2025-06-07").iter_days().take(7).collect(),
        vec![11.0, 12.0, 13.0, 14.0, 15.0, 15.5, 16.0],
        vec![19.0, 20.0, 21.0, 22.0, 23.0, 24.1, 25.0],
        vec![0, 1, 2, 3, 61, 80, 95],
    )
    .unwrap()
}

fn paris() -> Location {
    Location::with_country(48.85341, 2.3488, "Paris".to_string(), "France".to_string())
}

struct Fixture {
    geocoder: Arc<StaticGeocoder>,
    forecast: Arc<StaticForecast>,
    orchestrator: AssessmentOrchestrator,
}

fn fixture(locations: Vec<Location>, series: Option<DailyForecastSeries>, reply: Reply) -> Fixture {
    let geocoder = Arc::new(StaticGeocoder {
        results: locations,
        calls: AtomicUsize::new(0),
    });
    let forecast = Arc::new(StaticForecast {
        series,
        calls: AtomicUsize::new(0),
    });
    let orchestrator = AssessmentOrchestrator::new(
        geocoder.clone(),
        forecast.clone(),
        ReasoningClient::new(Arc::new(ScriptedReasoning(reply))),
    );
    Fixture {
        geocoder,
        forecast,
        orchestrator,
    }
}

fn report(travel_date: &str) -> HealthReport {
    HealthReport {
        temperature: 38.5,
        symptoms: vec!["fever".to_string(), "cough".to_string()],
        other_notes: None,
        destination_city: "Paris".to_string(),
        travel_date: date(travel_date),
    }
}

#[tokio::test]
async fn test_exact_date_end_to_end() {
    let f = fixture(
        vec![paris()],
        Some(paris_week()),
        Reply::Text("You can travel with precautions."),
    );

    let result = f.orchestrator.assess(report("2025-06-10")).await.unwrap();

    assert_eq!(result.city, "Paris, France");
    assert_eq!(result.date, date("2025-06-10"));
    assert_eq!(result.forecast.min, 14.0);
    assert_eq!(result.forecast.max, 22.0);
    assert_eq!(result.forecast.description, "Weather code: 3");
    assert_eq!(result.recommendation, "You can travel with precautions.");

    let graph_dates: Vec<NaiveDate> = result.forecast_graph.iter().map(|p| p.date).collect();
    assert_eq!(graph_dates, paris_week().dates().to_vec());
    assert_eq!(result.forecast_graph[3].temp, 18.0);
    assert_eq!(result.forecast_graph[5].temp, 19.8);
}

#[tokio::test]
async fn test_date_outside_horizon_uses_first_day_and_empty_graph() {
    let f = fixture(vec![paris()], Some(paris_week()), Reply::Text("Safe to travel."));

    let result = f.orchestrator.assess(report("2099-01-01")).await.unwrap();

    assert_eq!(result.forecast, paris_week().day_at(0).unwrap());
    assert!(result.forecast_graph.is_empty());
    assert_eq!(result.date, date("2099-01-01"));
}

#[tokio::test]
async fn test_unknown_city_aborts_before_forecast() {
    let f = fixture(vec![], Some(paris_week()), Reply::Text("unused"));

    let err = f.orchestrator.assess(report("2025-06-10")).await.unwrap_err();

    assert!(matches!(err, AssessmentError::Geocoding(AdvisorError::NotFound { .. })));
    assert_eq!(err.status_code(), 400);
    assert_eq!(f.geocoder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.forecast.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_forecast_failure_is_500() {
    let f = fixture(vec![paris()], None, Reply::Text("unused"));

    let err = f.orchestrator.assess(report("2025-06-10")).await.unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().starts_with("Weather fetch failed:"));
}

#[tokio::test]
async fn test_empty_forecast_is_500() {
    let empty = DailyForecastSeries::new(vec![], vec![], vec![], vec![]).unwrap();
    let f = fixture(vec![paris()], Some(empty), Reply::Text("unused"));

    let err = f.orchestrator.assess(report("2025-06-10")).await.unwrap_err();
    assert!(matches!(err, AssessmentError::Forecast(_)));
}

#[tokio::test]
async fn test_unconfigured_reasoning_still_completes() {
    let f = fixture(vec![paris()], Some(paris_week()), Reply::Unconfigured);

    let result = f.orchestrator.assess(report("2025-06-10")).await.unwrap();
    assert_eq!(result.recommendation, "Gemini API key not configured.");
    assert_eq!(result.forecast.description, "Weather code: 3");
}

#[tokio::test]
async fn test_reasoning_failure_becomes_recommendation_text() {
    let f = fixture(vec![paris()], Some(paris_week()), Reply::Fail("503 Service Unavailable"));

    let result = f.orchestrator.assess(report("2025-06-10")).await.unwrap();
    assert_eq!(result.recommendation, "AI error: 503 Service Unavailable");
}

#[tokio::test]
async fn test_city_falls_back_to_input_without_country() {
    let f = fixture(
        vec![Location::new(48.85, 2.35, "Paris".to_string())],
        Some(paris_week()),
        Reply::Text("ok"),
    );

    let result = f.orchestrator.assess(report("2025-06-10")).await.unwrap();
    assert_eq!(result.city, "Paris");
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn http_app(f: Fixture) -> axum::Router {
    web::app(AppState::new(f.orchestrator), None)
}

#[tokio::test]
async fn test_http_assess_response_contract() {
    let f = fixture(vec![paris()], Some(paris_week()), Reply::Text("Safe to travel."));

    let (status, body) = post_json(
        http_app(f),
        "/assess",
        json!({"temp": 38.5, "symptoms": ["fever", "cough"], "city": "Paris", "date": "2025-06-10"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"], "Safe to travel.");
    assert_eq!(body["city"], "Paris, France");
    assert_eq!(body["date"], "2025-06-10");
    assert_eq!(
        body["forecast"],
        json!({"min": 14.0, "max": 22.0, "description": "Weather code: 3"})
    );
    assert_eq!(body["forecastGraph"].as_array().unwrap().len(), 7);
    assert_eq!(body["forecastGraph"][0], json!({"date": "2025-06-07", "temp": 15.0}));
}

#[tokio::test]
async fn test_http_assess_under_api_prefix() {
    let f = fixture(vec![paris()], Some(paris_week()), Reply::Unconfigured);

    let (status, body) = post_json(
        http_app(f),
        "/api/assess",
        json!({"temp": 36.8, "city": "Paris", "date": "2025-06-12", "other": null}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"], "Gemini API key not configured.");
}

#[tokio::test]
async fn test_http_unknown_city_is_400_without_forecast() {
    let f = fixture(vec![], Some(paris_week()), Reply::Text("unused"));

    let (status, body) = post_json(
        http_app(f),
        "/assess",
        json!({"temp": 37.0, "city": "Atlantis", "date": "2025-06-10"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Could not geocode city:"));
    assert!(body.get("forecast").is_none());
    assert!(body.get("recommendation").is_none());
}

#[tokio::test]
async fn test_http_geocoder_outage_is_400() {
    let orchestrator = AssessmentOrchestrator::new(
        Arc::new(FailingGeocoder),
        Arc::new(StaticForecast {
            series: Some(paris_week()),
            calls: AtomicUsize::new(0),
        }),
        ReasoningClient::new(Arc::new(ScriptedReasoning(Reply::Text("unused")))),
    );

    let (status, body) = post_json(
        web::app(AppState::new(orchestrator), None),
        "/assess",
        json!({"temp": 37.0, "city": "Paris", "date": "2025-06-10"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_http_forecast_outage_is_500() {
    let f = fixture(vec![paris()], None, Reply::Text("unused"));

    let (status, body) = post_json(
        http_app(f),
        "/assess",
        json!({"temp": 37.0, "city": "Paris", "date": "2025-06-10"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Weather fetch failed:"));
}

#[tokio::test]
async fn test_http_malformed_date_rejected_before_upstream_calls() {
    let f = fixture(vec![paris()], Some(paris_week()), Reply::Text("unused"));
    let geocoder = f.geocoder.clone();
    let forecast = f.forecast.clone();

    let (status, body) = post_json(
        http_app(f),
        "/assess",
        json!({"temp": 37.0, "city": "Paris", "date": "next tuesday"}),
    )
    .await;

    // 400 from request validation, not the 500 of a failed forecast stage
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("next tuesday"));
    assert!(!detail.starts_with("Weather fetch failed"));
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(forecast.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_http_health() {
    let f = fixture(vec![], None, Reply::Unconfigured);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = http_app(f).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
