use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::advisor::{AssessmentOrchestrator, WindowExtractor};
use crate::api::{self, AppState};
use crate::config::AdvisorConfig;
use crate::reasoning::{GeminiClient, ReasoningClient};
use crate::weather::OpenMeteoClient;

/// Wire the Open-Meteo and Gemini clients into an orchestrator
pub fn build_orchestrator(config: &AdvisorConfig) -> Result<AssessmentOrchestrator> {
    let open_meteo = Arc::new(
        OpenMeteoClient::new(&config.weather).context("Failed to create Open-Meteo client")?,
    );
    let gemini =
        GeminiClient::new(&config.reasoning).context("Failed to create Gemini client")?;
    if !gemini.is_configured() {
        tracing::warn!("No Gemini API key configured, recommendations will be placeholders");
    }

    Ok(AssessmentOrchestrator::new(
        open_meteo.clone(),
        open_meteo,
        ReasoningClient::new(Arc::new(gemini)),
    )
    .with_window(WindowExtractor::new(config.defaults.window_radius_days)))
}

/// Routes at the root and under `/api`, permissive CORS, optional static frontend
pub fn app(state: AppState, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = api::router(state);
    let mut app = Router::new().merge(routes.clone()).nest("/api", routes);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors)
}

pub async fn run(config: &AdvisorConfig) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let app = app(AppState::new(orchestrator), config.server.static_dir.as_deref());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Web server terminated unexpectedly")?;
    Ok(())
}
