use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leaderboard_engine::{
    boards::Boards, EngineConfig, LeaderboardEngine, LeaderboardError, LeaderboardStats,
    PlayerProfile, PlayerRecord, RankedEntry,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<LeaderboardEngine>,
    suggestion_limit: usize,
}

#[derive(Debug, Deserialize)]
struct LeaderboardParams {
    #[serde(default = "default_limit")]
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct SuggestParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

fn default_limit() -> usize { 10 }

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    did_you_mean: Vec<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    total: usize,
    entries: Vec<RankedEntry>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaderboard_server=debug,leaderboard_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("LEADERBOARD_CONFIG").ok();
    let config = EngineConfig::load(config_path.as_deref().map(std::path::Path::new))?;

    tracing::info!("🚀 Starting Leaderboard Server");
    tracing::info!("🔌 Port: {}", config.server.port);

    let engine = Arc::new(LeaderboardEngine::from_config(&config)?);
    tracing::info!("📦 Feed: {}", engine.source_name());

    // A failed first fetch still starts the server with an empty board
    if let Err(e) = engine.refresh().await {
        tracing::warn!("⚠️ Initial refresh failed: {}", e);
    }

    if let Some(interval) = config.refresh_interval() {
        tracing::info!("🔄 Refreshing every {}s", interval.as_secs());
        Arc::clone(&engine).spawn_periodic_refresh(interval);
    }

    let state = AppState {
        engine,
        suggestion_limit: config.suggestion_limit,
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/leaderboard", get(leaderboard_handler))
        .route("/v1/boards", get(boards_handler))
        .route("/v1/suggest", get(suggest_handler))
        .route("/v1/players/:nickname", get(profile_handler))
        .route("/v1/stats", get(stats_handler))
        .route("/v1/refresh", post(refresh_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("🎮 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: leaderboard_engine::VERSION.to_string(),
    })
}

async fn leaderboard_handler(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<LeaderboardResponse> {
    let board = state.engine.snapshot().await;

    Json(LeaderboardResponse {
        total: board.len(),
        entries: board.top(params.limit).to_vec(),
    })
}

async fn boards_handler(State(state): State<AppState>) -> Json<Boards> {
    Json(state.engine.snapshot().await.boards())
}

async fn suggest_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<PlayerRecord>> {
    let limit = params.limit.unwrap_or(state.suggestion_limit);
    Json(state.engine.snapshot().await.suggest(&params.q, limit))
}

async fn profile_handler(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<Json<PlayerProfile>, AppError> {
    match state.engine.profile(&nickname).await {
        Ok(profile) => Ok(Json(profile)),
        Err(e) => {
            let hints = state.engine.snapshot().await.did_you_mean(&nickname, 3);
            Err(AppError::from(e).with_hints(hints))
        }
    }
}

async fn stats_handler(State(state): State<AppState>) -> Json<LeaderboardStats> {
    Json(state.engine.snapshot().await.stats())
}

async fn refresh_handler(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardStats>, AppError> {
    let board = state.engine.refresh().await?;
    Ok(Json(board.stats()))
}

// Error handling
struct AppError {
    error: LeaderboardError,
    hints: Vec<String>,
}

impl AppError {
    fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.error {
            LeaderboardError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            LeaderboardError::Feed { .. } | LeaderboardError::HttpRequest(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.error.to_string();

        if status.is_server_error() {
            tracing::error!("❌ Error: {} - {}", status, message);
        } else {
            tracing::debug!("{} - {}", status, message);
        }

        let body = ErrorResponse {
            error: message,
            did_you_mean: self.hints,
        };
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<LeaderboardError>,
{
    fn from(err: E) -> Self {
        Self {
            error: err.into(),
            hints: Vec::new(),
        }
    }
}
