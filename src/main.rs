use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json};
use serde_json::json;
use std::sync::Arc;

use pace_planner_backend::config::PlannerConfig;
use pace_planner_backend::error::PaceError;
use pace_planner_backend::model::{
    build_plan, build_prediction, PlanRequest, PlanResponse, PredictRequest, PredictResponse,
};

// ---------- Server state ----------

#[derive(Clone)]
struct AppState {
    cfg: Arc<PlannerConfig>,
}

// ---------- Handlers ----------

type Rejection = (StatusCode, Json<serde_json::Value>);

fn reject(e: PaceError) -> Rejection {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": e.to_string() })),
    )
}

async fn plan(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, Rejection> {
    let resp = build_plan(&req, &state.cfg).map_err(reject)?;
    tracing::info!(
        "plan race={:?} strategy={:?} target={:.0}s splits={}",
        resp.race,
        resp.strategy,
        resp.target_seconds,
        resp.splits.len()
    );
    Ok(Json(resp))
}

async fn predict(Json(req): Json<PredictRequest>) -> Result<Json<PredictResponse>, Rejection> {
    let resp = build_prediction(&req).map_err(reject)?;
    tracing::info!(
        "predict pace={:.0}s/km strategy={:?}",
        resp.pace_sec_per_km,
        resp.strategy
    );
    Ok(Json(resp))
}

async fn healthz() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = match std::env::var("CONFIG_PATH") {
        Ok(path) => PlannerConfig::load(&path)?,
        Err(_) => PlannerConfig::default(),
    };
    tracing::info!(
        "planner config: {} key splits, finish window {:.2} km",
        cfg.key_splits_km.len(),
        cfg.finish_window_km
    );

    let state = AppState { cfg: Arc::new(cfg) };

    let app = axum::Router::new()
        .route("/api/plan", post(plan))
        .route("/api/predict", post(predict))
        .route("/healthz", get(healthz))
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
