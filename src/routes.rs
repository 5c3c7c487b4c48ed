use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{debug_handler, Json, Router};
use serde::Serialize;
use serde_json::json;
use snake_core::{Direction, SnapshotError, Strategy};
use tracing::{debug, info, info_span, warn};

use crate::config::{Appearance, Config};

/// Shared, read-only state. Every request builds its own turn from the body.
pub struct AppState {
    pub strategy: Box<dyn Strategy>,
    pub appearance: Appearance,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            strategy: config.strategy.build(config.legality),
            appearance: config.appearance.clone(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/info", get(info))
        .route("/start", post(start))
        .route("/move", post(get_move))
        .route("/end", post(end))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub apiversion: &'static str,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: Direction,
}

/// Body for notifications whose response the engine ignores.
#[derive(Debug, Default, Serialize)]
pub struct Acknowledgement {}

/// A move request the engine could not use. Answered with `400` and the reason.
#[derive(Debug)]
pub struct BadTurn(pub SnapshotError);

impl IntoResponse for BadTurn {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

async fn info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    let appearance = &state.appearance;
    Json(InfoResponse {
        apiversion: "1",
        author: appearance.author.clone(),
        color: appearance.color.clone(),
        head: appearance.head.clone(),
        tail: appearance.tail.clone(),
    })
}

#[debug_handler]
async fn get_move(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<MoveResponse>, BadTurn> {
    let started = Instant::now();
    let mut bytes = body.into_bytes();
    let turn = snake_core::decode(&mut bytes).map_err(|e| {
        warn!(error = %e, "Rejecting move request");
        BadTurn(e)
    })?;

    let span = info_span!("move", game_id = %turn.game_id, turn = turn.turn);
    let _enter = span.enter();
    debug!("Board:\n{}", turn.board);

    let direction = state.strategy.choose_move(&turn);
    let elapsed = started.elapsed();
    info!(
        strategy = state.strategy.name(),
        head = %turn.you().head,
        ?elapsed,
        "Moving {direction}"
    );
    if elapsed > Duration::from_millis(turn.timeout_ms.into()) {
        warn!(?elapsed, timeout_ms = turn.timeout_ms, "Move exceeded the turn timeout");
    }
    Ok(Json(MoveResponse { direction }))
}

async fn start(body: String) -> Json<Acknowledgement> {
    let mut bytes = body.into_bytes();
    match snake_core::decode_game_info(&mut bytes) {
        Ok(game) => info!(game_id = %game.game_id, timeout_ms = game.timeout_ms, "Game started"),
        Err(e) => warn!(error = %e, "Start notification without a readable game"),
    }
    Json(Acknowledgement::default())
}

async fn end(body: String) -> Json<Acknowledgement> {
    let mut bytes = body.into_bytes();
    match snake_core::decode_game_info(&mut bytes) {
        Ok(game) => info!(game_id = %game.game_id, "Game ended"),
        Err(e) => warn!(error = %e, "End notification without a readable game"),
    }
    Json(Acknowledgement::default())
}
