//! HTTP/JSON transport for the game session.
//!
//! Every handler forwards its request verbatim to [`GameSession`]; no rule
//! decisions are made here. The only validation is turning the raw player id
//! into a [`Player`], and unknown ids never reach the session.

use crate::session::{GameSession, StateSnapshot};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_more::{Display, Error};
use seega_rules::Player;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Wire id returned by `register` when both seats are taken.
pub const FULL_SENTINEL: u8 = 0;

/// Response to a registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Assigned player id, or [`FULL_SENTINEL`].
    pub player: u8,
}

/// Acknowledgement of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Whether the session accepted the command.
    pub ok: bool,
}

/// Request to append a chat line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Sender id.
    pub player: u8,
    /// Message text.
    pub text: String,
}

/// Request addressing one cell, used for placement and forced removal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CellRequest {
    /// Acting player id.
    pub player: u8,
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

/// Request to move a piece one step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Acting player id.
    pub player: u8,
    /// Source row.
    pub src_row: usize,
    /// Source column.
    pub src_col: usize,
    /// Destination row.
    pub dst_row: usize,
    /// Destination column.
    pub dst_col: usize,
}

/// Request carrying only the acting player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerRequest {
    /// Acting player id.
    pub player: u8,
}

/// Transport-level error, reported as HTTP 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ApiError {
    /// The id does not name one of the two seats.
    #[display("unknown player id {_0}")]
    UnknownPlayer(#[error(not(source))] u8),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

fn player_from_id(id: u8) -> Result<Player, ApiError> {
    Player::try_from(id).map_err(|_| {
        warn!(id, "Request for unknown player");
        ApiError::UnknownPlayer(id)
    })
}

/// Builds the router serving `session`.
#[instrument(skip(session))]
pub fn router(session: Arc<GameSession>) -> Router {
    info!("Building HTTP routes");
    Router::new()
        .route("/api/register", post(register))
        .route("/api/state/{player}", get(state))
        .route("/api/chat", post(chat))
        .route("/api/place", post(place))
        .route("/api/move", post(move_piece))
        .route("/api/remove", post(remove))
        .route("/api/surrender", post(surrender))
        .route("/api/reset", post(reset))
        .with_state(session)
}

#[instrument(skip(session))]
async fn register(State(session): State<Arc<GameSession>>) -> Json<RegisterResponse> {
    let player = session.register().map_or(FULL_SENTINEL, Player::id);
    Json(RegisterResponse { player })
}

#[instrument(skip(session))]
async fn state(
    State(session): State<Arc<GameSession>>,
    Path(player): Path<u8>,
) -> Result<Json<StateSnapshot>, ApiError> {
    let player = player_from_id(player)?;
    debug!(%player, "Serving state");
    Ok(Json(session.get_state(player)))
}

#[instrument(skip(session, req), fields(player = req.player))]
async fn chat(
    State(session): State<Arc<GameSession>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let player = player_from_id(req.player)?;
    let ok = session.send_chat(player, &req.text);
    Ok(Json(CommandResponse { ok }))
}

#[instrument(skip(session))]
async fn place(
    State(session): State<Arc<GameSession>>,
    Json(req): Json<CellRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let player = player_from_id(req.player)?;
    let ok = session.place_piece(player, req.row, req.col);
    Ok(Json(CommandResponse { ok }))
}

#[instrument(skip(session))]
async fn move_piece(
    State(session): State<Arc<GameSession>>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let player = player_from_id(req.player)?;
    let ok = session.move_piece(player, req.src_row, req.src_col, req.dst_row, req.dst_col);
    Ok(Json(CommandResponse { ok }))
}

#[instrument(skip(session))]
async fn remove(
    State(session): State<Arc<GameSession>>,
    Json(req): Json<CellRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let player = player_from_id(req.player)?;
    let ok = session.remove_piece_when_blocked(player, req.row, req.col);
    Ok(Json(CommandResponse { ok }))
}

#[instrument(skip(session))]
async fn surrender(
    State(session): State<Arc<GameSession>>,
    Json(req): Json<PlayerRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let player = player_from_id(req.player)?;
    let ok = session.surrender(player);
    Ok(Json(CommandResponse { ok }))
}

#[instrument(skip(session))]
async fn reset(State(session): State<Arc<GameSession>>) -> Json<CommandResponse> {
    session.reset();
    Json(CommandResponse { ok: true })
}
