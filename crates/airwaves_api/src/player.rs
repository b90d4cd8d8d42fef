use airwaves_core::{Airport, AtcError, EngineState};
use airwaves_engine::PlayerSnapshot;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAirportRequest {
    pub iata: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeRequest {
    pub volume: i64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicStateRequest {
    pub code: i32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

const PLAYLIST_ERROR_CODE: &str = "ATC_PLAYLIST_GENERATION_ERROR";

fn resolve_error_to_response(error: &AtcError) -> impl IntoResponse {
    let status = match error {
        AtcError::MissingStation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AtcError::InvalidOffset { .. } | AtcError::InvalidSegmentName { .. } => {
            StatusCode::BAD_REQUEST
        }
        AtcError::TimeArithmetic(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// List the configured airports
pub async fn list_airports(State(state): State<AppState>) -> Json<Vec<Airport>> {
    Json(state.config.airports.clone())
}

/// Current player snapshot
pub async fn get_player(State(state): State<AppState>) -> Json<PlayerSnapshot> {
    Json(state.player.snapshot())
}

/// Select an airport and resolve a fresh playlist for it
pub async fn select_airport(
    State(state): State<AppState>,
    Json(payload): Json<SelectAirportRequest>,
) -> impl IntoResponse {
    let Some(airport) = state.config.find_airport(&payload.iata) else {
        state.errors.record(
            PLAYLIST_ERROR_CODE,
            "Failed to generate ATC playlist",
            Some(format!(
                "Airport with IATA code {} not found",
                payload.iata
            )),
        );
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Airport with IATA code {} not found", payload.iata),
            }),
        )
            .into_response();
    };

    tracing::info!(
        "Fetching ATC playlist for {} ({})",
        airport.name,
        airport.iata
    );
    match state.player.select_airport(airport).await {
        Ok(outcome) => {
            tracing::info!(
                "Generated ATC playlist for {} with {} tracks (applied: {})",
                airport.name,
                outcome.track_count,
                outcome.applied
            );
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(error) => {
            state.errors.record(
                PLAYLIST_ERROR_CODE,
                "Failed to generate ATC playlist",
                Some(error.to_string()),
            );
            resolve_error_to_response(&error).into_response()
        }
    }
}

/// Advance past the current track, for end-of-track and playback errors alike
pub async fn advance_track(State(state): State<AppState>) -> Json<PlayerSnapshot> {
    Json(state.player.advance())
}

/// Set the playback volume, clamped to 0-100
pub async fn set_volume(
    State(state): State<AppState>,
    Json(payload): Json<VolumeRequest>,
) -> Json<PlayerSnapshot> {
    state.player.set_volume(payload.volume);
    Json(state.player.snapshot())
}

/// Translate a raw state code reported by the embedded music engine
pub async fn set_music_state(
    State(state): State<AppState>,
    Json(payload): Json<MusicStateRequest>,
) -> impl IntoResponse {
    match EngineState::from_raw(payload.code) {
        Some(music_state) => {
            state.player.set_music_state(music_state);
            (StatusCode::OK, Json(state.player.snapshot())).into_response()
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Unknown engine state code {}", payload.code),
            }),
        )
            .into_response(),
    }
}
