//! Airwaves API Library
//!
//! HTTP surface of the ATC audio player service. The router carries two
//! concerns: the player API that the UI drives (airport selection, playlist
//! continuity, volume) and the stream proxy, which is the only place audio
//! bytes leave for the network.

mod config;
mod errors;
mod player;
mod proxy;

pub use crate::config::AppConfig;
pub use crate::errors::{ErrorLog, RecordedError};

use std::sync::Arc;

use airwaves_engine::{Player, SegmentLister};
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub player: Arc<Player>,
    pub http: reqwest::Client,
    pub errors: ErrorLog,
}

impl AppState {
    pub fn new(config: AppConfig, lister: Arc<dyn SegmentLister>) -> Self {
        let player = Arc::new(Player::new(lister, config.max_segment_count));
        AppState {
            config: Arc::new(config),
            player,
            http: reqwest::Client::new(),
            errors: ErrorLog::default(),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Create the application router with all endpoints
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/airports", get(player::list_airports))
        .route("/player", get(player::get_player))
        .route("/player/airport", post(player::select_airport))
        .route("/player/advance", post(player::advance_track))
        .route("/player/volume", put(player::set_volume))
        .route("/player/music-state", post(player::set_music_state))
        .route(
            "/errors",
            get(errors::get_errors).delete(errors::clear_errors),
        )
        .route("/atc/{station_prefix}/{file_name}", get(proxy::stream_segment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
