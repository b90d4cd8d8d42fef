//! Central collection of non-fatal application errors.
//!
//! Resolution-time failures land here for observability and never halt
//! playback of whatever playlist already exists.

use std::sync::{Arc, Mutex};

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: i64,
}

#[derive(Clone, Default)]
pub struct ErrorLog {
    entries: Arc<Mutex<Vec<RecordedError>>>,
}

impl ErrorLog {
    pub fn record(&self, code: &str, message: &str, details: Option<String>) {
        tracing::error!("{}: {} ({:?})", code, message, details);
        self.entries.lock().unwrap().push(RecordedError {
            code: code.to_string(),
            message: message.to_string(),
            details,
            timestamp: Utc::now().timestamp_millis(),
        });
    }

    pub fn snapshot(&self) -> Vec<RecordedError> {
        self.entries.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// List the recorded application errors
pub async fn get_errors(State(state): State<AppState>) -> Json<Vec<RecordedError>> {
    Json(state.errors.snapshot())
}

/// Drop all recorded application errors
pub async fn clear_errors(State(state): State<AppState>) -> StatusCode {
    state.errors.clear();
    StatusCode::NO_CONTENT
}
