use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - Service status summary
///
/// Connectivity flags here reflect startup state; `/health` probes live.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let supabase = if state.verifier.has_provider() { "connected" } else { "not configured" };
    let mongodb = if state.store_connected_at_startup { "connected" } else { "not connected" };

    Json(json!({
        "message": "EduSign API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
        "services": {
            "supabase": supabase,
            "mongodb": mongodb,
        }
    }))
}

/// GET /health - Liveness probe
///
/// Pings the course store on every call, so `"connected"` means the store
/// answered just now.
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-01-01T12:00:00Z",
///   "services": { "mongodb": "connected", "supabase": "configured" },
///   "environment": {
///     "supabase_url_set": true,
///     "supabase_key_set": true,
///     "mongodb_url": "mongodb://localhost:27017"
///   }
/// }
/// ```
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let mongodb = match &state.store {
        Some(store) => match store.ping().await {
            Ok(()) => "connected".to_string(),
            Err(e) => format!("error: {}", e),
        },
        None => "disconnected".to_string(),
    };

    let supabase = if state.verifier.has_provider() { "configured" } else { "not configured" };
    let auth = &state.config.auth;

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "services": {
            "mongodb": mongodb,
            "supabase": supabase,
        },
        "environment": {
            "supabase_url_set": auth.supabase_url.is_some(),
            "supabase_key_set": auth.supabase_service_role_key.is_some(),
            "mongodb_url": state.config.database.redacted_url(),
        }
    }))
}
