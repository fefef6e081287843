use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::bearer_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(course_routes(state.clone()))
        .fallback(|| async { ApiError::not_found("Route not found") })
        .with_state(state.clone());

    let router = match cors_layer(&state.config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    if state.config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn course_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/courses",
            get(protected::courses_get).post(protected::course_post),
        )
        .route_layer(from_fn_with_state(state, bearer_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
