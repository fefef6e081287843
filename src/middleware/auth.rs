use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{Identity, IdentitySource, Verification};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context resolved from the bearer credential
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub source: IdentitySource,
}

impl From<Identity> for AuthUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            source: identity.source,
        }
    }
}

/// Bearer authentication middleware that resolves the credential and injects
/// an `AuthUser` into the request
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    match state.verifier.verify(&token).await {
        Verification::Authenticated(identity) => {
            request.extensions_mut().insert(AuthUser::from(identity));
            Ok(next.run(request).await)
        }
        Verification::Rejected(reason) => {
            tracing::warn!("Authentication rejected: {}", reason);
            Err(ApiError::unauthorized(reason))
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .or_else(|| auth_str.strip_prefix("bearer "))
        .ok_or_else(|| "Authorization header must use Bearer token format".to_string())?;

    if token.trim().is_empty() {
        return Err("Empty bearer token".to_string());
    }
    Ok(token.trim().to_string())
}
