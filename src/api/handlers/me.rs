//! Resolve the identity behind a bearer token.
//!
//! Missing, malformed, forged and expired tokens all produce the same 401;
//! the specific reason is only logged.

use axum::{Json, extract::Extension, http::HeaderMap};
use std::sync::Arc;
use tracing::debug;

use super::{
    error::ApiError,
    extract_bearer_token,
    state::AuthState,
    types::{ErrorResponse, MeResponse},
};

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Return the username behind the bearer token", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired bearer token", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me(
    headers: HeaderMap,
    auth: Extension<Arc<AuthState>>,
) -> Result<Json<MeResponse>, ApiError> {
    let Some(token) = extract_bearer_token(&headers) else {
        debug!("Missing bearer token");
        return Err(ApiError::InvalidToken);
    };

    match auth.sessions().resolve(&token) {
        Ok(user) => Ok(Json(MeResponse { user })),
        Err(err) => {
            debug!("Bearer token rejected: {err}");
            Err(ApiError::InvalidToken)
        }
    }
}
