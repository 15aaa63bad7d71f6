use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::{
    error::ApiError,
    payload_rejected,
    state::AuthState,
    types::{CredentialsRequest, ErrorResponse, TokenResponse},
};

const TOKEN_TYPE: &str = "bearer";

#[utoipa::path(
    post,
    path = "/signin",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials accepted; bearer token issued", body = TokenResponse, content_type = "application/json"),
        (status = 400, description = "Missing payload", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    ),
    tag = "auth"
)]
// axum handler for signin
#[instrument(skip(auth, payload))]
pub async fn signin(
    auth: Extension<Arc<AuthState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| payload_rejected(&rejection))?;

    let account = auth
        .credentials()
        .verify(&request.username, &request.password)
        .await?;

    let issued = auth.sessions().issue(&account.username).map_err(|err| {
        error!("Failed to issue token: {err}");
        ApiError::Internal
    })?;

    debug!(expires_at = issued.expires_at, "Token issued");

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: TOKEN_TYPE.to_string(),
    }))
}
