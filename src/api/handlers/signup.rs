use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    error::ApiError,
    payload_rejected,
    state::AuthState,
    types::{CredentialsRequest, ErrorResponse, MessageResponse},
};

#[utoipa::path(
    post,
    path = "/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse, content_type = "application/json"),
        (status = 400, description = "Username already exists or input is invalid", body = ErrorResponse),
    ),
    tag = "auth"
)]
// axum handler for signup
#[instrument(skip(auth, payload))]
pub async fn signup(
    auth: Extension<Arc<AuthState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| payload_rejected(&rejection))?;

    let account = auth
        .credentials()
        .register(&request.username, &request.password)
        .await?;

    info!(account_id = %account.id, "User created");

    Ok(Json(MessageResponse {
        message: "User created successfully".to_string(),
    }))
}
