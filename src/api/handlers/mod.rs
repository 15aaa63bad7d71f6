//! Route handlers and the helpers they share.

pub mod error;
pub mod health;
pub mod me;
pub mod root;
pub mod signin;
pub mod signup;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use state::AuthState;

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, header::AUTHORIZATION},
};
use tracing::debug;

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. Returns `None` when the header is
/// missing, uses another scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Map a body extraction failure to `ApiError::MissingPayload`.
///
/// Only the rejection status and kind are logged; the rejection text can echo
/// parts of the body, which may hold a password.
pub fn payload_rejected(rejection: &JsonRejection) -> ApiError {
    debug!(
        status = %rejection.status(),
        kind = rejection_kind(rejection),
        "Rejected request payload"
    );
    ApiError::MissingPayload
}

fn rejection_kind(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "data",
        JsonRejection::JsonSyntaxError(_) => "syntax",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        JsonRejection::BytesRejection(_) => "body",
        _ => "other",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::handlers::types::CredentialsRequest;
    use axum::{
        Json,
        body::Body,
        extract::FromRequest,
        http::{HeaderValue, Request, header::CONTENT_TYPE},
    };

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            extract_bearer_token(&headers("Bearer abc.def.ghi")),
            Some("abc.def.ghi".to_string())
        );
        for value in ["bearer abc", "BEARER abc", "BeArEr abc", "Bearer   abc  "] {
            assert_eq!(
                extract_bearer_token(&headers(value)),
                Some("abc".to_string()),
                "{value}"
            );
        }
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
        assert_eq!(extract_bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer    ")), None);
        assert_eq!(extract_bearer_token(&headers("abc.def.ghi")), None);
        assert_eq!(extract_bearer_token(&headers("Bearerabc")), None);
        assert_eq!(extract_bearer_token(&headers("Token abc")), None);
    }

    async fn reject(content_type: Option<&str>, body: &str) -> JsonRejection {
        let mut builder = Request::builder().method("POST").uri("/signin");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        match Json::<CredentialsRequest>::from_request(request, &()).await {
            Ok(_) => panic!("payload should have been rejected"),
            Err(rejection) => rejection,
        }
    }

    #[tokio::test]
    async fn rejected_payloads_map_to_missing_payload() {
        let cases = [
            (Some("application/json"), r#"{"username":"alice","password":"hunter2""#, "syntax"),
            (Some("application/json"), r#"{"password":"hunter2"}"#, "data"),
            (None, r#"{"username":"alice","password":"hunter2"}"#, "content_type"),
        ];

        for (content_type, body, kind) in cases {
            let rejection = reject(content_type, body).await;
            assert_eq!(rejection_kind(&rejection), kind, "{body}");
            assert!(!rejection_kind(&rejection).contains("hunter2"));
            assert_eq!(payload_rejected(&rejection), ApiError::MissingPayload);
        }
    }
}
