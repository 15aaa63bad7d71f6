use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `/signup` and `/signin`. The password never appears in `Debug` output.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub username: String,
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn credentials_request_hides_password() {
        let request: CredentialsRequest =
            serde_json::from_str(r#"{"username":"alice","password":"s3cret!"}"#).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password.expose_secret(), "s3cret!");
        assert!(!format!("{request:?}").contains("s3cret!"));
    }

    #[test]
    fn token_response_shape() {
        let response = TokenResponse {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"access_token": "abc", "token_type": "bearer"})
        );
    }
}
