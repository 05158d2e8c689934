use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::require_password;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn sign_in(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SignInRequest>, ApiError>,
) -> Result<ApiSuccess<SignInResponseData>, ApiError> {
    let command = body.try_into_command()?;
    let email = command.email.as_str().to_string();

    state
        .user_service
        .sign_in(command)
        .await
        .map_err(|e| {
            tracing::warn!(email = %email, error = %e, "Sign in rejected");
            ApiError::from(e)
        })
        .map(|token| ApiSuccess::new(StatusCode::OK, "sign in success", token.into()))
}

/// HTTP request body for signing in (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl SignInRequest {
    fn try_into_command(self) -> Result<SignInCommand, UserError> {
        Ok(SignInCommand {
            email: EmailAddress::new(self.email)?,
            password: require_password(self.password)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponseData {
    #[serde(rename = "type")]
    pub token_type: String,
    pub access_token: String,
}

impl From<AccessToken> for SignInResponseData {
    fn from(token: AccessToken) -> Self {
        Self {
            token_type: token.token_type,
            access_token: token.access_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_names() {
        let data = SignInResponseData::from(AccessToken::bearer("abc".to_string()));
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "type": "Bearer", "accessToken": "abc" })
        );
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let request = SignInRequest {
            email: "ada@test.com".to_string(),
            password: String::new(),
        };

        assert!(matches!(
            request.try_into_command(),
            Err(UserError::Password(_))
        ));
    }
}
