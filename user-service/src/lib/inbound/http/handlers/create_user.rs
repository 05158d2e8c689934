use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::require_password;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn create_user(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await?;
    tracing::info!(user_id = %user.id, created_by = %actor.user_id, "User registered");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        "user created",
        UserData::from(&user),
    ))
}

/// HTTP request body for creating a user (raw JSON)
///
/// Missing fields deserialize as empty strings so they surface as
/// validation errors rather than body rejections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let name = UserName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = require_password(self.password)?;
        Ok(CreateUserCommand::new(name, email, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::PasswordError;
    use crate::user::errors::UserNameError;

    fn request(name: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request_builds_command() {
        let command = request("Ada", "ada@test.com", "secret")
            .try_into_command()
            .unwrap();

        assert_eq!(command.name.as_str(), "Ada");
        assert_eq!(command.email.as_str(), "ada@test.com");
        assert_eq!(command.password, "secret");
    }

    #[test]
    fn test_required_fields() {
        assert!(matches!(
            request("", "ada@test.com", "secret").try_into_command(),
            Err(UserError::InvalidName(UserNameError::Missing))
        ));
        assert!(matches!(
            request("Ada", "ada@test.com", "").try_into_command(),
            Err(UserError::Password(PasswordError::Missing))
        ));
    }
}
