use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Cookie consulted when no bearer header is present.
pub const ACCESS_TOKEN_COOKIE: &str = "Accesstoken";

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Middleware that validates access tokens and adds the subject to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers()).ok_or_else(|| {
        tracing::warn!(uri = %req.uri(), "Missing access token");
        ApiError::Unauthorized("unauthorized".to_string())
    })?;

    let claims = state.authenticator.validate_token(&token).map_err(|e| {
        tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
        ApiError::Unauthorized(e.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.subject,
    });

    Ok(next.run(req).await)
}

/// Bearer header first, then the access token cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
    {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}
