use thiserror::Error;

/// Error type for JWT operations.
///
/// Validation variants are listed in the order the checks run. They exist for
/// diagnostics only: the HTTP layer renders every one of them as the same
/// unauthorized response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("failed to encode token")]
    EncodingFailed(String),

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid signing method")]
    InvalidSigningMethod,

    #[error("invalid token: signature is invalid")]
    InvalidSignature,

    #[error("invalid expiration time")]
    InvalidExpiration,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid issuer in token")]
    InvalidIssuer,

    #[error("invalid claims: {0}")]
    InvalidClaims(String),
}
