use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::crypto::verify;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde_json::Map;
use serde_json::Value;

use super::claims::is_expired;
use super::claims::AuthorizationClaims;
use super::claims::Claims;
use super::codec::TokenCodec;
use super::context::SigningContext;
use super::errors::JwtError;

/// HMAC token codec.
///
/// Issues HS256 tokens and accepts any HMAC-family algorithm on validation.
/// Holds its own copy of the signing context, so it is immutable after
/// construction and safe to share across tasks.
pub struct JwtHandler {
    context: SigningContext,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler from the process signing context.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(context: &SigningContext) -> Self {
        Self {
            context: context.clone(),
            encoding_key: EncodingKey::from_secret(context.secret()),
            decoding_key: DecodingKey::from_secret(context.secret()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims as if the current time were `now`.
    pub fn generate_token_at(
        &self,
        claims: &AuthorizationClaims,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::issue(claims, &self.context, now);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let (message, signature) = token.rsplit_once('.').ok_or(JwtError::InvalidToken)?;
        let (header, payload) = message.split_once('.').ok_or(JwtError::InvalidToken)?;
        if header.is_empty() || payload.is_empty() || payload.contains('.') {
            return Err(JwtError::InvalidToken);
        }

        let algorithm = Self::signing_algorithm(header)?;

        let verified = verify(signature, message.as_bytes(), &self.decoding_key, algorithm)
            .map_err(|_| JwtError::InvalidSignature)?;
        if !verified {
            return Err(JwtError::InvalidSignature);
        }

        let claims: Map<String, Value> = URL_SAFE_NO_PAD
            .decode(payload)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(JwtError::InvalidToken)?;

        let expires_at = claims
            .get("exp")
            .and_then(Value::as_f64)
            .ok_or(JwtError::InvalidExpiration)? as i64;

        if is_expired(expires_at, now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        if !claims.get("iss").is_some_and(Value::is_string) {
            return Err(JwtError::InvalidIssuer);
        }

        serde_json::from_value(Value::Object(claims))
            .map_err(|e| JwtError::InvalidClaims(e.to_string()))
    }

    /// Decode the header segment and return its algorithm if it is HMAC-based.
    fn signing_algorithm(header: &str) -> Result<Algorithm, JwtError> {
        let header: Map<String, Value> = URL_SAFE_NO_PAD
            .decode(header)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(JwtError::InvalidToken)?;

        match header.get("alg").and_then(Value::as_str) {
            Some("HS256") => Ok(Algorithm::HS256),
            Some("HS384") => Ok(Algorithm::HS384),
            Some("HS512") => Ok(Algorithm::HS512),
            _ => Err(JwtError::InvalidSigningMethod),
        }
    }
}

impl TokenCodec for JwtHandler {
    fn generate_token(&self, claims: &AuthorizationClaims) -> Result<String, JwtError> {
        self.generate_token_at(claims, Utc::now())
    }

    fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token_at(token, Utc::now())
    }
}
