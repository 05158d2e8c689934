use super::claims::AuthorizationClaims;
use super::claims::Claims;
use super::errors::JwtError;

/// Capability to issue and verify access tokens.
///
/// Services hold this as `Arc<dyn TokenCodec>` so the signing scheme can change
/// (for example to an asymmetric algorithm) without touching callers.
pub trait TokenCodec: Send + Sync + 'static {
    /// Sign `claims` into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - The signing primitive failed
    fn generate_token(&self, claims: &AuthorizationClaims) -> Result<String, JwtError>;

    /// Verify `token` and return the claims it carries.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token or undecodable payload
    /// * `InvalidSigningMethod` - Header names an algorithm this codec does not accept
    /// * `InvalidSignature` - Signature does not match
    /// * `InvalidExpiration` - `exp` claim missing or not numeric
    /// * `TokenExpired` - Current time is past `exp`
    /// * `InvalidIssuer` - `iss` claim missing or not a string
    /// * `InvalidClaims` - A claim has an unexpected type
    fn validate_token(&self, token: &str) -> Result<Claims, JwtError>;
}
