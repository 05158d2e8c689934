use std::fmt;

use chrono::Duration;

/// Process-wide signing configuration: the shared HMAC secret and the token
/// lifetime.
///
/// Built once at startup and handed by reference to every codec. Changing the
/// secret invalidates every token issued with the previous one. An empty
/// secret is accepted here; treating it as a misconfiguration is the
/// operator's job.
#[derive(Clone)]
pub struct SigningContext {
    secret: Vec<u8>,
    lifetime: Duration,
}

impl SigningContext {
    /// Create a signing context.
    ///
    /// # Arguments
    /// * `secret` - Shared secret used for HMAC signing and verification
    /// * `lifetime` - Duration between a token's `iat` and `exp`
    pub fn new(secret: impl AsRef<[u8]>, lifetime: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            lifetime,
        }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn has_empty_secret(&self) -> bool {
        self.secret.is_empty()
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("secret", &"[redacted]")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
