use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::context::SigningContext;

/// Claims supplied by a caller that wants a token issued.
///
/// Timestamps are not part of the input: the codec derives them from the
/// signing context at generation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationClaims {
    pub subject: String,
    pub name: String,
    pub audience: String,
    pub issuer: String,
    pub channel: String,
}

impl AuthorizationClaims {
    /// Create claims for the given subject (user identifier).
    pub fn new(subject: impl ToString) -> Self {
        Self {
            subject: subject.to_string(),
            ..Self::default()
        }
    }

    /// Set display name.
    pub fn with_name(mut self, name: impl ToString) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, audience: impl ToString) -> Self {
        self.audience = audience.to_string();
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    /// Set the caller-defined channel tag.
    pub fn with_channel(mut self, channel: impl ToString) -> Self {
        self.channel = channel.to_string();
        self
    }
}

/// The claims structure embedded in a signed token.
///
/// Empty strings and zero timestamps are omitted from the serialized payload
/// and default back to empty/zero when absent from a decoded one. Unknown
/// fields in a decoded payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Claims {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Caller-defined tag
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel: String,

    /// Audience (who or what the token is intended for)
    #[serde(rename = "aud", skip_serializing_if = "String::is_empty")]
    pub audience: String,

    /// Expiration time (Unix timestamp)
    #[serde(
        rename = "exp",
        skip_serializing_if = "is_zero",
        deserialize_with = "timestamp"
    )]
    pub expires_at: i64,

    /// JWT ID, reserved for revocation and currently never set
    #[serde(rename = "jti", skip_serializing_if = "String::is_empty")]
    pub token_id: String,

    /// Issued at (Unix timestamp)
    #[serde(
        rename = "iat",
        skip_serializing_if = "is_zero",
        deserialize_with = "timestamp"
    )]
    pub issued_at: i64,

    /// Issuer (who created and signed the token)
    #[serde(rename = "iss", skip_serializing_if = "String::is_empty")]
    pub issuer: String,

    /// Not before (Unix timestamp)
    #[serde(
        rename = "nbf",
        skip_serializing_if = "is_zero",
        deserialize_with = "timestamp"
    )]
    pub not_before: i64,

    /// Subject (user identifier)
    #[serde(rename = "sub", skip_serializing_if = "String::is_empty")]
    pub subject: String,
}

impl Claims {
    /// Build the full claims for `input`, issued at `now` and expiring after the
    /// context lifetime.
    pub fn issue(input: &AuthorizationClaims, context: &SigningContext, now: DateTime<Utc>) -> Self {
        let issued_at = now.timestamp();

        Self {
            name: input.name.clone(),
            channel: input.channel.clone(),
            audience: input.audience.clone(),
            expires_at: issued_at + context.lifetime().num_seconds(),
            token_id: String::new(),
            issued_at,
            issuer: input.issuer.clone(),
            not_before: 0,
            subject: input.subject.clone(),
        }
    }

}

/// A token is still valid at its exact expiry second.
pub(crate) fn is_expired(expires_at: i64, current_timestamp: i64) -> bool {
    current_timestamp > expires_at
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

// Numeric claims may arrive as floats from other issuers; fractions are truncated.
fn timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;

    number
        .as_i64()
        .or_else(|| number.as_f64().map(|value| value as i64))
        .ok_or_else(|| serde::de::Error::custom("timestamp out of range"))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;

    fn context() -> SigningContext {
        SigningContext::new("secret", Duration::hours(24))
    }

    #[test]
    fn test_issue_copies_input_and_derives_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let input = AuthorizationClaims::new("user123")
            .with_name("alice")
            .with_audience("svc")
            .with_issuer("svc")
            .with_channel("web");

        let claims = Claims::issue(&input, &context(), now);

        assert_eq!(claims.subject, "user123");
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.audience, "svc");
        assert_eq!(claims.issuer, "svc");
        assert_eq!(claims.channel, "web");
        assert_eq!(claims.issued_at, now.timestamp());
        assert_eq!(claims.expires_at - claims.issued_at, 24 * 60 * 60);
        assert_eq!(claims.not_before, 0);
        assert!(claims.token_id.is_empty());
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let claims = Claims {
            subject: "user123".to_string(),
            expires_at: 1000,
            issued_at: 900,
            ..Claims::default()
        };

        let value = serde_json::to_value(&claims).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert_eq!(object["sub"], "user123");
        assert!(!object.contains_key("nbf"));
        assert!(!object.contains_key("jti"));
        assert!(!object.contains_key("iss"));
    }

    #[test]
    fn test_deserialization_defaults_and_ignores_unknown_fields() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "user123",
            "exp": 1000.0,
            "iss": "svc",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(claims.subject, "user123");
        assert_eq!(claims.expires_at, 1000);
        assert_eq!(claims.issuer, "svc");
        assert!(claims.name.is_empty());
        assert_eq!(claims.issued_at, 0);
    }

    #[test]
    fn test_is_expired() {
        assert!(!is_expired(1000, 999));
        assert!(!is_expired(1000, 1000));
        assert!(is_expired(1000, 1001));
    }
}
