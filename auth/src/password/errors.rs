use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error: a mismatch and a corrupt hash both
/// come back as `false`. Only hashing itself can fail.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
