use ::bcrypt::hash;
use ::bcrypt::verify;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides salted adaptive password hashing (internally uses bcrypt).
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor used for every new hash.
    pub const COST: u32 = 10;

    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self { cost: Self::COST }
    }

    /// Hash a plaintext password securely.
    ///
    /// Any string is accepted, including the empty string. A random salt is
    /// generated for every call.
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$10$...`), including cost and salt
    ///
    /// # Errors
    /// * `HashingFailed` - The bcrypt primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns false for a wrong password and for a hash that cannot be
    /// parsed; callers cannot tell the two apart.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash could not be verified");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
        assert!(!hasher.verify(&format!("{password}x"), &hash));
    }

    #[test]
    fn test_hash_uses_fixed_cost() {
        let hash = PasswordHasher::new().hash("password").unwrap();
        assert!(hash.starts_with("$2b$10$"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("password", &first));
        assert!(hasher.verify("password", &second));
    }

    #[test]
    fn test_empty_password() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("").expect("Failed to hash empty password");

        assert!(hasher.verify("", &hash));
        assert!(!hasher.verify("x", &hash));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$2b$10$tooshort"));
    }
}
