//! Operator password hashing.
//!
//! User records carry an argon2 PHC string (`$argon2id$v=19$...`), never the
//! password. Login verifies the submitted password against that string.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};

use pdv_core::{CoreError, CoreResult, Credentials};

/// Salted argon2id hashing for operator logins.
#[derive(Clone, Default)]
pub struct Argon2Credentials {
    argon2: Argon2<'static>,
}

impl Argon2Credentials {
    /// Hasher with the library's recommended parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters.
    ///
    /// Tests seed users on every run and use the minimum cost to stay fast.
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> CoreResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| CoreError::Credentials(format!("Invalid argon2 parameters: {}", e)))?;

        Ok(Argon2Credentials {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl std::fmt::Debug for Argon2Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Credentials").finish_non_exhaustive()
    }
}

impl Credentials for Argon2Credentials {
    fn hash(&self, password: &str) -> CoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CoreError::Credentials(format!("Failed to hash password: {}", e)))?;

        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> Argon2Credentials {
        Argon2Credentials::with_params(Params::MIN_M_COST, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_roundtrip() {
        let creds = fast();
        let hash = creds.hash("123456").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(creds.verify("123456", &hash));
        assert!(!creds.verify("1234567", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let creds = fast();
        let a = creds.hash("password").unwrap();
        let b = creds.hash("password").unwrap();

        assert_ne!(a, b);
        assert!(creds.verify("password", &a));
        assert!(creds.verify("password", &b));
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        let creds = fast();
        assert!(!creds.verify("password", "password"));
        assert!(!creds.verify("password", ""));
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            Argon2Credentials::with_params(0, 0, 0),
            Err(CoreError::Credentials(_))
        ));
    }
}
