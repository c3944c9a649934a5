//! # Credentials
//!
//! The seam between operator login and whatever password hashing scheme the
//! server uses. Core code never sees plaintext comparison; it only knows how
//! to ask for a hash and a verification.

use crate::error::CoreResult;

/// Password hashing and verification.
///
/// Implementations must produce salted hashes: hashing the same password
/// twice yields different strings that both verify.
pub trait Credentials: Send + Sync {
    /// Hashes a plaintext password for storage.
    fn hash(&self, password: &str) -> CoreResult<String>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// A malformed hash is treated as a mismatch, never as an error, so a
    /// corrupt record cannot be told apart from a wrong password.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reversible stand-in used to exercise the trait contract.
    struct Reversed;

    impl Credentials for Reversed {
        fn hash(&self, password: &str) -> CoreResult<String> {
            Ok(format!("rev${}", password.chars().rev().collect::<String>()))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.hash(password).map(|h| h == hash).unwrap_or(false)
        }
    }

    #[test]
    fn test_trait_object_usage() {
        let creds: Box<dyn Credentials> = Box::new(Reversed);
        let hash = creds.hash("123456").unwrap();
        assert!(creds.verify("123456", &hash));
        assert!(!creds.verify("654321", &hash));
    }
}
