use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Malformed password hash")]
    MalformedHash,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a password with a fresh random salt, as an Argon2id PHC string
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(encoded).map_err(|_| PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(_) => Err(PasswordError::MalformedHash),
    }
}

/// Check a login attempt
///
/// An unknown account is verified against a throwaway hash so both outcomes
/// cost one Argon2 run.
pub fn check_credentials(password: &str, stored: Option<&str>) -> Result<bool, PasswordError> {
    check_with(password, stored, verify_password)
}

fn check_with<F>(password: &str, stored: Option<&str>, verify: F) -> Result<bool, PasswordError>
where
    F: Fn(&str, &str) -> Result<bool, PasswordError>,
{
    match stored {
        Some(encoded) => verify(password, encoded),
        None => {
            verify(password, dummy_hash()?)?;
            Ok(false)
        }
    }
}

fn dummy_hash() -> Result<&'static str, PasswordError> {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    DUMMY_HASH
        .get_or_init(|| hash_password("fitswap-unknown-account").ok())
        .as_deref()
        .ok_or_else(|| PasswordError::Hashing("dummy hash unavailable".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_hash_and_verify() {
        let encoded = hash_password("correct horse").unwrap();

        assert!(encoded.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &encoded).unwrap());
        assert!(!verify_password("wrong horse", &encoded).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_plaintext_is_not_a_hash() {
        assert_eq!(
            verify_password("hunter2", "hunter2"),
            Err(PasswordError::MalformedHash)
        );
        assert_eq!(
            verify_password("x", "sha256$1$00$00"),
            Err(PasswordError::MalformedHash)
        );
    }

    #[test]
    fn test_unknown_account_runs_verifier() {
        let calls = Cell::new(0);
        let counting = |password: &str, encoded: &str| {
            calls.set(calls.get() + 1);
            verify_password(password, encoded)
        };

        let stored = hash_password("correct horse").unwrap();
        assert!(check_with("correct horse", Some(&stored), &counting).unwrap());
        assert_eq!(calls.get(), 1);

        assert!(!check_with("wrong horse", Some(&stored), &counting).unwrap());
        assert_eq!(calls.get(), 2);

        // No account: still one verification, always rejected
        assert!(!check_with("correct horse", None, &counting).unwrap());
        assert_eq!(calls.get(), 3);

        assert!(!check_with("fitswap-unknown-account", None, &counting).unwrap());
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_check_credentials() {
        let stored = hash_password("correct horse").unwrap();

        assert!(check_credentials("correct horse", Some(&stored)).unwrap());
        assert!(!check_credentials("wrong horse", Some(&stored)).unwrap());
        assert!(!check_credentials("correct horse", None).unwrap());
    }
}
