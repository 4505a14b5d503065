/// Password hashing using Argon2id
///
/// Passwords are hashed with Argon2id and a random 16-byte salt drawn from
/// the OS RNG. The output is a PHC string that embeds the algorithm,
/// parameters, salt and digest, so verification needs nothing beyond the
/// stored string itself.
///
/// # Parameters
///
/// - Memory: 64 MB (65536 KB)
/// - Iterations: 3 passes
/// - Parallelism: 4 lanes
/// - Output: 32-byte hash
///
/// # Example
///
/// ```
/// use inkpost_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secret123")?;
///
/// assert!(verify_password("secret123", &hash));
/// assert!(!verify_password("wrong", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash a password
    #[error("failed to hash password: {0}")]
    HashError(String),
}

/// Hashes a password with Argon2id and a fresh random salt
///
/// Returns a PHC string, e.g.
/// `$argon2id$v=19$m=65536,t=3,p=4$c2FsdA$...`. Because the salt is random,
/// hashing the same plaintext twice produces different strings.
///
/// # Errors
///
/// Returns [`PasswordError::HashError`] if the Argon2 parameters are
/// rejected or hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored digest
///
/// Comparison is constant-time. This function never fails: a digest that
/// cannot be parsed is treated the same as a wrong password, so callers
/// get a plain `bool` and cannot accidentally surface "your stored hash is
/// garbage" to a client.
///
/// # Example
///
/// ```
/// use inkpost_shared::auth::password::verify_password;
///
/// assert!(!verify_password("anything", "not-a-phc-string"));
/// ```
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };

    // Parameters are embedded in the digest.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123").expect("hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let password = "same_password";

        let hash1 = hash_password(password).expect("hash 1 should succeed");
        let hash2 = hash_password(password).expect("hash 2 should succeed");

        // Different salts = different digests
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = hash_password(password).expect("hash should succeed");

        assert!(verify_password(password, &hash));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correct_password").expect("hash should succeed");

        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_verify_password_empty() {
        let hash = hash_password("password").expect("hash should succeed");

        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_verify_password_malformed_digest_is_false() {
        assert!(!verify_password("password", "invalid_hash"));
        assert!(!verify_password("password", "$argon2id$invalid"));
        assert!(!verify_password("password", ""));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
        ];

        for password in passwords {
            let hash = hash_password(password).expect("hash should succeed");
            assert!(
                verify_password(password, &hash),
                "password '{}' should verify",
                password
            );
        }
    }
}
