/// Salted bcrypt hash of `plaintext`.
pub fn hash_password(plaintext: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
}

/// Constant-time check of `plaintext` against a stored hash. A malformed hash
/// never matches.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(
    plaintext: String,
    hash: String,
) -> Result<bool, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || verify_password(&plaintext, &hash)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("admin123").unwrap();
        assert_ne!(hash, "admin123");
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let h1 = hash_password("admin123").unwrap();
        let h2 = hash_password("admin123").unwrap();
        assert_ne!(h1, h2);
    }

    #[tokio::test]
    async fn blocking_verify_matches_inline_verify() {
        let hash = hash_password("admin123").unwrap();
        assert!(verify_password_blocking("admin123".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("wrong".into(), hash).await.unwrap());
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!verify_password("admin123", "not-a-bcrypt-hash"));
        assert!(!verify_password("", ""));
    }
}
