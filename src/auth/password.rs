use sha2::{Digest, Sha256};

/// Digests a plaintext password for storage and comparison.
///
/// Unsalted SHA-256 rendered as 64 lowercase hex characters. Login recomputes the
/// digest and looks the user up by `(email, digest)`, so the output must stay stable.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_is_deterministic() {
        let hashed = hash_password("test_password123");
        assert_eq!(hashed, hash_password("test_password123"));
        assert_ne!(hashed, hash_password("wrong_password"));
    }

    #[test]
    fn test_digest_shape() {
        let hashed = hash_password("secret");
        assert_eq!(hashed.len(), 64);
        assert!(hashed
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_known_vector() {
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
