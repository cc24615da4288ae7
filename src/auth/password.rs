use sha256::digest;

/// SHA256 digest stored in place of the password.
pub fn hash(password: &str) -> String {
    digest(password.to_string())
}

pub fn verify(password: &str, stored: &str) -> bool {
    hash(password) == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let stored = hash("test_password123");

        pretty_assertions::assert_eq!(stored.len(), 64);
        assert!(verify("test_password123", &stored));
        assert!(!verify("test_password124", &stored));
    }
}
