//! Randomness for secrets

use rand::{RngCore, rngs::OsRng};

/// `len` bytes from the OS generator, e.g. an ephemeral token signing key
pub fn secret_bytes(len: usize) -> Vec<u8> {
    let mut secret = vec![0u8; len];
    OsRng.fill_bytes(&mut secret);
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_bytes_length() {
        assert_eq!(secret_bytes(32).len(), 32);
        assert!(secret_bytes(0).is_empty());
    }

    #[test]
    fn test_ephemeral_keys_differ() {
        assert_ne!(secret_bytes(32), secret_bytes(32));
    }
}
