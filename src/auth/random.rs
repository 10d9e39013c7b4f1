use crate::types::{Result, TokenError};
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Number of random bytes behind every `jti`.
pub const JTI_BYTES: usize = 32;

/// Reads `n` bytes from the operating system CSPRNG and returns them
/// as lowercase hex (`2 * n` characters).
pub fn random_hex(n: usize) -> Result<String> {
    let mut bytes = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_hex_length() {
        let id = random_hex(JTI_BYTES).expect("should read entropy");
        assert_eq!(id.len(), 64);

        assert_eq!(random_hex(4).expect("should read entropy").len(), 8);
        assert!(random_hex(0).expect("should read entropy").is_empty());
    }

    #[test]
    fn test_random_hex_is_lowercase_hex() {
        let id = random_hex(JTI_BYTES).expect("should read entropy");
        assert!(
            id.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
            "id should be lowercase hex: {id}"
        );
    }

    #[test]
    fn test_random_hex_distinct() {
        let ids: HashSet<String> = (0..100)
            .map(|_| random_hex(16).expect("should read entropy"))
            .collect();
        assert_eq!(ids.len(), 100);
    }
}
