//! Base58 with a double SHA-256 checksum
//!
//! Uses the bs58 crate with the Bitcoin alphabet, which is what Tezos uses.

use crate::error::{excerpt, WasmTezosError};
use sha2::{Digest, Sha256};

/// Checksum length appended to every encoded value
pub const CHECKSUM_LEN: usize = 4;

/// Encode bytes as base58 (no checksum)
pub fn b58encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode base58 text (no checksum check)
pub fn b58decode(text: &str) -> Result<Vec<u8>, WasmTezosError> {
    bs58::decode(text)
        .into_vec()
        .map_err(|e| WasmTezosError::DecodeError {
            input: excerpt(text),
            reason: e.to_string(),
        })
}

/// First 4 bytes of SHA-256(SHA-256(bytes))
pub fn checksum(bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let first_hash = Sha256::digest(bytes);
    let second_hash = Sha256::digest(first_hash);

    let mut result = [0u8; CHECKSUM_LEN];
    result.copy_from_slice(&second_hash[..CHECKSUM_LEN]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_known_value() {
        // sha256d("") = 5df6e0e2...
        assert_eq!(checksum(b""), [0x5d, 0xf6, 0xe0, 0xe2]);
    }

    #[test]
    fn test_leading_zeros_preserved() {
        let bytes = [0u8, 0, 1, 2, 3];
        let text = b58encode(&bytes);
        assert!(text.starts_with("11"));
        assert_eq!(b58decode(&text).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_non_alphabet() {
        // 0, O, I and l are excluded from the Bitcoin alphabet
        for text in ["0abc", "abcO", "Iabc", "abl", "tz1+"] {
            assert!(
                matches!(b58decode(text), Err(WasmTezosError::DecodeError { .. })),
                "{} should not decode",
                text
            );
        }
    }
}
