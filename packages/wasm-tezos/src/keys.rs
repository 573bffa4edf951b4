//! Ed25519 key generation and tz1 address derivation
//!
//! Secret keys are 32-byte seeds encoded under the `edsk` seed prefix. The
//! public key is the standard ed25519 verifying key, and the tz1 address is the
//! Blake2b-160 hash of the public key bytes.

use crate::codec::{decode_as, encode};
use crate::error::WasmTezosError;
use crate::prefix::Prefix;
use blake2::digest::consts::U20;
use blake2::{Blake2b, Digest};
use core::fmt;
use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::Serialize;
use zeroize::{Zeroize, Zeroizing};

type Blake2b160 = Blake2b<U20>;

/// Length of an ed25519 seed
pub const SEED_LEN: usize = 32;
/// Length of an ed25519 public key
pub const PUBLIC_KEY_LEN: usize = 32;

/// Secret key, public key and address, all in base58check text form
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub secret_key: String,
    pub public_key: String,
    pub address: String,
}

// Manual Debug implementation to avoid exposing key material
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

/// Generate a new key pair from a fresh 32-byte OS random seed
pub fn generate() -> Result<KeyPair, WasmTezosError> {
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    getrandom::getrandom(&mut *seed)?;

    let key_pair = key_pair_from_seed(&seed);
    tracing::debug!(address = %key_pair.address, "generated key pair");
    Ok(key_pair)
}

/// Build the key pair for a known 32-byte seed
pub fn key_pair_from_seed(seed: &[u8; SEED_LEN]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    let public_key = signing_key.verifying_key().to_bytes();

    KeyPair {
        secret_key: encode(Prefix::Ed25519Seed, seed),
        public_key: encode(Prefix::Ed25519PublicKey, &public_key),
        address: address_from_public_key_bytes(&public_key),
    }
}

/// Derive the `edpk` public key for an `edsk` seed
pub fn secret_key_to_public_key(secret_key: &str) -> Result<String, WasmTezosError> {
    let signing_key = signing_key(secret_key)?;
    let public_key = signing_key.verifying_key().to_bytes();
    Ok(encode(Prefix::Ed25519PublicKey, &public_key))
}

/// Derive the tz1 address for an `edpk` public key
pub fn public_key_to_address(public_key: &str) -> Result<String, WasmTezosError> {
    let public_key = public_key_bytes(public_key)?;
    Ok(address_from_public_key_bytes(&public_key))
}

/// tz1 address of raw public key bytes
pub fn address_from_public_key_bytes(public_key: &[u8]) -> String {
    let hash = Blake2b160::digest(public_key);
    encode(Prefix::Ed25519Address, &hash)
}

/// Decode an `edsk` seed into an ed25519 signing key
pub(crate) fn signing_key(secret_key: &str) -> Result<SigningKey, WasmTezosError> {
    let payload = Zeroizing::new(decode_as(secret_key, Prefix::Ed25519Seed)?);

    let seed: Zeroizing<[u8; SEED_LEN]> =
        Zeroizing::new(payload.as_slice().try_into().map_err(|_| {
            WasmTezosError::InvalidKeyMaterial(format!(
                "Secret seed must be {} bytes, got {}",
                SEED_LEN,
                payload.len()
            ))
        })?);

    Ok(SigningKey::from_bytes(&seed))
}

/// Decode an `edpk` public key into its 32 raw bytes
pub(crate) fn public_key_bytes(public_key: &str) -> Result<[u8; PUBLIC_KEY_LEN], WasmTezosError> {
    let payload = decode_as(public_key, Prefix::Ed25519PublicKey)?;
    payload.as_slice().try_into().map_err(|_| {
        WasmTezosError::InvalidKeyMaterial(format!(
            "Public key must be {} bytes, got {}",
            PUBLIC_KEY_LEN,
            payload.len()
        ))
    })
}

/// Decode an `edpk` public key into an ed25519 verifying key
pub(crate) fn verifying_key(public_key: &str) -> Result<VerifyingKey, WasmTezosError> {
    let bytes = public_key_bytes(public_key)?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| WasmTezosError::InvalidKeyMaterial(format!("Invalid public key: {}", e)))
}
