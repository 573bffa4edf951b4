//! WASM bindings for ed25519 key pairs.
//!
//! Wraps `keys::KeyPair` for JavaScript.

use crate::error::WasmTezosError;
use crate::keys::{self, KeyPair};
use crate::signer::{self, Watermark};
use wasm_bindgen::prelude::*;

/// WASM wrapper for a Tezos ed25519 key pair.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WasmKeyPair {
    inner: KeyPair,
}

#[wasm_bindgen]
impl WasmKeyPair {
    /// Generate a new random key pair.
    #[wasm_bindgen]
    pub fn generate() -> Result<WasmKeyPair, WasmTezosError> {
        keys::generate().map(|inner| WasmKeyPair { inner })
    }

    /// Create a key pair from an `edsk` secret seed.
    #[wasm_bindgen(js_name = fromSecretKey)]
    pub fn from_secret_key(secret_key: &str) -> Result<WasmKeyPair, WasmTezosError> {
        let public_key = keys::secret_key_to_public_key(secret_key)?;
        let address = keys::public_key_to_address(&public_key)?;
        Ok(WasmKeyPair {
            inner: KeyPair {
                secret_key: secret_key.to_string(),
                public_key,
                address,
            },
        })
    }

    /// Create a key pair from a raw 32-byte seed.
    #[wasm_bindgen(js_name = fromSeed)]
    pub fn from_seed(seed: &[u8]) -> Result<WasmKeyPair, WasmTezosError> {
        let seed: &[u8; keys::SEED_LEN] = seed.try_into().map_err(|_| {
            WasmTezosError::InvalidKeyMaterial(format!(
                "Seed must be {} bytes, got {}",
                keys::SEED_LEN,
                seed.len()
            ))
        })?;
        Ok(WasmKeyPair {
            inner: keys::key_pair_from_seed(seed),
        })
    }

    /// Get the `edsk` secret seed.
    #[wasm_bindgen(getter, js_name = secretKey)]
    pub fn secret_key(&self) -> String {
        self.inner.secret_key.clone()
    }

    /// Get the `edpk` public key.
    #[wasm_bindgen(getter, js_name = publicKey)]
    pub fn public_key(&self) -> String {
        self.inner.public_key.clone()
    }

    /// Get the tz1 address.
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> String {
        self.inner.address.clone()
    }

    /// Sign hex data and return the `edsig` signature.
    ///
    /// @param data - Hex-encoded bytes
    /// @param watermark - Optional "block", "endorsement" or "generic"
    #[wasm_bindgen]
    pub fn sign(&self, data: &str, watermark: Option<String>) -> Result<String, WasmTezosError> {
        let watermark = watermark
            .as_deref()
            .map(str::parse::<Watermark>)
            .transpose()?;
        signer::sign_bytes(&self.inner.secret_key, data, watermark).map(|signed| signed.signature)
    }
}
