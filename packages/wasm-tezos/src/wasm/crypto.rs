//! WASM bindings for tagged encoding, keys and signing
//!
//! CryptoNamespace provides static methods over the core codec, key and signer modules

use crate::codec;
use crate::error::WasmTezosError;
use crate::keys;
use crate::prefix::Prefix;
use crate::signer::{self, Watermark};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Namespace for encoding, key and signing operations
#[wasm_bindgen]
pub struct CryptoNamespace;

#[derive(Serialize)]
struct DecodedValue {
    tag: &'static str,
    payload: String,
}

#[wasm_bindgen]
impl CryptoNamespace {
    /// Encode raw bytes under a tag
    ///
    /// # Arguments
    /// * `tag` - Tag name, e.g. "address-ed25519" or "operation-hash"
    /// * `payload` - Raw payload bytes
    #[wasm_bindgen]
    pub fn encode(tag: &str, payload: &[u8]) -> Result<String, WasmTezosError> {
        let prefix: Prefix = tag.parse()?;
        Ok(codec::encode(prefix, payload))
    }

    /// Decode base58check text
    ///
    /// # Returns
    /// `{ tag, payload }` with the payload as lowercase hex
    #[wasm_bindgen]
    pub fn decode(text: &str) -> Result<JsValue, JsValue> {
        let value = codec::decode(text)?;
        to_js_value(&DecodedValue {
            tag: value.prefix.name(),
            payload: hex::encode(&value.payload),
        })
    }

    /// Decode base58check text that must carry `tag`, returning the raw payload
    #[wasm_bindgen(js_name = decodeAs)]
    pub fn decode_as(text: &str, tag: &str) -> Result<Vec<u8>, WasmTezosError> {
        let prefix: Prefix = tag.parse()?;
        codec::decode_as(text, prefix)
    }

    /// Generate a new key pair
    ///
    /// # Returns
    /// `{ secretKey, publicKey, address }`
    #[wasm_bindgen(js_name = generateKey)]
    pub fn generate_key() -> Result<JsValue, JsValue> {
        let key_pair = keys::generate()?;
        to_js_value(&key_pair)
    }

    #[wasm_bindgen(js_name = secretKeyToPublicKey)]
    pub fn secret_key_to_public_key(secret_key: &str) -> Result<String, WasmTezosError> {
        keys::secret_key_to_public_key(secret_key)
    }

    #[wasm_bindgen(js_name = publicKeyToAddress)]
    pub fn public_key_to_address(public_key: &str) -> Result<String, WasmTezosError> {
        keys::public_key_to_address(public_key)
    }

    /// Sign hex data
    ///
    /// # Arguments
    /// * `secret_key` - `edsk` seed
    /// * `data` - Hex-encoded bytes (with or without 0x prefix)
    /// * `watermark` - Optional "block", "endorsement" or "generic"
    ///
    /// # Returns
    /// `{ signature, signedData }`
    #[wasm_bindgen(js_name = signBytes)]
    pub fn sign_bytes(
        secret_key: &str,
        data: &str,
        watermark: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let watermark = parse_watermark(watermark)?;
        let signed = signer::sign_bytes(secret_key, data, watermark)?;
        to_js_value(&signed)
    }

    /// Sign a forged operation under the generic watermark
    ///
    /// # Returns
    /// `{ signature, signedData, operationId }`
    #[wasm_bindgen(js_name = signOperation)]
    pub fn sign_operation(secret_key: &str, operation: &str) -> Result<JsValue, JsValue> {
        let signed = signer::sign_operation(secret_key, operation)?;
        to_js_value(&signed)
    }

    /// Operation hash of hex-encoded signed operation bytes
    #[wasm_bindgen(js_name = operationId)]
    pub fn operation_id(signed_data: &str) -> Result<String, WasmTezosError> {
        signer::operation_id(signed_data)
    }

    #[wasm_bindgen(js_name = verifySignature)]
    pub fn verify_signature(
        public_key: &str,
        signature: &str,
        data: &str,
        watermark: Option<String>,
    ) -> Result<bool, WasmTezosError> {
        let watermark = parse_watermark(watermark)?;
        signer::verify_signature(public_key, signature, data, watermark)
    }

    /// Check whether text is a valid tz1/tz2/tz3/KT1 address
    #[wasm_bindgen(js_name = validateAddress)]
    pub fn validate_address(address: &str) -> bool {
        codec::validate_address(address)
    }
}

fn parse_watermark(watermark: Option<String>) -> Result<Option<Watermark>, WasmTezosError> {
    watermark.as_deref().map(str::parse).transpose()
}

/// Convert a serializable value to JsValue using serde_wasm_bindgen
///
/// Maps (Micheline `parameters`, `script`) become plain objects, not JS `Map`s.
pub(crate) fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
