//! Error types for wasm-tezos

use crate::prefix::Prefix;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Main error type for wasm-tezos operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WasmTezosError {
    /// Input is not valid base58, or too short to carry a checksum
    #[error("Invalid base58 {input:?}: {reason}")]
    DecodeError { input: String, reason: String },
    /// Trailing 4 bytes do not match the double SHA-256 of the body
    #[error("Checksum mismatch for {0:?}")]
    ChecksumMismatch(String),
    /// Decoded body starts with no known prefix (or tag name is unknown)
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),
    /// Value is tagged, but not with the tag the caller asked for
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: Prefix },
    /// Seed, key or signature has the wrong length for ed25519
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),
    /// Hex input could not be decoded
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    /// Argument outside the accepted set (watermark name, tez amount, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Operation body failed validation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    /// The OS random source failed
    #[error("Entropy source failure: {0}")]
    Entropy(String),
}

/// Leading characters of `text`, for error messages that must not carry a whole key
pub(crate) fn excerpt(text: &str) -> String {
    const SHOWN: usize = 6;
    match text.char_indices().nth(SHOWN) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

impl From<hex::FromHexError> for WasmTezosError {
    fn from(err: hex::FromHexError) -> Self {
        WasmTezosError::InvalidHex(err.to_string())
    }
}

impl From<getrandom::Error> for WasmTezosError {
    fn from(err: getrandom::Error) -> Self {
        WasmTezosError::Entropy(err.to_string())
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<WasmTezosError> for JsValue {
    fn from(err: WasmTezosError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
