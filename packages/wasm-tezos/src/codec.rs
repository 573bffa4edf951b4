//! Tagged base58check encoding and decoding
//!
//! Text form of a tagged value: `base58(prefix || payload || checksum)` where the
//! checksum is the first 4 bytes of `sha256(sha256(prefix || payload))`.

use crate::base58check::{b58decode, b58encode, checksum, CHECKSUM_LEN};
use crate::error::{excerpt, WasmTezosError};
use crate::prefix::{match_prefix, Prefix};
use core::fmt;
use core::str::FromStr;

/// A payload together with the tag it is encoded under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedValue {
    pub prefix: Prefix,
    pub payload: Vec<u8>,
}

impl TaggedValue {
    pub fn new(prefix: Prefix, payload: impl Into<Vec<u8>>) -> Self {
        TaggedValue {
            prefix,
            payload: payload.into(),
        }
    }

    /// Base58check text of this value
    pub fn encode(&self) -> String {
        encode(self.prefix, &self.payload)
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for TaggedValue {
    type Err = WasmTezosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Encode a payload under a tag
pub fn encode(prefix: Prefix, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.bytes().len() + payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(prefix.bytes());
    data.extend_from_slice(payload);

    let checksum = checksum(&data);
    data.extend_from_slice(&checksum);

    b58encode(&data)
}

/// Decode base58check text into its tag and payload
pub fn decode(text: &str) -> Result<TaggedValue, WasmTezosError> {
    let raw = b58decode(text)?;

    if raw.len() <= CHECKSUM_LEN {
        tracing::debug!(len = raw.len(), "decoded value too short for checksum");
        return Err(WasmTezosError::DecodeError {
            input: excerpt(text),
            reason: format!("{} bytes is too short", raw.len()),
        });
    }

    let (body, provided) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(body) != provided {
        tracing::debug!(len = raw.len(), "base58check checksum mismatch");
        return Err(WasmTezosError::ChecksumMismatch(excerpt(text)));
    }

    let (prefix, payload) = match_prefix(body)?;
    tracing::trace!(tag = %prefix, len = payload.len(), "decoded tagged value");

    Ok(TaggedValue::new(prefix, payload))
}

/// Decode text and require its tag to satisfy `predicate`
///
/// `expected` describes the accepted tags in the `TypeMismatch` error.
pub fn decode_with<F>(text: &str, expected: &str, predicate: F) -> Result<TaggedValue, WasmTezosError>
where
    F: Fn(Prefix) -> bool,
{
    let value = decode(text)?;
    if !predicate(value.prefix) {
        return Err(WasmTezosError::TypeMismatch {
            expected: expected.to_string(),
            actual: value.prefix,
        });
    }
    Ok(value)
}

/// Decode text that must be tagged with `prefix`, returning the payload
pub fn decode_as(text: &str, prefix: Prefix) -> Result<Vec<u8>, WasmTezosError> {
    decode_with(text, prefix.name(), |actual| actual == prefix).map(|value| value.payload)
}

/// Validate a tz1/tz2/tz3/KT1 address
pub fn validate_address(address: &str) -> bool {
    match decode(address) {
        Ok(value) => value.prefix.is_address() && value.payload.len() == value.prefix.payload_len(),
        Err(_) => false,
    }
}
