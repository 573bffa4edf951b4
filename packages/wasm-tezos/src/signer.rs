//! Watermarked ed25519 signing and operation ids
//!
//! Data is prefixed with a one-byte watermark, hashed with Blake2b-256 and the
//! digest is signed. The watermark keeps a signature made in one context (block,
//! endorsement, generic operation) from being valid in another.

use crate::codec::{decode_with, encode};
use crate::error::WasmTezosError;
use crate::keys::{signing_key, verifying_key};
use crate::prefix::Prefix;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use core::str::FromStr;
use ed25519_dalek::{Signature, Signer};
use serde::Serialize;

type Blake2b256 = Blake2b<U32>;

/// Length of a raw ed25519 signature
pub const SIGNATURE_LEN: usize = 64;

/// Signing context, prepended to the data as a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watermark {
    Block,
    Endorsement,
    Generic,
}

impl Watermark {
    pub fn byte(self) -> u8 {
        match self {
            Watermark::Block => 0x01,
            Watermark::Endorsement => 0x02,
            Watermark::Generic => 0x03,
        }
    }
}

impl FromStr for Watermark {
    type Err = WasmTezosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Watermark::Block),
            "endorsement" => Ok(Watermark::Endorsement),
            "generic" => Ok(Watermark::Generic),
            _ => Err(WasmTezosError::InvalidInput(format!(
                "Unknown watermark: {}",
                s
            ))),
        }
    }
}

/// Result of signing bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedBytes {
    /// `edsig` signature text
    pub signature: String,
    /// Hex of the data followed by the raw signature
    pub signed_data: String,
}

/// Result of signing a forged operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOperation {
    pub signature: String,
    pub signed_data: String,
    /// `o...` hash of the signed bytes
    pub operation_id: String,
}

/// Sign hex-encoded data, optionally under a watermark
pub fn sign_bytes(
    secret_key: &str,
    data_hex: &str,
    watermark: Option<Watermark>,
) -> Result<SignedBytes, WasmTezosError> {
    let data = decode_hex(data_hex)?;
    sign_raw_bytes(secret_key, &data, watermark)
}

/// Sign raw data, optionally under a watermark
pub fn sign_raw_bytes(
    secret_key: &str,
    data: &[u8],
    watermark: Option<Watermark>,
) -> Result<SignedBytes, WasmTezosError> {
    let signing_key = signing_key(secret_key)?;
    let digest = watermarked_digest(data, watermark);
    let signature = signing_key.sign(&digest).to_bytes();

    tracing::debug!(
        len = data.len(),
        watermark = ?watermark,
        "signed bytes"
    );

    let mut signed_data = hex::encode(data);
    signed_data.push_str(&hex::encode(signature));

    Ok(SignedBytes {
        signature: encode(Prefix::Ed25519Signature, &signature),
        signed_data,
    })
}

/// Sign a forged operation under the generic watermark and compute its id
pub fn sign_operation(
    secret_key: &str,
    operation_hex: &str,
) -> Result<SignedOperation, WasmTezosError> {
    let signed = sign_bytes(secret_key, operation_hex, Some(Watermark::Generic))?;
    let operation_id = operation_id(&signed.signed_data)?;

    Ok(SignedOperation {
        signature: signed.signature,
        signed_data: signed.signed_data,
        operation_id,
    })
}

/// Operation hash (`o...`) of hex-encoded signed operation bytes
pub fn operation_id(signed_data_hex: &str) -> Result<String, WasmTezosError> {
    let bytes = decode_hex(signed_data_hex)?;
    Ok(operation_id_from_bytes(&bytes))
}

/// Operation hash (`o...`) of raw signed operation bytes
pub fn operation_id_from_bytes(signed_data: &[u8]) -> String {
    let hash = Blake2b256::digest(signed_data);
    encode(Prefix::OperationHash, &hash)
}

/// Check an `edsig`/`sig` signature over hex data against an `edpk` public key
///
/// Returns `Ok(false)` when the signature does not verify; malformed inputs are errors.
pub fn verify_signature(
    public_key: &str,
    signature: &str,
    data_hex: &str,
    watermark: Option<Watermark>,
) -> Result<bool, WasmTezosError> {
    let verifying_key = verifying_key(public_key)?;

    let payload = decode_with(
        signature,
        "signature-ed25519 or signature-generic",
        |prefix| matches!(prefix, Prefix::Ed25519Signature | Prefix::GenericSignature),
    )?
    .payload;
    let bytes: [u8; SIGNATURE_LEN] = payload.as_slice().try_into().map_err(|_| {
        WasmTezosError::InvalidKeyMaterial(format!(
            "Signature must be {} bytes, got {}",
            SIGNATURE_LEN,
            payload.len()
        ))
    })?;
    let signature = Signature::from_bytes(&bytes);

    let data = decode_hex(data_hex)?;
    let digest = watermarked_digest(&data, watermark);
    Ok(verifying_key.verify_strict(&digest, &signature).is_ok())
}

/// Blake2b-256 of `watermark || data`
pub fn watermarked_digest(data: &[u8], watermark: Option<Watermark>) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    if let Some(watermark) = watermark {
        hasher.update([watermark.byte()]);
    }
    hasher.update(data);

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

fn decode_hex(data_hex: &str) -> Result<Vec<u8>, WasmTezosError> {
    let data_hex = data_hex.strip_prefix("0x").unwrap_or(data_hex);
    Ok(hex::decode(data_hex)?)
}
