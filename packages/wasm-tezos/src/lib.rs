//! wasm-tezos: WASM module for Tezos keys, addresses and operation signing
//!
//! This crate provides:
//! - Tagged base58check encoding and decoding (`tz1...`, `edpk...`, `edsig...`, `o...`)
//! - Ed25519 key generation and tz1 address derivation
//! - Watermarked signing of forged operations and operation ids
//! - Operation body shapes for forge/run/preapply requests
//! - Michelson call arguments encoded as Micheline JSON
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_tezos::{public_key_to_address, secret_key_to_public_key, sign_operation};
//!
//! let secret_key = "edsk4EcqupPmaebat5mP57ZQ3zo8NDkwv8vQmafdYZyeXxrSc72pjN";
//! let public_key = secret_key_to_public_key(secret_key).unwrap();
//! let address = public_key_to_address(&public_key).unwrap();
//! assert_eq!(address, "tz1ZWiiPXowuhN1UqNGVTrgNyf5tdxp4XUUq");
//!
//! let signed = sign_operation(secret_key, "deadbeef").unwrap();
//! assert!(signed.operation_id.starts_with('o'));
//! ```

pub mod base58check;
pub mod codec;
pub mod error;
pub mod keys;
pub mod michelson;
pub mod operation;
pub mod prefix;
pub mod signer;
pub mod wasm;

// Re-export main types for convenience
pub use codec::{decode, decode_as, decode_with, encode, validate_address, TaggedValue};
pub use error::WasmTezosError;
pub use keys::{generate, public_key_to_address, secret_key_to_public_key, KeyPair};
pub use michelson::encode_args;
pub use operation::{OperationContent, OperationEnvelope, Origination, Transaction};
pub use prefix::{match_prefix, prefix_of, Prefix};
pub use signer::{
    operation_id, sign_bytes, sign_operation, verify_signature, SignedBytes, SignedOperation,
    Watermark,
};
