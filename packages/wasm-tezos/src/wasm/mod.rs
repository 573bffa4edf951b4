//! WASM bindings for wasm-tezos
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations.

pub mod crypto;
pub mod keypair;
pub mod operation;

// Re-export WASM types
pub use crypto::CryptoNamespace;
pub use keypair::WasmKeyPair;
pub use operation::OperationNamespace;
