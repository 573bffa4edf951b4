//! WASM bindings for operation bodies
//!
//! OperationNamespace validates request bodies built on the JavaScript side

use crate::error::WasmTezosError;
use crate::michelson;
use crate::operation::{self, OperationEnvelope};
use crate::wasm::crypto::to_js_value;
use wasm_bindgen::prelude::*;

/// Namespace for operation body helpers
#[wasm_bindgen]
pub struct OperationNamespace;

#[wasm_bindgen]
impl OperationNamespace {
    /// Validate a forge/run/preapply body
    ///
    /// # Arguments
    /// * `body` - `{ branch, contents, protocol?, signature? }`
    ///
    /// # Returns
    /// The body normalized to RPC form (amounts as decimal strings)
    #[wasm_bindgen]
    pub fn validate(body: JsValue) -> Result<JsValue, JsValue> {
        let envelope: OperationEnvelope = serde_wasm_bindgen::from_value(body).map_err(|e| {
            WasmTezosError::InvalidOperation(format!("Malformed operation body: {}", e))
        })?;
        envelope.validate()?;
        to_js_value(&envelope)
    }

    /// Encode a Michelson literal (e.g. `Pair 1 "a"`) as Micheline JSON
    /// for `parameters`
    #[wasm_bindgen(js_name = encodeArgs)]
    pub fn encode_args(text: &str) -> Result<JsValue, JsValue> {
        let value = michelson::encode_args(text)?;
        to_js_value(&value)
    }

    /// Convert a decimal tez amount to mutez
    #[wasm_bindgen(js_name = tezToMutez)]
    pub fn tez_to_mutez(tez: &str) -> Result<u64, WasmTezosError> {
        operation::tez_to_mutez(tez)
    }
}
