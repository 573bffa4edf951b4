//! Tests for the JavaScript-facing layer; run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use wasm_tezos::wasm::{CryptoNamespace, OperationNamespace, WasmKeyPair};

const SECRET_KEY: &str = "edsk4EcqupPmaebat5mP57ZQ3zo8NDkwv8vQmafdYZyeXxrSc72pjN";
const PUBLIC_KEY: &str = "edpkugJHjEZLNyTuX3wW2dT4P7PY5crLqq3zeDFvXohAs3tnRAaZKR";
const ADDRESS: &str = "tz1ZWiiPXowuhN1UqNGVTrgNyf5tdxp4XUUq";

fn get(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn test_key_pair_from_secret_key() {
    let key_pair = WasmKeyPair::from_secret_key(SECRET_KEY).unwrap();
    assert_eq!(key_pair.public_key(), PUBLIC_KEY);
    assert_eq!(key_pair.address(), ADDRESS);
}

#[wasm_bindgen_test]
fn test_generate_key_object() {
    let generated = CryptoNamespace::generate_key().unwrap();
    let secret_key = get(&generated, "secretKey").as_string().unwrap();
    let address = get(&generated, "address").as_string().unwrap();
    let public_key = CryptoNamespace::secret_key_to_public_key(&secret_key).unwrap();
    assert_eq!(
        CryptoNamespace::public_key_to_address(&public_key).unwrap(),
        address
    );
}

#[wasm_bindgen_test]
fn test_encode_decode() {
    let text = CryptoNamespace::encode("chain-id", &[0, 0, 0, 0]).unwrap();
    assert_eq!(text, "NetXH12Aer3be93");

    let decoded = CryptoNamespace::decode(&text).unwrap();
    assert_eq!(get(&decoded, "tag").as_string().unwrap(), "chain-id");
    assert_eq!(get(&decoded, "payload").as_string().unwrap(), "00000000");

    assert!(CryptoNamespace::encode("no-such-tag", &[]).is_err());
}

#[wasm_bindgen_test]
fn test_sign_operation_object() {
    let signed = CryptoNamespace::sign_operation(SECRET_KEY, "deadbeef").unwrap();
    let signature = get(&signed, "signature").as_string().unwrap();
    let signed_data = get(&signed, "signedData").as_string().unwrap();
    let operation_id = get(&signed, "operationId").as_string().unwrap();

    assert_eq!(CryptoNamespace::operation_id(&signed_data).unwrap(), operation_id);
    assert!(CryptoNamespace::verify_signature(
        PUBLIC_KEY,
        &signature,
        "deadbeef",
        Some("generic".to_string())
    )
    .unwrap());
    assert!(CryptoNamespace::sign_bytes(SECRET_KEY, "00", Some("baking".to_string())).is_err());
}

#[wasm_bindgen_test]
fn test_tez_to_mutez() {
    assert_eq!(OperationNamespace::tez_to_mutez("0.05").unwrap(), 50_000);
}

#[wasm_bindgen_test]
fn test_encode_args_object() {
    let value = OperationNamespace::encode_args("Pair 82 (Pair \"a\" 1)").unwrap();
    assert_eq!(get(&value, "prim").as_string().unwrap(), "Pair");
    assert!(js_sys::Array::is_array(&get(&value, "args")));
    assert!(OperationNamespace::encode_args("\"test").is_err());
}
