//! Manager operation contents for forge, run and preapply request bodies
//!
//! Only the shapes are modelled here. Fees, gas and scripts are passed through
//! untouched; the node is the authority on whether they make sense.

use crate::codec::decode_with;
use crate::error::WasmTezosError;
use crate::prefix::Prefix;
use serde::{Deserialize, Serialize};

/// Mutez per tez
pub const MUTEZ_PER_TEZ: u64 = 1_000_000;

/// One manager operation, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationContent {
    Transaction(Transaction),
    Origination(Origination),
}

/// Transfer from an implicit account, optionally calling a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "string_u64")]
    pub amount: u64,
    pub source: String,
    pub destination: String,
    #[serde(with = "string_u64")]
    pub gas_limit: u64,
    #[serde(with = "string_u64")]
    pub storage_limit: u64,
    #[serde(with = "string_u64")]
    pub counter: u64,
    #[serde(with = "string_u64")]
    pub fee: u64,
    /// Micheline call parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Contract origination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origination {
    pub delegatable: bool,
    pub spendable: bool,
    #[serde(with = "string_u64")]
    pub balance: u64,
    pub source: String,
    #[serde(with = "string_u64")]
    pub gas_limit: u64,
    #[serde(with = "string_u64")]
    pub storage_limit: u64,
    #[serde(with = "string_u64")]
    pub counter: u64,
    #[serde(with = "string_u64")]
    pub fee: u64,
    #[serde(rename = "managerPubkey")]
    pub manager_pubkey: String,
    /// Micheline code and storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<serde_json::Value>,
}

impl OperationContent {
    /// RPC `kind` of this operation
    pub fn kind(&self) -> &'static str {
        match self {
            OperationContent::Transaction(_) => "transaction",
            OperationContent::Origination(_) => "origination",
        }
    }

    /// Implicit account paying for the operation
    pub fn source(&self) -> &str {
        match self {
            OperationContent::Transaction(tx) => &tx.source,
            OperationContent::Origination(orig) => &orig.source,
        }
    }

    /// Check that every address field decodes under an acceptable tag
    pub fn validate(&self) -> Result<(), WasmTezosError> {
        decode_with(self.source(), "implicit address", Prefix::is_implicit_address)?;

        match self {
            OperationContent::Transaction(tx) => {
                decode_with(&tx.destination, "address", Prefix::is_address)?;
            }
            OperationContent::Origination(orig) => {
                decode_with(
                    &orig.manager_pubkey,
                    "implicit address",
                    Prefix::is_implicit_address,
                )?;
            }
        }
        Ok(())
    }
}

/// Body of a forge, run_operation or preapply request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    pub branch: String,
    pub contents: Vec<OperationContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl OperationEnvelope {
    /// Unsigned body for `helpers/forge/operations`
    pub fn forge(branch: impl Into<String>, contents: Vec<OperationContent>) -> Self {
        OperationEnvelope {
            protocol: None,
            branch: branch.into(),
            contents,
            signature: None,
        }
    }

    /// Signed body for `helpers/scripts/run_operation`
    pub fn run(
        branch: impl Into<String>,
        contents: Vec<OperationContent>,
        signature: impl Into<String>,
    ) -> Self {
        OperationEnvelope {
            signature: Some(signature.into()),
            ..Self::forge(branch, contents)
        }
    }

    /// Signed body for `helpers/preapply/operations`
    pub fn preapply(
        protocol: impl Into<String>,
        branch: impl Into<String>,
        contents: Vec<OperationContent>,
        signature: impl Into<String>,
    ) -> Self {
        OperationEnvelope {
            protocol: Some(protocol.into()),
            ..Self::run(branch, contents, signature)
        }
    }

    /// Check the branch, protocol, signature and every content entry
    pub fn validate(&self) -> Result<(), WasmTezosError> {
        if self.contents.is_empty() {
            return Err(WasmTezosError::InvalidOperation(
                "Operation has no contents".to_string(),
            ));
        }

        decode_with(&self.branch, Prefix::BlockHash.name(), |prefix| {
            prefix == Prefix::BlockHash
        })?;

        if let Some(protocol) = &self.protocol {
            decode_with(protocol, Prefix::ProtocolHash.name(), |prefix| {
                prefix == Prefix::ProtocolHash
            })?;
        }

        if let Some(signature) = &self.signature {
            decode_with(signature, "signature", Prefix::is_signature)?;
        }

        for (index, content) in self.contents.iter().enumerate() {
            content.validate().map_err(|e| {
                WasmTezosError::InvalidOperation(format!(
                    "contents[{}] ({}): {}",
                    index,
                    content.kind(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

/// Parse a decimal tez amount ("1", "0.05") into mutez
pub fn tez_to_mutez(tez: &str) -> Result<u64, WasmTezosError> {
    let invalid = || WasmTezosError::InvalidInput(format!("Invalid tez amount: {:?}", tez));

    let (whole, fraction) = tez.split_once('.').unwrap_or((tez, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > 6 || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction: u64 = if fraction.is_empty() {
        0
    } else {
        format!("{:0<6}", fraction).parse().map_err(|_| invalid())?
    };

    whole
        .checked_mul(MUTEZ_PER_TEZ)
        .and_then(|mutez| mutez.checked_add(fraction))
        .ok_or_else(invalid)
}

/// u64 carried as a decimal string on the wire, also accepted as a JSON number
mod string_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Number(u64),
        }

        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => s.parse().map_err(serde::de::Error::custom),
            StringOrNumber::Number(n) => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::michelson::encode_args;
    use rstest::rstest;
    use serde_json::json;

    const ADDRESS: &str = "tz1ZWiiPXowuhN1UqNGVTrgNyf5tdxp4XUUq";
    const CONTRACT: &str = "KT1DYhtwokM5SX1V8UfqnDe2cMBXA4mS5MFr";
    const BRANCH: &str = "BKiHLREqU3JkXfzEDYAkmmfX48gBDtYhMrpA98s7Aq4SzbUAB6M";
    const PUBLIC_KEY: &str = "edpkugJHjEZLNyTuX3wW2dT4P7PY5crLqq3zeDFvXohAs3tnRAaZKR";
    const SIGNATURE: &str = "edsigtgdf1sTEFmRJWD6XbeUn4z168W2ZRAu4K7JsemMhEV4EMgid6uBA5BJrqMt6CoGorsdcJmPWU8ZBEY5LrvHYKoA7Rk9yNR";

    fn transaction(destination: &str) -> OperationContent {
        OperationContent::Transaction(Transaction {
            amount: 1_000_000,
            source: ADDRESS.to_string(),
            destination: destination.to_string(),
            gas_limit: 50_000,
            storage_limit: 6_000,
            counter: 42,
            fee: 50_000,
            parameters: None,
        })
    }

    fn origination(manager: &str) -> OperationContent {
        OperationContent::Origination(Origination {
            delegatable: false,
            spendable: false,
            balance: 50_000,
            source: ADDRESS.to_string(),
            gas_limit: 50_000,
            storage_limit: 6_000,
            counter: 43,
            fee: 50_000,
            manager_pubkey: manager.to_string(),
            script: Some(json!({ "code": [], "storage": { "string": "test" } })),
        })
    }

    #[test]
    fn test_transaction_json_shape() {
        let value = serde_json::to_value(transaction(ADDRESS)).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "transaction",
                "amount": "1000000",
                "source": ADDRESS,
                "destination": ADDRESS,
                "gas_limit": "50000",
                "storage_limit": "6000",
                "counter": "42",
                "fee": "50000",
            })
        );
    }

    #[test]
    fn test_origination_json_shape() {
        let value = serde_json::to_value(origination(ADDRESS)).unwrap();
        assert_eq!(value["kind"], "origination");
        assert_eq!(value["balance"], "50000");
        assert_eq!(value["managerPubkey"], ADDRESS);
        assert_eq!(value["script"]["storage"]["string"], "test");
        assert_eq!(value["delegatable"], false);
    }

    #[test]
    fn test_deserialize_accepts_numbers() {
        let content: OperationContent = serde_json::from_value(json!({
            "kind": "transaction",
            "amount": 5,
            "source": ADDRESS,
            "destination": CONTRACT,
            "gas_limit": "10",
            "storage_limit": 0,
            "counter": "7",
            "fee": 1,
            "parameters": { "string": "pierre" },
        }))
        .unwrap();

        match &content {
            OperationContent::Transaction(tx) => {
                assert_eq!(tx.amount, 5);
                assert_eq!(tx.gas_limit, 10);
                assert_eq!(tx.parameters, Some(encode_args(r#""pierre""#).unwrap()));
            }
            other => panic!("unexpected kind {}", other.kind()),
        }
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<OperationContent, _> = serde_json::from_value(json!({
            "kind": "delegation",
            "source": ADDRESS,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_shapes() {
        let forge = OperationEnvelope::forge(BRANCH, vec![transaction(ADDRESS)]);
        let value = serde_json::to_value(&forge).unwrap();
        assert!(value.get("signature").is_none());
        assert!(value.get("protocol").is_none());

        let preapply = OperationEnvelope::preapply(
            "PsYLVpVvgbLhAhoqAkMFUo6gudkJ9weNXhUYCiLDzcUpFpkk8Wt",
            BRANCH,
            vec![transaction(CONTRACT)],
            SIGNATURE,
        );
        assert_eq!(preapply.signature.as_deref(), Some(SIGNATURE));
        assert!(preapply.protocol.is_some());
        assert!(preapply.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_addresses() {
        assert!(transaction(CONTRACT).validate().is_ok());
        assert!(origination(ADDRESS).validate().is_ok());

        assert!(matches!(
            transaction(PUBLIC_KEY).validate(),
            Err(WasmTezosError::TypeMismatch { .. })
        ));
        assert!(matches!(
            origination(CONTRACT).validate(),
            Err(WasmTezosError::TypeMismatch { .. })
        ));
        assert!(matches!(
            transaction("tz1ZWiiPXowuhN1UqNGVTrgNyf5tdxp4XUUr").validate(),
            Err(WasmTezosError::ChecksumMismatch(_))
        ));
    }

    #[test]
    fn test_envelope_validate() {
        let empty = OperationEnvelope::forge(BRANCH, vec![]);
        assert!(matches!(
            empty.validate(),
            Err(WasmTezosError::InvalidOperation(_))
        ));

        let bad_branch = OperationEnvelope::forge(ADDRESS, vec![transaction(ADDRESS)]);
        assert!(matches!(
            bad_branch.validate(),
            Err(WasmTezosError::TypeMismatch { .. })
        ));

        let bad_content = OperationEnvelope::run(BRANCH, vec![transaction(PUBLIC_KEY)], SIGNATURE);
        let err = bad_content.validate().unwrap_err();
        assert!(err.to_string().contains("contents[0] (transaction)"));
    }

    #[rstest]
    #[case("1", 1_000_000)]
    #[case("0.05", 50_000)]
    #[case("0.006", 6_000)]
    #[case("12.345678", 12_345_678)]
    #[case(".5", 500_000)]
    #[case("3.", 3_000_000)]
    fn test_tez_to_mutez(#[case] tez: &str, #[case] mutez: u64) {
        assert_eq!(tez_to_mutez(tez).unwrap(), mutez);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("-1")]
    #[case("0.0000001")]
    #[case("1e6")]
    #[case("1.2.3")]
    #[case("99999999999999999999")]
    fn test_tez_to_mutez_invalid(#[case] tez: &str) {
        assert!(matches!(
            tez_to_mutez(tez),
            Err(WasmTezosError::InvalidInput(_))
        ));
    }
}
