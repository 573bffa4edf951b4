//! Tezos base58check prefix table
//!
//! Each tag maps to the fixed bytes prepended to its payload before base58check
//! encoding. The bytes are chosen so the encoded text starts with a readable
//! leader (`tz1`, `edpk`, `edsig`, ...). They are part of the network's wire
//! format and must match it bit for bit.
//!
//! See: https://gitlab.com/tezos/tezos/-/blob/master/src/lib_crypto/base58.ml

use crate::error::WasmTezosError;
use core::fmt;
use core::str::FromStr;

/// Symbolic tag of a base58check-encoded Tezos value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// tz1 implicit account (Blake2b-160 of an ed25519 public key)
    Ed25519Address,
    /// tz2 implicit account
    Secp256k1Address,
    /// tz3 implicit account
    P256Address,
    /// KT1 originated contract
    Contract,
    Ed25519PublicKey,
    /// 32-byte ed25519 seed (`edsk`, 54 characters)
    Ed25519Seed,
    Secp256k1SecretKey,
    P256SecretKey,
    Secp256k1PublicKey,
    P256PublicKey,
    /// 64-byte ed25519 secret key, seed followed by public key (`edsk`, 98 characters)
    Ed25519SecretKey,
    Ed25519Signature,
    Secp256k1Signature,
    P256Signature,
    GenericSignature,
    ChainId,
    NonceHash,
    BlockHash,
    OperationHash,
    OperationListHash,
    OperationListListHash,
    ProtocolHash,
    ContextHash,
    GenericId,
}

/// Prefix table in scan order.
///
/// `match_prefix` returns the first entry whose bytes lead the buffer, so the
/// order is part of the contract and must not be changed.
pub const PREFIX_TABLE: [(Prefix, &[u8]); 24] = [
    (Prefix::Ed25519Address, &[6, 161, 159]),
    (Prefix::Secp256k1Address, &[6, 161, 161]),
    (Prefix::P256Address, &[6, 161, 164]),
    (Prefix::Contract, &[2, 90, 121]),
    (Prefix::Ed25519PublicKey, &[13, 15, 37, 217]),
    (Prefix::Ed25519Seed, &[13, 15, 58, 7]),
    (Prefix::Secp256k1SecretKey, &[17, 162, 224, 201]),
    (Prefix::P256SecretKey, &[16, 81, 238, 189]),
    (Prefix::Secp256k1PublicKey, &[3, 254, 226, 86]),
    (Prefix::P256PublicKey, &[3, 178, 139, 127]),
    (Prefix::Ed25519SecretKey, &[43, 246, 78, 7]),
    (Prefix::Ed25519Signature, &[9, 245, 205, 134, 18]),
    (Prefix::Secp256k1Signature, &[13, 115, 101, 19, 63]),
    (Prefix::P256Signature, &[54, 240, 44, 52]),
    (Prefix::GenericSignature, &[4, 130, 43]),
    (Prefix::ChainId, &[87, 82, 0]),
    (Prefix::NonceHash, &[69, 220, 169]),
    (Prefix::BlockHash, &[1, 52]),
    (Prefix::OperationHash, &[5, 116]),
    (Prefix::OperationListHash, &[133, 233]),
    (Prefix::OperationListListHash, &[29, 159, 109]),
    (Prefix::ProtocolHash, &[2, 170]),
    (Prefix::ContextHash, &[79, 179]),
    (Prefix::GenericId, &[153, 103]),
];

impl Prefix {
    /// Every tag, in table order
    pub fn all() -> impl Iterator<Item = Prefix> {
        PREFIX_TABLE.iter().map(|(prefix, _)| *prefix)
    }

    /// Raw prefix bytes for this tag
    pub fn bytes(self) -> &'static [u8] {
        PREFIX_TABLE
            .iter()
            .find(|(prefix, _)| *prefix == self)
            .map(|(_, bytes)| *bytes)
            .unwrap_or_default()
    }

    /// Kebab-case tag name, also accepted by `from_str`
    pub fn name(self) -> &'static str {
        match self {
            Prefix::Ed25519Address => "address-ed25519",
            Prefix::Secp256k1Address => "address-secp256k1",
            Prefix::P256Address => "address-p256",
            Prefix::Contract => "contract",
            Prefix::Ed25519PublicKey => "public-key-ed25519",
            Prefix::Ed25519Seed => "secret-seed-ed25519",
            Prefix::Secp256k1SecretKey => "secret-key-secp256k1",
            Prefix::P256SecretKey => "secret-key-p256",
            Prefix::Secp256k1PublicKey => "public-key-secp256k1",
            Prefix::P256PublicKey => "public-key-p256",
            Prefix::Ed25519SecretKey => "secret-key-ed25519-full",
            Prefix::Ed25519Signature => "signature-ed25519",
            Prefix::Secp256k1Signature => "signature-secp256k1",
            Prefix::P256Signature => "signature-p256",
            Prefix::GenericSignature => "signature-generic",
            Prefix::ChainId => "chain-id",
            Prefix::NonceHash => "nonce-hash",
            Prefix::BlockHash => "block-hash",
            Prefix::OperationHash => "operation-hash",
            Prefix::OperationListHash => "operation-list-hash",
            Prefix::OperationListListHash => "operation-list-list-hash",
            Prefix::ProtocolHash => "protocol-hash",
            Prefix::ContextHash => "context-hash",
            Prefix::GenericId => "generic-id",
        }
    }

    /// Leading characters of the encoded text for a payload of `payload_len()` bytes
    pub fn leader(self) -> &'static str {
        match self {
            Prefix::Ed25519Address => "tz1",
            Prefix::Secp256k1Address => "tz2",
            Prefix::P256Address => "tz3",
            Prefix::Contract => "KT1",
            Prefix::Ed25519PublicKey => "edpk",
            Prefix::Ed25519Seed | Prefix::Ed25519SecretKey => "edsk",
            Prefix::Secp256k1SecretKey => "spsk",
            Prefix::P256SecretKey => "p2sk",
            Prefix::Secp256k1PublicKey => "sppk",
            Prefix::P256PublicKey => "p2pk",
            Prefix::Ed25519Signature => "edsig",
            Prefix::Secp256k1Signature => "spsig1",
            Prefix::P256Signature => "p2sig",
            Prefix::GenericSignature => "sig",
            Prefix::ChainId => "Net",
            Prefix::NonceHash => "nce",
            Prefix::BlockHash => "B",
            Prefix::OperationHash => "o",
            Prefix::OperationListHash => "Lo",
            Prefix::OperationListListHash => "LLo",
            Prefix::ProtocolHash => "P",
            Prefix::ContextHash => "Cn",
            Prefix::GenericId => "id",
        }
    }

    /// Payload length the network uses for this tag
    pub fn payload_len(self) -> usize {
        match self {
            Prefix::Ed25519Address
            | Prefix::Secp256k1Address
            | Prefix::P256Address
            | Prefix::Contract => 20,
            Prefix::Secp256k1PublicKey | Prefix::P256PublicKey => 33,
            Prefix::Ed25519SecretKey
            | Prefix::Ed25519Signature
            | Prefix::Secp256k1Signature
            | Prefix::P256Signature
            | Prefix::GenericSignature => 64,
            Prefix::ChainId => 4,
            Prefix::GenericId => 16,
            _ => 32,
        }
    }

    /// Whether this tag is an account or contract address
    pub fn is_address(self) -> bool {
        matches!(
            self,
            Prefix::Ed25519Address
                | Prefix::Secp256k1Address
                | Prefix::P256Address
                | Prefix::Contract
        )
    }

    /// Whether this tag is an implicit (key-backed) account address
    pub fn is_implicit_address(self) -> bool {
        self.is_address() && self != Prefix::Contract
    }

    /// Whether this tag is a signature of any curve
    pub fn is_signature(self) -> bool {
        matches!(
            self,
            Prefix::Ed25519Signature
                | Prefix::Secp256k1Signature
                | Prefix::P256Signature
                | Prefix::GenericSignature
        )
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prefix {
    type Err = WasmTezosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // legacy names for the Lo and LLo tags
        let s = match s {
            "list-list-operation-hash" => "operation-list-hash",
            "protocol-hash-list" => "operation-list-list-hash",
            other => other,
        };
        Prefix::all()
            .find(|prefix| prefix.name() == s)
            .ok_or_else(|| WasmTezosError::UnknownPrefix(format!("unknown tag {:?}", s)))
    }
}

/// Raw prefix bytes for a tag
pub fn prefix_of(tag: Prefix) -> &'static [u8] {
    tag.bytes()
}

/// Find the first table entry whose bytes lead `buffer`
///
/// Returns the tag and the remaining payload.
pub fn match_prefix(buffer: &[u8]) -> Result<(Prefix, &[u8]), WasmTezosError> {
    PREFIX_TABLE
        .iter()
        .find_map(|(prefix, bytes)| buffer.strip_prefix(*bytes).map(|rest| (*prefix, rest)))
        .ok_or_else(|| {
            WasmTezosError::UnknownPrefix(format!(
                "no tag matches leading bytes {}",
                hex::encode(&buffer[..buffer.len().min(5)])
            ))
        })
}
