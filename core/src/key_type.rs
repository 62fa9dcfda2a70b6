//! Key type registry.
//!
//! A [`KeyType`] is a capability tag: it selects a derivation algorithm in
//! [`crate::keys`] and the multicodec prefix used when a public key is
//! embedded in a `did:key` identifier. The set is closed and every variant
//! maps to one static [`KeyTypeSpec`].
//!
//! Only Ed25519 can be derived from a seed. The other variants exist so that
//! DIDs carrying them can be parsed and so that method compatibility can be
//! expressed (and refused) precisely. Adding a key type means a new variant,
//! a table entry, and a derivation case; existing variants never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{MULTICODEC_BLS12381G2_PUB, MULTICODEC_ED25519_PUB, MULTICODEC_X25519_PUB};
use crate::keys::KeyError;

/// Static description of a key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTypeSpec {
    /// Short name, as used in configuration and error messages.
    pub name: &'static str,
    /// Multicodec table name of the public key encoding.
    pub multicodec_name: &'static str,
    /// Varint-encoded multicodec prefix.
    pub multicodec_prefix: [u8; 2],
    /// Length of a raw public key of this type, in bytes.
    pub public_key_length: usize,
}

const ED25519: KeyTypeSpec = KeyTypeSpec {
    name: "ed25519",
    multicodec_name: "ed25519-pub",
    multicodec_prefix: MULTICODEC_ED25519_PUB,
    public_key_length: 32,
};

const X25519: KeyTypeSpec = KeyTypeSpec {
    name: "x25519",
    multicodec_name: "x25519-pub",
    multicodec_prefix: MULTICODEC_X25519_PUB,
    public_key_length: 32,
};

const BLS12381G2: KeyTypeSpec = KeyTypeSpec {
    name: "bls12381g2",
    multicodec_name: "bls12_381-g2-pub",
    multicodec_prefix: MULTICODEC_BLS12381G2_PUB,
    public_key_length: 96,
};

/// Supported key types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Ed25519,
    X25519,
    Bls12381G2,
}

impl KeyType {
    /// Every registered key type, in registration order.
    pub const ALL: [KeyType; 3] = [KeyType::Ed25519, KeyType::X25519, KeyType::Bls12381G2];

    pub fn spec(self) -> &'static KeyTypeSpec {
        match self {
            KeyType::Ed25519 => &ED25519,
            KeyType::X25519 => &X25519,
            KeyType::Bls12381G2 => &BLS12381G2,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn multicodec_name(self) -> &'static str {
        self.spec().multicodec_name
    }

    pub fn multicodec_prefix(self) -> [u8; 2] {
        self.spec().multicodec_prefix
    }

    pub fn public_key_length(self) -> usize {
        self.spec().public_key_length
    }

    pub fn from_name(name: &str) -> Option<KeyType> {
        Self::ALL
            .into_iter()
            .find(|kt| kt.name().eq_ignore_ascii_case(name))
    }

    /// Look up the key type whose multicodec prefix starts `bytes`.
    pub fn from_multicodec_prefix(bytes: &[u8]) -> Option<KeyType> {
        Self::ALL
            .into_iter()
            .find(|kt| bytes.starts_with(&kt.multicodec_prefix()))
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| KeyError::UnknownKeyType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for kt in KeyType::ALL {
            assert_eq!(KeyType::from_name(kt.name()), Some(kt));
            assert_eq!(kt.to_string().parse::<KeyType>().unwrap(), kt);
        }
    }

    #[test]
    fn name_lookup_ignores_case() {
        assert_eq!(KeyType::from_name("ED25519"), Some(KeyType::Ed25519));
    }

    #[test]
    fn unknown_name_rejected() {
        assert!(matches!(
            "secp256k1".parse::<KeyType>(),
            Err(KeyError::UnknownKeyType(_))
        ));
    }

    #[test]
    fn multicodec_prefix_lookup() {
        assert_eq!(
            KeyType::from_multicodec_prefix(&[0xed, 0x01, 0xaa]),
            Some(KeyType::Ed25519)
        );
        assert_eq!(
            KeyType::from_multicodec_prefix(&[0xec, 0x01]),
            Some(KeyType::X25519)
        );
        assert_eq!(KeyType::from_multicodec_prefix(&[0x12, 0x20]), None);
        assert_eq!(KeyType::from_multicodec_prefix(&[0xed]), None);
    }

    #[test]
    fn serde_uses_short_names() {
        let json = serde_json::to_string(&KeyType::Bls12381G2).unwrap();
        assert_eq!(json, "\"bls12381g2\"");
        let parsed: KeyType = serde_json::from_str("\"ed25519\"").unwrap();
        assert_eq!(parsed, KeyType::Ed25519);
    }
}
