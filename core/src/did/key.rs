//! # `did:key`
//!
//! A `did:key` identifier is a self-describing public key:
//!
//! ```text
//! did:key:z<base58btc(multicodec-prefix || raw-public-key)>
//! ```
//!
//! For Ed25519 the prefix is `0xed 0x01`, which is why every Ed25519
//! `did:key` starts with `z6Mk`. The encoded part is called the
//! *fingerprint* and doubles as the fragment of the key's verification
//! method id (`did:key:z6Mk...#z6Mk...`).

use std::fmt;
use std::str::FromStr;

use super::DidError;
use crate::config::{DID_SCHEME, METHOD_KEY};
use crate::encoding::{
    base58_to_bytes, bytes_to_base58, multibase_base58btc, multibase_base58btc_decode,
};
use crate::key_type::KeyType;

/// A public key addressed as a `did:key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DidKey {
    public_key: Vec<u8>,
    key_type: KeyType,
}

impl DidKey {
    /// Wrap raw public key bytes. No validation: this is the pure
    /// (key, key type) → DID direction.
    pub fn from_public_key(public_key: &[u8], key_type: KeyType) -> Self {
        Self {
            public_key: public_key.to_vec(),
            key_type,
        }
    }

    pub fn from_public_key_b58(public_key: &str, key_type: KeyType) -> Result<Self, DidError> {
        let bytes = base58_to_bytes(public_key)?;
        Ok(Self::from_public_key(&bytes, key_type))
    }

    /// Parse a fingerprint (`z6Mk...`) back into a key.
    pub fn from_fingerprint(fingerprint: &str) -> Result<Self, DidError> {
        let decoded = multibase_base58btc_decode(fingerprint)?;
        let key_type = KeyType::from_multicodec_prefix(&decoded)
            .ok_or_else(|| DidError::UnknownMulticodec(fingerprint.to_string()))?;
        let public_key = &decoded[key_type.multicodec_prefix().len()..];
        if public_key.len() != key_type.public_key_length() {
            return Err(DidError::InvalidFormat(format!(
                "{} key in '{}' has {} bytes, expected {}",
                key_type,
                fingerprint,
                public_key.len(),
                key_type.public_key_length()
            )));
        }
        Ok(Self::from_public_key(public_key, key_type))
    }

    /// Parse a `did:key` DID or DID URL. Any `#fragment` is ignored.
    pub fn from_did(did: &str) -> Result<Self, DidError> {
        let did = did.split('#').next().unwrap_or(did);
        let mut parts = did.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(DID_SCHEME), Some(METHOD_KEY), Some(fingerprint)) if !fingerprint.is_empty() => {
                Self::from_fingerprint(fingerprint)
            }
            (Some(DID_SCHEME), Some(method), Some(_)) if method != METHOD_KEY => {
                Err(DidError::UnsupportedMethod(method.to_string()))
            }
            _ => Err(DidError::InvalidFormat(format!(
                "expected 'did:key:<fingerprint>', got '{did}'"
            ))),
        }
    }

    /// Multicodec-prefixed public key bytes.
    pub fn prefixed_public_key(&self) -> Vec<u8> {
        let prefix = self.key_type.multicodec_prefix();
        let mut bytes = Vec::with_capacity(prefix.len() + self.public_key.len());
        bytes.extend_from_slice(&prefix);
        bytes.extend_from_slice(&self.public_key);
        bytes
    }

    /// The multibase-encoded, multicodec-prefixed key.
    pub fn fingerprint(&self) -> String {
        multibase_base58btc(&self.prefixed_public_key())
    }

    pub fn did(&self) -> String {
        format!("{}:{}:{}", DID_SCHEME, METHOD_KEY, self.fingerprint())
    }

    /// Verification method id of the key inside its own DID document.
    pub fn key_id(&self) -> String {
        format!("{}#{}", self.did(), self.fingerprint())
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn public_key_b58(&self) -> String {
        bytes_to_base58(&self.public_key)
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }
}

impl fmt::Display for DidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.did())
    }
}

impl FromStr for DidKey {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_did(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodingError;

    const GOVERNMENT_VERKEY: &str = "GJ1SzoWzavQYfNL9XkaJdrQejfztN4XqdsiV4ct3LXKL";
    const GOVERNMENT_DID: &str = "did:key:z6MkukGVb3mRvTu1msArDKY9UwxeZFGjmwnCKtdQttr4Fk6i";

    #[test]
    fn ed25519_did_from_verkey() {
        let did_key = DidKey::from_public_key_b58(GOVERNMENT_VERKEY, KeyType::Ed25519).unwrap();
        assert_eq!(did_key.did(), GOVERNMENT_DID);
        assert!(did_key.fingerprint().starts_with("z6Mk"));
        assert_eq!(did_key.to_string(), GOVERNMENT_DID);
    }

    #[test]
    fn key_id_uses_fingerprint_fragment() {
        let did_key = DidKey::from_did(GOVERNMENT_DID).unwrap();
        assert_eq!(
            did_key.key_id(),
            format!("{GOVERNMENT_DID}#z6MkukGVb3mRvTu1msArDKY9UwxeZFGjmwnCKtdQttr4Fk6i")
        );
    }

    #[test]
    fn parse_recovers_public_key() {
        let did_key: DidKey = GOVERNMENT_DID.parse().unwrap();
        assert_eq!(did_key.key_type(), KeyType::Ed25519);
        assert_eq!(did_key.public_key_b58(), GOVERNMENT_VERKEY);
        assert_eq!(did_key.public_key().len(), 32);
    }

    #[test]
    fn parse_ignores_fragment() {
        let url = format!("{GOVERNMENT_DID}#key-1");
        let did_key = DidKey::from_did(&url).unwrap();
        assert_eq!(did_key.did(), GOVERNMENT_DID);
    }

    #[test]
    fn prefixed_key_layout() {
        let did_key = DidKey::from_public_key(&[7u8; 32], KeyType::X25519);
        let prefixed = did_key.prefixed_public_key();
        assert_eq!(&prefixed[..2], &[0xec, 0x01]);
        assert_eq!(&prefixed[2..], &[7u8; 32]);
        assert!(did_key.fingerprint().starts_with("z6LS"));
        let parsed = DidKey::from_did(&did_key.did()).unwrap();
        assert_eq!(parsed, did_key);
    }

    #[test]
    fn rejects_other_methods() {
        assert!(matches!(
            DidKey::from_did("did:sov:V4SGRU86Z58d6TV7PBUe6f"),
            Err(DidError::UnsupportedMethod(m)) if m == "sov"
        ));
    }

    #[test]
    fn rejects_malformed_dids() {
        for bad in ["did:key", "did:key:", "notadid:key:z6Mk", "z6Mk"] {
            assert!(
                matches!(DidKey::from_did(bad), Err(DidError::InvalidFormat(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn rejects_non_base58btc_fingerprint() {
        assert!(matches!(
            DidKey::from_did("did:key:mAbc"),
            Err(DidError::Encoding(EncodingError::Multibase(_)))
        ));
    }

    #[test]
    fn rejects_unknown_multicodec() {
        let fingerprint = multibase_base58btc(&[0x12, 0x20, 1, 2, 3]);
        assert!(matches!(
            DidKey::from_fingerprint(&fingerprint),
            Err(DidError::UnknownMulticodec(_))
        ));
    }

    #[test]
    fn rejects_wrong_key_length() {
        let fingerprint = multibase_base58btc(&[0xed, 0x01, 1, 2, 3]);
        assert!(matches!(
            DidKey::from_fingerprint(&fingerprint),
            Err(DidError::InvalidFormat(_))
        ));
    }
}
