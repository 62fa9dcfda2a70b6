//! DID method table.
//!
//! The method set is small and closed, so each [`DidMethod`] variant maps to
//! one static [`MethodSpec`]: its name, the key types it accepts, whether a
//! caller may bring their own DID, and the pure function that builds the
//! identifier from a public key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DidError, DidKey};
use crate::config::{METHOD_KEY, METHOD_SOV, SOV_DID_BYTES};
use crate::encoding::bytes_to_base58;
use crate::key_type::KeyType;
use crate::keys::PublicKey;

/// Builds a DID from a public key. Receives the explicit DID, if any, only
/// for methods that allow one.
pub type DidRule = fn(&PublicKey, KeyType, Option<&str>) -> String;

/// Static description of a DID method.
#[derive(Clone, Copy)]
pub struct MethodSpec {
    pub name: &'static str,
    pub supported_key_types: &'static [KeyType],
    /// Whether callers may supply their own DID instead of the derived one.
    pub allows_explicit_did: bool,
    pub rule: DidRule,
}

const KEY: MethodSpec = MethodSpec {
    name: METHOD_KEY,
    supported_key_types: &[KeyType::Ed25519, KeyType::Bls12381G2],
    allows_explicit_did: false,
    rule: did_key_rule,
};

const SOV: MethodSpec = MethodSpec {
    name: METHOD_SOV,
    supported_key_types: &[KeyType::Ed25519],
    allows_explicit_did: true,
    rule: did_sov_rule,
};

/// Supported DID methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DidMethod {
    Key,
    Sov,
}

impl DidMethod {
    pub const ALL: [DidMethod; 2] = [DidMethod::Key, DidMethod::Sov];

    pub fn spec(self) -> &'static MethodSpec {
        match self {
            DidMethod::Key => &KEY,
            DidMethod::Sov => &SOV,
        }
    }

    pub fn method_name(self) -> &'static str {
        self.spec().name
    }

    pub fn supported_key_types(self) -> &'static [KeyType] {
        self.spec().supported_key_types
    }

    pub fn supports_key_type(self, key_type: KeyType) -> bool {
        self.supported_key_types().contains(&key_type)
    }

    pub fn from_name(name: &str) -> Option<DidMethod> {
        Self::ALL.into_iter().find(|m| m.method_name() == name)
    }

    /// Fail with [`DidError::UnsupportedKeyTypeForMethod`] unless this method
    /// accepts `key_type`.
    pub fn check_key_type(self, key_type: KeyType) -> Result<(), DidError> {
        if self.supports_key_type(key_type) {
            Ok(())
        } else {
            Err(DidError::UnsupportedKeyTypeForMethod {
                key_type,
                method: self,
            })
        }
    }

    /// Fail with [`DidError::DidConflict`] if an explicit DID is given to a
    /// method that derives its own. Empty strings count as "no DID".
    pub fn check_explicit_did(self, did: Option<&str>) -> Result<(), DidError> {
        match did.filter(|d| !d.is_empty()) {
            Some(_) if !self.spec().allows_explicit_did => Err(DidError::DidConflict(self)),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for DidMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for DidMethod {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DidError::UnsupportedMethod(s.to_string()))
    }
}

/// Compute the DID for `public_key` under `method`.
///
/// The method must support `key_type`, and `public_key` must have the length
/// keys of that type have. For `key`, supplying `explicit_did` is an error.
/// For `sov`, a supplied DID is returned verbatim and is not checked against
/// the key.
pub fn resolve_did(
    method: DidMethod,
    key_type: KeyType,
    public_key: &PublicKey,
    explicit_did: Option<&str>,
) -> Result<String, DidError> {
    method.check_key_type(key_type)?;
    let actual = public_key.as_bytes().len();
    if actual != key_type.public_key_length() {
        return Err(DidError::KeyLengthMismatch {
            key_type,
            expected: key_type.public_key_length(),
            actual,
        });
    }
    method.check_explicit_did(explicit_did)?;
    let explicit_did = explicit_did.filter(|d| !d.is_empty());
    Ok((method.spec().rule)(public_key, key_type, explicit_did))
}

fn did_key_rule(public_key: &PublicKey, key_type: KeyType, _explicit: Option<&str>) -> String {
    DidKey::from_public_key(public_key.as_bytes(), key_type).did()
}

fn did_sov_rule(public_key: &PublicKey, _key_type: KeyType, explicit: Option<&str>) -> String {
    match explicit {
        Some(did) => did.to_string(),
        None => bytes_to_base58(&public_key.as_bytes()[..SOV_DID_BYTES]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;
    use crate::seed::Seed;

    fn trustee_key() -> PublicKey {
        *keypair_from_seed(&Seed::from_bytes(*b"000000000000000000000000Trustee1")).public_key()
    }

    #[test]
    fn method_names() {
        assert_eq!(DidMethod::Key.method_name(), "key");
        assert_eq!(DidMethod::Sov.method_name(), "sov");
        assert_eq!("sov".parse::<DidMethod>().unwrap(), DidMethod::Sov);
    }

    #[test]
    fn unknown_method_rejected() {
        assert!(matches!(
            "web".parse::<DidMethod>(),
            Err(DidError::UnsupportedMethod(name)) if name == "web"
        ));
    }

    #[test]
    fn supported_key_types() {
        assert!(DidMethod::Key.supports_key_type(KeyType::Ed25519));
        assert!(DidMethod::Key.supports_key_type(KeyType::Bls12381G2));
        assert!(!DidMethod::Key.supports_key_type(KeyType::X25519));
        assert!(DidMethod::Sov.supports_key_type(KeyType::Ed25519));
        assert!(!DidMethod::Sov.supports_key_type(KeyType::Bls12381G2));
    }

    #[test]
    fn sov_did_is_first_sixteen_bytes() {
        let pk = trustee_key();
        let did = resolve_did(DidMethod::Sov, KeyType::Ed25519, &pk, None).unwrap();
        assert_eq!(did, "V4SGRU86Z58d6TV7PBUe6f");
        assert_eq!(did, bytes_to_base58(&pk.as_bytes()[..16]));
    }

    #[test]
    fn sov_explicit_did_used_verbatim() {
        let pk = trustee_key();
        let did =
            resolve_did(DidMethod::Sov, KeyType::Ed25519, &pk, Some("myCustomDid")).unwrap();
        assert_eq!(did, "myCustomDid");
    }

    #[test]
    fn sov_empty_explicit_did_is_ignored() {
        let pk = trustee_key();
        let did = resolve_did(DidMethod::Sov, KeyType::Ed25519, &pk, Some("")).unwrap();
        assert_eq!(did, "V4SGRU86Z58d6TV7PBUe6f");
    }

    #[test]
    fn key_did_from_public_key() {
        let pk = trustee_key();
        let did = resolve_did(DidMethod::Key, KeyType::Ed25519, &pk, None).unwrap();
        assert_eq!(did, "did:key:z6MkukGVb3mRvTu1msArDKY9UwxeZFGjmwnCKtdQttr4Fk6i");
    }

    #[test]
    fn key_method_rejects_explicit_did() {
        let pk = trustee_key();
        let result = resolve_did(
            DidMethod::Key,
            KeyType::Ed25519,
            &pk,
            Some("did:key:something"),
        );
        assert!(matches!(result, Err(DidError::DidConflict(DidMethod::Key))));
    }

    #[test]
    fn key_length_must_match_key_type() {
        let pk = trustee_key();
        let result = resolve_did(DidMethod::Key, KeyType::Bls12381G2, &pk, None);
        assert!(matches!(
            result,
            Err(DidError::KeyLengthMismatch {
                key_type: KeyType::Bls12381G2,
                expected: 96,
                actual: 32,
            })
        ));
    }

    #[test]
    fn resolved_did_key_parses_back() {
        let pk = trustee_key();
        let did = resolve_did(DidMethod::Key, KeyType::Ed25519, &pk, None).unwrap();
        let parsed = DidKey::from_did(&did).unwrap();
        assert_eq!(parsed.public_key(), pk.as_bytes());
    }

    #[test]
    fn unsupported_key_type_for_method() {
        let pk = trustee_key();
        let result = resolve_did(DidMethod::Sov, KeyType::X25519, &pk, None);
        assert!(matches!(
            result,
            Err(DidError::UnsupportedKeyTypeForMethod {
                key_type: KeyType::X25519,
                method: DidMethod::Sov,
            })
        ));
    }
}
