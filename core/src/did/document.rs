//! # DID Documents
//!
//! Generates W3C DID documents (DID Core v1.0) for Ed25519-backed DIDs of
//! either method.
//!
//! ## Layout
//!
//! Every document carries two verification methods:
//!
//! - `<did>#<method-specific-id>`: the Ed25519 verkey
//!   (`Ed25519VerificationKey2018`, base58 encoded).
//! - `<did>#<x25519 fingerprint>`: the same key converted to Curve25519
//!   (`X25519KeyAgreementKey2019`), used for encryption.
//!
//! `authentication`, `assertionMethod`, `capabilityDelegation` and
//! `capabilityInvocation` reference the Ed25519 method; `keyAgreement`
//! references the X25519 one.
//!
//! ## Standards References
//!
//! - [DID Core v1.0](https://www.w3.org/TR/did-core/)
//! - [Ed25519VerificationKey2018](https://w3c-ccg.github.io/lds-ed25519-2018/)
//! - [X25519KeyAgreementKey2019](https://w3c-ccg.github.io/ld-cryptosuite-registry/)

use serde::{Deserialize, Serialize};

use super::{method_specific_id, DidError, DidKey};
use crate::config::{DID_CONTEXT, ED25519_VERIFICATION_KEY_TYPE, X25519_KEY_AGREEMENT_TYPE};
use crate::encoding::bytes_to_base58;
use crate::key_type::KeyType;
use crate::keys::{ed25519_to_curve25519, PublicKey};

/// A W3C DID Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// The DID this document describes.
    pub id: String,

    pub verification_method: Vec<VerificationMethod>,

    /// References to verification methods usable for authentication.
    pub authentication: Vec<String>,

    #[serde(default)]
    pub assertion_method: Vec<String>,

    #[serde(default)]
    pub capability_delegation: Vec<String>,

    #[serde(default)]
    pub capability_invocation: Vec<String>,

    /// References to verification methods usable for key agreement.
    #[serde(default)]
    pub key_agreement: Vec<String>,
}

/// A verification method entry in a DID Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// DID URL of this method.
    pub id: String,

    #[serde(rename = "type")]
    pub type_: String,

    /// The DID that controls this key.
    pub controller: String,

    pub public_key_base58: String,
}

impl DidDocument {
    /// Build the document for `did`, controlled by the Ed25519 `public_key`.
    ///
    /// `did` must be fully qualified (`did:<method>:<id>`); use
    /// [`super::qualify`] for bare `sov` identifiers.
    pub fn build(did: &str, public_key: &PublicKey, key_type: KeyType) -> Result<Self, DidError> {
        if key_type != KeyType::Ed25519 {
            return Err(DidError::UnsupportedKeyTypeForDocument(key_type));
        }
        if !is_qualified(did) {
            return Err(DidError::InvalidFormat(format!(
                "document id must be a qualified DID, got '{did}'"
            )));
        }

        let x25519 = ed25519_to_curve25519(public_key)?;
        let x25519_fingerprint = DidKey::from_public_key(&x25519, KeyType::X25519).fingerprint();

        let ed25519_id = format!("{did}#{}", method_specific_id(did));
        let x25519_id = format!("{did}#{x25519_fingerprint}");

        Ok(Self {
            context: vec![DID_CONTEXT.to_string()],
            id: did.to_string(),
            verification_method: vec![
                VerificationMethod {
                    id: ed25519_id.clone(),
                    type_: ED25519_VERIFICATION_KEY_TYPE.to_string(),
                    controller: did.to_string(),
                    public_key_base58: public_key.to_base58(),
                },
                VerificationMethod {
                    id: x25519_id.clone(),
                    type_: X25519_KEY_AGREEMENT_TYPE.to_string(),
                    controller: did.to_string(),
                    public_key_base58: bytes_to_base58(&x25519),
                },
            ],
            authentication: vec![ed25519_id.clone()],
            assertion_method: vec![ed25519_id.clone()],
            capability_delegation: vec![ed25519_id.clone()],
            capability_invocation: vec![ed25519_id],
            key_agreement: vec![x25519_id],
        })
    }

    /// Serialize this document to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, DidError> {
        serde_json::to_string_pretty(self).map_err(|e| DidError::Serialization(e.to_string()))
    }

    /// Parse a DID Document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DidError> {
        serde_json::from_str(json).map_err(|e| DidError::Serialization(e.to_string()))
    }

    /// Look up a verification method by its full id.
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// Validate that the document has the required fields and structure.
    ///
    /// Checks:
    /// - The `id` field is a qualified DID
    /// - The DID Core context is included
    /// - At least one verification method and one authentication reference
    /// - Every relationship references a declared verification method
    pub fn validate(&self) -> Result<(), DidError> {
        if !is_qualified(&self.id) {
            return Err(DidError::InvalidFormat(
                "document ID must start with 'did:'".into(),
            ));
        }

        if !self.context.iter().any(|c| c == DID_CONTEXT) {
            return Err(DidError::InvalidFormat(
                "document must include DID Core context".into(),
            ));
        }

        if self.verification_method.is_empty() {
            return Err(DidError::InvalidFormat(
                "document must have at least one verification method".into(),
            ));
        }

        if self.authentication.is_empty() {
            return Err(DidError::InvalidFormat(
                "document must have at least one authentication method".into(),
            ));
        }

        let relationships = [
            &self.authentication,
            &self.assertion_method,
            &self.capability_delegation,
            &self.capability_invocation,
            &self.key_agreement,
        ];
        for reference in relationships.into_iter().flatten() {
            if self.verification_method(reference).is_none() {
                return Err(DidError::InvalidFormat(format!(
                    "reference '{reference}' does not resolve to a verification method"
                )));
            }
        }

        Ok(())
    }
}

fn is_qualified(did: &str) -> bool {
    did.strip_prefix("did:")
        .and_then(|rest| rest.split_once(':'))
        .is_some_and(|(method, id)| !method.is_empty() && !id.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
