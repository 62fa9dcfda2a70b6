//! # DIDs
//!
//! Turning public keys into Decentralized Identifiers, and DIDs into W3C
//! DID documents.
//!
//! Two methods are supported:
//!
//! - **`did:key`**: the identifier *is* the key. The public key is prefixed
//!   with its multicodec tag and multibase (base58btc) encoded, so any
//!   `did:key` can be turned back into the key it names without a registry.
//! - **`did:sov`**: the Sovrin/Indy convention. The identifier is the base58
//!   encoding of the first 16 bytes of the Ed25519 verkey. Callers can also
//!   bring an externally issued DID, which is used verbatim.
//!
//! ## Layout
//!
//! - [`method`]: the method table and [`resolve_did`].
//! - [`key`]: the [`DidKey`] value type (construction and parsing).
//! - [`document`]: [`DidDocument`] generation and validation.

pub mod document;
pub mod key;
pub mod method;

pub use document::{DidDocument, VerificationMethod};
pub use key::DidKey;
pub use method::{resolve_did, DidMethod, MethodSpec};

use thiserror::Error;

use crate::config::DID_SCHEME;
use crate::encoding::EncodingError;
use crate::key_type::KeyType;
use crate::keys::KeyError;

/// Errors that can occur while constructing, parsing or documenting DIDs.
#[derive(Debug, Error)]
pub enum DidError {
    /// The DID method name is not one we know how to handle.
    #[error("unsupported DID method: {0}")]
    UnsupportedMethod(String),

    /// The key type is not in the method's supported set.
    #[error("invalid key type {key_type} for method {method}")]
    UnsupportedKeyTypeForMethod { key_type: KeyType, method: DidMethod },

    /// The public key length does not fit the key type.
    #[error("{key_type} public keys are {expected} bytes, got {actual}")]
    KeyLengthMismatch {
        key_type: KeyType,
        expected: usize,
        actual: usize,
    },

    /// A qualified DID names a different method than the record it belongs to.
    #[error("'{did}' is not a did:{method} identifier")]
    MethodMismatch { did: String, method: DidMethod },

    /// An explicit DID was supplied for a method that derives its own.
    #[error("not allowed to set DID for DID method '{0}'")]
    DidConflict(DidMethod),

    /// The DID string does not have the expected shape.
    #[error("invalid DID format: {0}")]
    InvalidFormat(String),

    /// The multicodec prefix of a `did:key` is not registered.
    #[error("unknown multicodec prefix in '{0}'")]
    UnknownMulticodec(String),

    /// DID documents can only be built for Ed25519 keys.
    #[error("cannot build a DID document for key type {0}")]
    UnsupportedKeyTypeForDocument(KeyType),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Key(#[from] KeyError),

    /// Document (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Return `did` in fully qualified `did:<method>:<id>` form.
///
/// `did:sov` identifiers are produced unqualified; anything already starting
/// with `did:` is returned unchanged.
pub fn qualify(method: DidMethod, did: &str) -> String {
    if did.starts_with("did:") {
        did.to_string()
    } else {
        format!("{}:{}:{}", DID_SCHEME, method.method_name(), did)
    }
}

/// The method-specific identifier: everything after the last `:`.
pub fn method_specific_id(did: &str) -> &str {
    did.rsplit(':').next().unwrap_or(did)
}
