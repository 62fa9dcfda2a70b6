//! # Local DIDs
//!
//! [`create_local_did`] is the one-stop entry point: it takes a method, a key
//! type and optional caller inputs, and returns an immutable [`DidInfo`]
//! carrying the DID, its verkey and the secret material behind it.
//!
//! ## Pipeline
//!
//! 1. The seed (if any) is normalized and length-checked.
//! 2. The method must support the key type.
//! 3. An explicit DID is only accepted by methods that allow one.
//! 4. A random seed is substituted when none was given, and the keypair is
//!    derived.
//! 5. The DID is resolved from the public key.
//!
//! Every check runs before any key material exists, and randomness is only
//! drawn once the request is known to be valid. A failed call leaves nothing
//! behind.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::did::{qualify, resolve_did, DidDocument, DidError, DidMethod};
use crate::key_type::KeyType;
use crate::keys::{
    create_keypair, supports_derivation, KeyError, OsRandom, PublicKey, RandomSource, SecretKey,
};
use crate::seed::{validate_seed, Seed, SeedError, SeedInput};
use crate::store::StoreError;

/// Free-form metadata attached to a DID record.
pub type Metadata = BTreeMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Any error the DID pipeline can produce.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Did(#[from] DidError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// DidInfo
// ---------------------------------------------------------------------------

/// A created DID and everything needed to act as it.
///
/// Immutable once built. `sov` DIDs are kept in their bare form
/// (`V4SGRU86Z58d6TV7PBUe6f`); use [`DidInfo::qualified_did`] for the
/// `did:sov:` form.
#[derive(Clone)]
pub struct DidInfo {
    did: String,
    method: DidMethod,
    key_type: KeyType,
    verkey: String,
    public_key: PublicKey,
    secret: SecretKey,
    seed: Seed,
    metadata: Metadata,
}

impl DidInfo {
    pub fn did(&self) -> &str {
        &self.did
    }

    pub fn method(&self) -> DidMethod {
        self.method
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Base58-encoded public key.
    pub fn verkey(&self) -> &str {
        &self.verkey
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// 64-byte private key, `seed || public key`.
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// The seed the keypair was derived from, random or caller-supplied.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The DID in `did:<method>:<id>` form.
    pub fn qualified_did(&self) -> String {
        qualify(self.method, &self.did)
    }

    /// Build the DID document for this record.
    ///
    /// A qualified explicit DID must name this record's method.
    pub fn to_document(&self) -> Result<DidDocument, DidError> {
        let did = self.qualified_did();
        let prefix = format!("did:{}:", self.method.method_name());
        if !did.starts_with(&prefix) {
            return Err(DidError::MethodMismatch {
                did,
                method: self.method,
            });
        }
        DidDocument::build(&did, &self.public_key, self.key_type)
    }
}

impl fmt::Debug for DidInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DidInfo")
            .field("did", &self.did)
            .field("method", &self.method)
            .field("key_type", &self.key_type)
            .field("verkey", &self.verkey)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Create a DID for `method` backed by a fresh `key_type` keypair.
///
/// With a seed, the result is fully deterministic. Without one, a random
/// seed is drawn from the OS. `did` is only accepted for `sov`, where it is
/// used verbatim. `metadata` is copied into the record.
pub fn create_local_did(
    method: DidMethod,
    key_type: KeyType,
    seed: Option<&SeedInput>,
    did: Option<&str>,
    metadata: Option<&Metadata>,
) -> Result<DidInfo, WalletError> {
    create(method, key_type, seed, did, metadata, &OsRandom)
}

/// Derive the bare `sov`-style DID for a seed.
///
/// Empty input falls back to a random seed, like [`create_local_did`].
pub fn seed_to_did(seed: &SeedInput) -> Result<String, WalletError> {
    let seed = match seed.validate()? {
        Some(seed) => seed,
        None => Seed::random(),
    };
    let keypair = create_keypair(KeyType::Ed25519, Some(&seed))?;
    Ok(resolve_did(
        DidMethod::Sov,
        KeyType::Ed25519,
        keypair.public_key(),
        None,
    )?)
}

/// Builder over [`create_local_did`].
///
/// ```
/// use didseed::{DidMethod, KeyType, LocalDid};
///
/// let info = LocalDid::new(DidMethod::Sov, KeyType::Ed25519)
///     .seed("000000000000000000000000Trustee1")
///     .create()
///     .unwrap();
/// assert_eq!(info.did(), "V4SGRU86Z58d6TV7PBUe6f");
/// ```
pub struct LocalDid<'a> {
    method: DidMethod,
    key_type: KeyType,
    seed: Option<SeedInput>,
    did: Option<String>,
    metadata: Option<Metadata>,
    rng: &'a dyn RandomSource,
}

impl<'a> LocalDid<'a> {
    pub fn new(method: DidMethod, key_type: KeyType) -> Self {
        Self {
            method,
            key_type,
            seed: None,
            did: None,
            metadata: None,
            rng: &OsRandom,
        }
    }

    pub fn seed(mut self, seed: impl Into<SeedInput>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn did(mut self, did: impl Into<String>) -> Self {
        self.did = Some(did.into());
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Randomness used when no seed is set.
    pub fn random_source(mut self, rng: &'a dyn RandomSource) -> Self {
        self.rng = rng;
        self
    }

    pub fn create(&self) -> Result<DidInfo, WalletError> {
        create(
            self.method,
            self.key_type,
            self.seed.as_ref(),
            self.did.as_deref(),
            self.metadata.as_ref(),
            self.rng,
        )
    }
}

fn create(
    method: DidMethod,
    key_type: KeyType,
    seed: Option<&SeedInput>,
    did: Option<&str>,
    metadata: Option<&Metadata>,
    rng: &dyn RandomSource,
) -> Result<DidInfo, WalletError> {
    let seed = validate_seed(seed)?;
    method.check_key_type(key_type)?;
    method.check_explicit_did(did)?;
    if !supports_derivation(key_type) {
        return Err(KeyError::UnsupportedKeyType(key_type).into());
    }

    let seeded = seed.is_some();
    let seed = match seed {
        Some(seed) => seed,
        None => Seed::random_from(rng),
    };
    let (public_key, secret) = create_keypair(key_type, Some(&seed))?.into_parts();
    let verkey = public_key.to_base58();
    let did = resolve_did(method, key_type, &public_key, did)?;

    debug!(%method, %key_type, seeded, "derived keypair for local DID");
    info!(%did, %method, %verkey, "created local DID");

    Ok(DidInfo {
        did,
        method,
        key_type,
        verkey,
        public_key,
        secret,
        seed,
        metadata: metadata.cloned().unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
