//! # Key Derivation
//!
//! Deterministic keypair generation from validated seeds.
//!
//! Given the same seed and key type, [`create_keypair`] returns bit-identical
//! key material every time. The only randomness in this module is
//! [`random_seed`], which callers hit when they don't supply a seed at all.
//!
//! ## Key layout
//!
//! Keys use the libsodium layout so that DIDs and verkeys line up with what
//! other Indy/Aries wallets produce for the same seed:
//!
//! - public key: 32 bytes, compressed Edwards point.
//! - private key: 64 bytes, `seed || public key`.
//!
//! ## Security considerations
//!
//! - Seeds come from `OsRng` unless the caller provides a [`RandomSource`].
//! - Key bytes are never logged. `Debug` on secret types prints nothing useful.

use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::config::{CURVE25519_KEY_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH};
use crate::encoding::{bytes_to_base58, bytes_to_hex};
use crate::key_type::KeyType;
use crate::seed::Seed;

/// Errors that can occur during key derivation and conversion.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The key type is registered but has no derivation implementation.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(KeyType),

    /// The key type name is not registered at all.
    #[error("unknown key type: {0}")]
    UnknownKeyType(String),

    /// The bytes are not a usable Ed25519 public key.
    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

// ---------------------------------------------------------------------------
// Randomness
// ---------------------------------------------------------------------------

/// Source of cryptographically secure random bytes.
///
/// Implementations may block until enough entropy is available but must
/// never return predictable output.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);

    fn random_bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        self.fill_bytes(&mut buf);
        buf
    }
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Generate a fresh random seed from the OS CSPRNG.
pub fn random_seed() -> Seed {
    random_seed_from(&OsRandom)
}

/// Generate a fresh random seed from the given source.
pub fn random_seed_from(source: &dyn RandomSource) -> Seed {
    let mut bytes = [0u8; SEED_LENGTH];
    source.fill_bytes(&mut bytes);
    Seed::from_bytes(bytes)
}

impl Seed {
    pub fn random() -> Self {
        random_seed()
    }

    pub fn random_from(source: &dyn RandomSource) -> Self {
        random_seed_from(source)
    }
}

// ---------------------------------------------------------------------------
// Key material
// ---------------------------------------------------------------------------

/// A raw 32-byte public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Length-checked construction. No curve validation happens here;
    /// conversion functions validate the point when they need to.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Base58 encoding, a.k.a. the verkey.
    pub fn to_base58(&self) -> String {
        bytes_to_base58(&self.0)
    }

    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// A raw 64-byte Ed25519 private key (`seed || public key`).
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; SECRET_KEY_LENGTH]);

impl SecretKey {
    pub fn from_bytes(bytes: [u8; SECRET_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// The 32-byte seed half of the key.
    pub fn seed_bytes(&self) -> [u8; SEED_LENGTH] {
        let mut seed = [0u8; SEED_LENGTH];
        seed.copy_from_slice(&self.0[..SEED_LENGTH]);
        seed
    }

    /// Hex encoding of the full private key. Don't log the result.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// A derived keypair.
///
/// Deliberately not `Serialize`: turning private key material into JSON
/// should take more than one accidental `#[derive]`.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    public_key: PublicKey,
    secret_key: SecretKey,
}

impl KeyPair {
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn into_parts(self) -> (PublicKey, SecretKey) {
        (self.public_key, self.secret_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key.to_base58())
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Expand a seed into an Ed25519 keypair (RFC 8032 key generation).
pub fn keypair_from_seed(seed: &Seed) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed.as_bytes());
    KeyPair {
        public_key: PublicKey(signing_key.verifying_key().to_bytes()),
        secret_key: SecretKey(signing_key.to_keypair_bytes()),
    }
}

/// Create a keypair of the given type, drawing a random seed from the OS
/// when none is supplied.
pub fn create_keypair(key_type: KeyType, seed: Option<&Seed>) -> Result<KeyPair, KeyError> {
    create_keypair_with(key_type, seed, &OsRandom)
}

/// Like [`create_keypair`], with an explicit randomness source for the
/// seedless case. The key type is checked before any randomness is drawn.
pub fn create_keypair_with(
    key_type: KeyType,
    seed: Option<&Seed>,
    rng: &dyn RandomSource,
) -> Result<KeyPair, KeyError> {
    let derive = derivation(key_type).ok_or(KeyError::UnsupportedKeyType(key_type))?;
    let keypair = match seed {
        Some(seed) => derive(seed),
        None => derive(&random_seed_from(rng)),
    };
    debug!(key_type = %key_type, seeded = seed.is_some(), "derived keypair");
    Ok(keypair)
}

/// Whether keys of this type can be derived from a seed.
pub fn supports_derivation(key_type: KeyType) -> bool {
    derivation(key_type).is_some()
}

fn derivation(key_type: KeyType) -> Option<fn(&Seed) -> KeyPair> {
    match key_type {
        KeyType::Ed25519 => Some(keypair_from_seed),
        KeyType::X25519 | KeyType::Bls12381G2 => None,
    }
}

// ---------------------------------------------------------------------------
// Curve25519 conversion
// ---------------------------------------------------------------------------

/// Convert an Ed25519 public key to its X25519 (Montgomery) form.
///
/// Rejects bytes that do not decompress to a curve point, small-order points,
/// and points outside the prime-order subgroup.
pub fn ed25519_to_curve25519(
    public_key: &PublicKey,
) -> Result<[u8; CURVE25519_KEY_LENGTH], KeyError> {
    let point = CompressedEdwardsY(*public_key.as_bytes())
        .decompress()
        .ok_or(KeyError::InvalidPublicKey)?;
    if point.is_small_order() || !point.is_torsion_free() {
        return Err(KeyError::InvalidPublicKey);
    }
    Ok(point.to_montgomery().to_bytes())
}

/// Convert an Ed25519 private key to the clamped X25519 secret scalar that
/// pairs with [`ed25519_to_curve25519`] of its public key.
///
/// The scalar is the lower half of `SHA-512(seed)`, the same value Ed25519
/// itself multiplies the base point by.
pub fn ed25519_secret_to_curve25519(secret_key: &SecretKey) -> [u8; CURVE25519_KEY_LENGTH] {
    let digest = Sha512::digest(secret_key.seed_bytes());
    let mut scalar = [0u8; CURVE25519_KEY_LENGTH];
    scalar.copy_from_slice(&digest[..CURVE25519_KEY_LENGTH]);
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
    scalar
}
