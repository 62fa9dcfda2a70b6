//! # Derivation Constants
//!
//! Every magic number used by the derivation pipeline lives here: key and
//! seed lengths, multicodec prefixes, DID document contexts. If you're
//! hardcoding a `32` somewhere else, it probably belongs in this file.
//!
//! These values are fixed by external standards (RFC 8032, the multicodec
//! table, DID Core). Changing one of them silently changes every DID the
//! library produces, so don't.

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Canonical seed length in bytes. Every seed accepted downstream is exactly
/// this long; anything else is rejected before it gets near a key.
pub const SEED_LENGTH: usize = 32;

/// Ed25519 public (verification) key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 private key length in bytes, libsodium layout: `seed || public`.
pub const SECRET_KEY_LENGTH: usize = 64;

/// Curve25519 (X25519) key length in bytes.
pub const CURVE25519_KEY_LENGTH: usize = 32;

/// Number of leading public-key bytes that make up a `did:sov` identifier.
pub const SOV_DID_BYTES: usize = 16;

// ---------------------------------------------------------------------------
// Multicodec / Multibase
// ---------------------------------------------------------------------------

/// Multicodec varint prefix for `ed25519-pub`.
pub const MULTICODEC_ED25519_PUB: [u8; 2] = [0xed, 0x01];

/// Multicodec varint prefix for `x25519-pub`.
pub const MULTICODEC_X25519_PUB: [u8; 2] = [0xec, 0x01];

/// Multicodec varint prefix for `bls12_381-g2-pub`.
pub const MULTICODEC_BLS12381G2_PUB: [u8; 2] = [0xeb, 0x01];

/// Multibase prefix character for base58btc.
pub const MULTIBASE_BASE58BTC: char = 'z';

// ---------------------------------------------------------------------------
// DID Methods
// ---------------------------------------------------------------------------

/// URI scheme shared by every DID.
pub const DID_SCHEME: &str = "did";

/// Method name for `did:key`.
pub const METHOD_KEY: &str = "key";

/// Method name for `did:sov`.
pub const METHOD_SOV: &str = "sov";

// ---------------------------------------------------------------------------
// DID Documents
// ---------------------------------------------------------------------------

/// Context URI for the W3C DID Core specification.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// Verification method type for Ed25519 public keys (base58 encoded).
pub const ED25519_VERIFICATION_KEY_TYPE: &str = "Ed25519VerificationKey2018";

/// Verification method type for X25519 key agreement keys.
pub const X25519_KEY_AGREEMENT_TYPE: &str = "X25519KeyAgreementKey2019";
