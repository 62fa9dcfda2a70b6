// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # didseed
//!
//! Seed in, DID out. This crate turns a 32-byte seed into an Ed25519 keypair
//! and that keypair into a Decentralized Identifier under the `did:key` or
//! `did:sov` method, plus the DID document that goes with it.
//!
//! The same seed always yields the same verkey and the same DIDs, byte for
//! byte, as every other Indy/Aries agent: `000000000000000000000000Trustee1`
//! is `V4SGRU86Z58d6TV7PBUe6f` here too.
//!
//! ## Architecture
//!
//! - **encoding**: base58, base64 (with padding repair), hex, multibase.
//! - **seed**: normalizes caller-supplied seeds and enforces the 32-byte rule.
//! - **key_type**: the registry of key types and their multicodec prefixes.
//! - **keys**: deterministic keypair derivation and Curve25519 conversion.
//! - **did**: method table, `did:key` values, DID documents.
//! - **wallet**: [`create_local_did`], the whole pipeline in one call.
//! - **store**: optional in-memory registry with duplicate detection.
//! - **config**: lengths, prefixes and contexts fixed by external standards.
//!
//! ## Design Philosophy
//!
//! 1. Validate everything before deriving anything.
//! 2. Secrets never show up in `Debug` output or logs.
//! 3. Closed enums with lookup tables, not stringly-typed dispatch.

pub mod config;
pub mod did;
pub mod encoding;
pub mod key_type;
pub mod keys;
pub mod seed;
pub mod store;
pub mod wallet;

pub use did::{resolve_did, DidDocument, DidError, DidKey, DidMethod, VerificationMethod};
pub use encoding::EncodingError;
pub use key_type::KeyType;
pub use keys::{
    create_keypair, ed25519_secret_to_curve25519, ed25519_to_curve25519, keypair_from_seed,
    random_seed, KeyError, KeyPair, OsRandom, PublicKey, RandomSource, SecretKey,
};
pub use seed::{validate_seed, Seed, SeedError, SeedInput};
pub use store::{DidStore, StoreError, StoredDid};
pub use wallet::{create_local_did, seed_to_did, DidInfo, LocalDid, Metadata, WalletError};
