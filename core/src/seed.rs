//! # Seed Validation
//!
//! A seed is the 32 bytes every keypair in this crate grows from. Callers
//! hand seeds to us in several shapes: raw bytes, plain ASCII strings (test
//! fixtures like `000000000000000000000000Trustee1`), or base64 text
//! produced by some other wallet. [`SeedInput`] names those shapes
//! explicitly and [`validate_seed`] normalizes all of them into a [`Seed`].
//!
//! Validation is two-stage: first figure out how to turn the input into
//! bytes, then insist on exactly [`SEED_LENGTH`] bytes. Short memorable
//! strings and opaque random seeds end up under the same length rule.
//!
//! Seed bytes are never logged and never printed by `Debug`.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::config::SEED_LENGTH;
use crate::encoding::{base64_to_bytes, bytes_to_hex, EncodingError};

/// Errors that can occur while normalizing a seed.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The input is not something a seed can be made from.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// The normalized seed has the wrong number of bytes.
    #[error("seed value must be 32 bytes in length, got {len}")]
    InvalidSeedLength { len: usize },

    /// Base64 seed text could not be decoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A validated 32-byte seed.
///
/// The fixed-size array makes the length invariant structural: if you are
/// holding a `Seed`, it is 32 bytes long.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Build a seed from a slice, rejecting anything that isn't exactly
    /// [`SEED_LENGTH`] bytes.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, SeedError> {
        let arr: [u8; SEED_LENGTH] = bytes
            .try_into()
            .map_err(|_| SeedError::InvalidSeedLength { len: bytes.len() })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }

    /// Hex encoding of the seed. Handle the result like the seed itself.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

// ---------------------------------------------------------------------------
// SeedInput
// ---------------------------------------------------------------------------

/// The shapes a caller-supplied seed can take before validation.
#[derive(Clone, PartialEq, Eq)]
pub enum SeedInput {
    /// Text whose format is sniffed: anything containing `=` is treated as
    /// base64, everything else as raw ASCII.
    Text(String),
    /// Text that is always base64 (standard alphabet, padding optional).
    Base64(String),
    /// Raw seed bytes, used as-is.
    Bytes(Vec<u8>),
}

impl SeedInput {
    /// Convert a JSON value (configuration files, RPC payloads) into a seed
    /// input. `null` means "no seed"; strings become [`SeedInput::Text`];
    /// arrays of byte values become [`SeedInput::Bytes`]. Everything else is
    /// rejected with [`SeedError::InvalidSeed`].
    pub fn from_json(value: &Value) -> Result<Option<Self>, SeedError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(Self::Text(s.clone()))),
            Value::Array(items) => {
                let bytes = items
                    .iter()
                    .map(|item| {
                        item.as_u64()
                            .and_then(|n| u8::try_from(n).ok())
                            .ok_or_else(|| {
                                SeedError::InvalidSeed(format!(
                                    "seed array element {item} is not a byte"
                                ))
                            })
                    })
                    .collect::<Result<Vec<u8>, _>>()?;
                Ok(Some(Self::Bytes(bytes)))
            }
            other => Err(SeedError::InvalidSeed(format!(
                "seed value is not a string or bytes: {other}"
            ))),
        }
    }

    /// Normalize this input into a seed. Empty input yields `None`.
    pub fn validate(&self) -> Result<Option<Seed>, SeedError> {
        let bytes = match self {
            Self::Text(s) if s.is_empty() => return Ok(None),
            Self::Base64(s) if s.is_empty() => return Ok(None),
            Self::Bytes(b) if b.is_empty() => return Ok(None),
            Self::Text(s) if s.contains('=') => base64_to_bytes(s, false)?,
            Self::Text(s) => {
                if !s.is_ascii() {
                    return Err(SeedError::InvalidSeed(
                        "seed text must be ASCII".to_string(),
                    ));
                }
                s.as_bytes().to_vec()
            }
            Self::Base64(s) => base64_to_bytes(s, false)?,
            Self::Bytes(b) => b.clone(),
        };
        Seed::try_from_slice(&bytes).map(Some)
    }
}

impl fmt::Debug for SeedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Text(_) => "Text",
            Self::Base64(_) => "Base64",
            Self::Bytes(_) => "Bytes",
        };
        write!(f, "SeedInput::{kind}(..)")
    }
}

impl From<&str> for SeedInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SeedInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for SeedInput {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for SeedInput {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<&Seed> for SeedInput {
    fn from(value: &Seed) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }
}

/// Convert a seed parameter to canonical form and check its length.
///
/// Returns `Ok(None)` for absent or empty input; the caller is expected to
/// substitute a fresh random seed in that case.
pub fn validate_seed(input: Option<&SeedInput>) -> Result<Option<Seed>, SeedError> {
    match input {
        None => Ok(None),
        Some(input) => input.validate(),
    }
}
