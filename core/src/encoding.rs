//! # Encoding Utilities
//!
//! Base58, base64, hex and multibase conversions used at every boundary of
//! the derivation pipeline. Everything here is a pure function: bytes in,
//! text out (or the other way around), no state, no surprises.
//!
//! ## Base64 padding
//!
//! Decoding always normalizes padding first, so both padded and unpadded
//! (JWT-style) input decode to the same bytes. The padding length is
//! `4 - len % 4`; when that is greater than 2 the input is left untouched.
//! That covers input that is already a multiple of 4, and also the
//! `len % 4 == 1` case, which can never be valid base64 and is handed to the
//! decoder as-is so that it fails there.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE};
use base64::Engine as _;
use thiserror::Error;

use crate::config::MULTIBASE_BASE58BTC;

/// Errors raised while decoding text back into bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("decoded bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The multibase string does not start with the expected base prefix.
    #[error("unsupported multibase prefix in '{0}': expected base58btc ('z')")]
    Multibase(String),
}

// ---------------------------------------------------------------------------
// Base58
// ---------------------------------------------------------------------------

/// Encode bytes as base58 (Bitcoin alphabet).
pub fn bytes_to_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode a base58 (Bitcoin alphabet) string.
pub fn base58_to_bytes(value: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(bs58::decode(value).into_vec()?)
}

// ---------------------------------------------------------------------------
// Base64
// ---------------------------------------------------------------------------

/// Encode bytes as base64.
///
/// `urlsafe` selects the URL-safe alphabet (`-_` instead of `+/`). When `pad`
/// is false, trailing `=` characters are stripped.
pub fn bytes_to_base64(bytes: &[u8], urlsafe: bool, pad: bool) -> String {
    let encoded = if urlsafe {
        URL_SAFE.encode(bytes)
    } else {
        STANDARD.encode(bytes)
    };
    if pad {
        encoded
    } else {
        unpad(&encoded).to_string()
    }
}

/// Decoders that ignore set bits past the last full byte (`YR==` reads as `a`).
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode base64, tolerating missing padding and non-zero trailing bits.
pub fn base64_to_bytes(value: &str, urlsafe: bool) -> Result<Vec<u8>, EncodingError> {
    let padded = pad(value);
    let decoded = if urlsafe {
        URL_SAFE_LENIENT.decode(padded.as_bytes())?
    } else {
        STANDARD_LENIENT.decode(padded.as_bytes())?
    };
    Ok(decoded)
}

/// Decode base64 into a UTF-8 string.
pub fn base64_to_str(value: &str, urlsafe: bool) -> Result<String, EncodingError> {
    let bytes = base64_to_bytes(value, urlsafe)?;
    Ok(String::from_utf8(bytes)?)
}

/// Re-add base64 padding that JWT-style encoders omit.
pub fn pad(value: &str) -> String {
    let padlen = 4 - value.len() % 4;
    if padlen > 2 {
        value.to_string()
    } else {
        let mut padded = String::with_capacity(value.len() + padlen);
        padded.push_str(value);
        padded.extend(std::iter::repeat('=').take(padlen));
        padded
    }
}

/// Strip trailing base64 padding.
pub fn unpad(value: &str) -> &str {
    value.trim_end_matches('=')
}

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

/// Lowercase hex. Display and debugging only.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(hex::decode(value)?)
}

// ---------------------------------------------------------------------------
// Multibase
// ---------------------------------------------------------------------------

/// Encode bytes as a multibase base58btc string (`z` prefix).
pub fn multibase_base58btc(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 138 / 100 + 2);
    encoded.push(MULTIBASE_BASE58BTC);
    encoded.push_str(&bytes_to_base58(bytes));
    encoded
}

/// Decode a multibase base58btc string. Other multibase encodings are
/// rejected rather than guessed at.
pub fn multibase_base58btc_decode(value: &str) -> Result<Vec<u8>, EncodingError> {
    let body = value
        .strip_prefix(MULTIBASE_BASE58BTC)
        .ok_or_else(|| EncodingError::Multibase(value.to_string()))?;
    base58_to_bytes(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base58_known_value() {
        assert_eq!(bytes_to_base58(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(base58_to_bytes("StV1DL6CwTryKyV").unwrap(), b"hello world");
    }

    #[test]
    fn base58_preserves_leading_zeros() {
        let bytes = [0u8, 0, 1, 2, 3];
        let encoded = bytes_to_base58(&bytes);
        assert!(encoded.starts_with("11"));
        assert_eq!(base58_to_bytes(&encoded).unwrap(), bytes);
    }

    #[test]
    fn base58_rejects_invalid_alphabet() {
        // '0', 'O', 'I' and 'l' are not part of the Bitcoin alphabet.
        assert!(matches!(
            base58_to_bytes("0OIl"),
            Err(EncodingError::Base58(_))
        ));
    }

    #[test]
    fn base64_padded_and_unpadded() {
        assert_eq!(bytes_to_base64(b"a", false, true), "YQ==");
        assert_eq!(bytes_to_base64(b"a", false, false), "YQ");
        assert_eq!(base64_to_bytes("YQ==", false).unwrap(), b"a");
        assert_eq!(base64_to_bytes("YQ", false).unwrap(), b"a");
    }

    #[test]
    fn base64_urlsafe_alphabet() {
        let bytes = [0xfb, 0xff, 0xbf];
        assert_eq!(bytes_to_base64(&bytes, false, true), "+/+/");
        assert_eq!(bytes_to_base64(&bytes, true, true), "-_-_");
        assert_eq!(base64_to_bytes("-_-_", true).unwrap(), bytes);
        assert!(base64_to_bytes("-_-_", false).is_err());
    }

    #[test]
    fn base64_ignores_trailing_bits() {
        assert_eq!(base64_to_bytes("YR==", false).unwrap(), b"a");
        assert_eq!(base64_to_bytes("YR", true).unwrap(), b"a");
        assert_eq!(base64_to_bytes("YWJ", false).unwrap(), b"ab");
    }

    #[test]
    fn pad_lengths() {
        assert_eq!(pad(""), "");
        assert_eq!(pad("YWJj"), "YWJj");
        assert_eq!(pad("YWI"), "YWI=");
        assert_eq!(pad("YQ"), "YQ==");
        // Remainder 1 is never valid base64; it passes through untouched.
        assert_eq!(pad("YWJjZ"), "YWJjZ");
    }

    #[test]
    fn remainder_one_fails_in_decoder() {
        assert!(matches!(
            base64_to_bytes("YWJjZ", false),
            Err(EncodingError::Base64(_))
        ));
    }

    #[test]
    fn unpad_strips_only_trailing_padding() {
        assert_eq!(unpad("YQ=="), "YQ");
        assert_eq!(unpad("YWJj"), "YWJj");
    }

    #[test]
    fn base64_to_str_decodes_text() {
        assert_eq!(base64_to_str("aGVsbG8", false).unwrap(), "hello");
        let invalid_utf8 = bytes_to_base64(&[0xff, 0xfe], false, true);
        assert!(matches!(
            base64_to_str(&invalid_utf8, false),
            Err(EncodingError::Utf8(_))
        ));
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(hex_to_bytes("deadbeef").unwrap(), [0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(hex_to_bytes("xyz"), Err(EncodingError::Hex(_))));
    }

    #[test]
    fn multibase_prefix() {
        let encoded = multibase_base58btc(b"hello world");
        assert_eq!(encoded, "zStV1DL6CwTryKyV");
        assert_eq!(multibase_base58btc_decode(&encoded).unwrap(), b"hello world");
        assert!(matches!(
            multibase_base58btc_decode("mSGVsbG8"),
            Err(EncodingError::Multibase(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_base58_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(base58_to_bytes(&bytes_to_base58(&bytes)).unwrap(), bytes);
        }

        #[test]
        fn prop_base64_roundtrip(
            bytes in prop::collection::vec(any::<u8>(), 0..128),
            urlsafe in any::<bool>(),
            padded in any::<bool>(),
        ) {
            let encoded = bytes_to_base64(&bytes, urlsafe, padded);
            prop_assert_eq!(base64_to_bytes(&encoded, urlsafe).unwrap(), bytes);
        }

        #[test]
        fn prop_unpadded_never_ends_with_padding(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let encoded = bytes_to_base64(&bytes, false, false);
            prop_assert!(!encoded.ends_with('='));
        }
    }
}
