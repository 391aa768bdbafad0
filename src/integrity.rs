//! Subresource-integrity encoding of SHA-256 digests.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Algorithm prefix of every integrity string produced here.
pub const SRI_PREFIX: &str = "sha256-";

/// Number of raw bytes in a SHA-256 digest.
const DIGEST_LEN: usize = 32;

/// Errors arising from converting a hex digest to an integrity string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The input is not valid hexadecimal.
    #[error("invalid hex sha256 {value}: {reason}")]
    InvalidHex {
        /// The rejected input.
        value: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// The input decoded to the wrong number of bytes.
    #[error("invalid hex sha256 {value}: expected 32 bytes, got {len}")]
    Length {
        /// The rejected input.
        value: String,
        /// Number of decoded bytes.
        len: usize,
    },
}

/// Convert a hex SHA-256 digest into a `sha256-<base64>` integrity string.
///
/// # Errors
///
/// Returns [`EncodeError`] if `hex_digest` is not hex or does not decode to
/// exactly 32 bytes.
///
/// # Examples
///
/// ```
/// use release_hashes::integrity::sha256_hex_to_sri;
///
/// let sri = sha256_hex_to_sri(
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
/// )
/// .expect("valid digest");
/// assert_eq!(sri, "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
/// ```
pub fn sha256_hex_to_sri(hex_digest: &str) -> Result<String, EncodeError> {
    let raw = hex::decode(hex_digest).map_err(|e| EncodeError::InvalidHex {
        value: hex_digest.to_owned(),
        reason: e.to_string(),
    })?;
    if raw.len() != DIGEST_LEN {
        return Err(EncodeError::Length {
            value: hex_digest.to_owned(),
            len: raw.len(),
        });
    }
    Ok(format!("{SRI_PREFIX}{}", STANDARD.encode(raw)))
}
