//! Reversible short-ID transform between internal numeric IDs and the opaque
//! tokens exposed to clients.
//!
//! Internal IDs are permuted with a keyed 4-round Feistel network over the
//! 64-bit space, then rendered as URL-safe base64 without padding. The result
//! is always 11 characters long and does not reveal ordering or cardinality
//! of the underlying keys.
//!
//! ```ignore
//! let codec = ShortIdCodec::new("secret", DecodePolicy::Strict);
//! let token = codec.encode(42);
//! assert_eq!(codec.decode(&token).unwrap(), 42);
//! ```

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Length of an encoded token (8 bytes in unpadded base64).
pub const TOKEN_LENGTH: usize = 11;

const ROUNDS: usize = 4;

/// Domain separation label for round key derivation.
const KEY_CONTEXT: &[u8] = b"question-api/short-id/v1";

/// Errors produced when a string is not a valid short token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortIdError {
    #[error("short id must be {TOKEN_LENGTH} characters, got {0}")]
    InvalidLength(usize),

    #[error("short id contains invalid characters")]
    InvalidEncoding,
}

/// What to do with input that is not a well-formed token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Only tokens produced by [`ShortIdCodec::encode`] are accepted.
    #[default]
    Strict,
    /// Plain decimal internal IDs are accepted when token decoding fails.
    Passthrough,
}

impl FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "passthrough" => Ok(Self::Passthrough),
            other => Err(format!(
                "decode policy must be 'strict' or 'passthrough', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Passthrough => f.write_str("passthrough"),
        }
    }
}

/// Keyed codec for question and user identifiers.
///
/// Cheap to share behind an `Arc`; holds no mutable state.
#[derive(Clone)]
pub struct ShortIdCodec {
    round_keys: [u32; ROUNDS],
    policy: DecodePolicy,
}

impl fmt::Debug for ShortIdCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortIdCodec")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ShortIdCodec {
    /// Derives round keys from `secret` with HMAC-SHA256.
    ///
    /// Two codecs built from the same secret produce identical tokens.
    pub fn new(secret: &str, policy: DecodePolicy) -> Self {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(KEY_CONTEXT);
        let digest = mac.finalize().into_bytes();

        let mut round_keys = [0u32; ROUNDS];
        for (key, chunk) in round_keys.iter_mut().zip(digest.chunks_exact(4)) {
            *key = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Self { round_keys, policy }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Encodes an internal ID into its external token.
    pub fn encode(&self, id: u64) -> String {
        URL_SAFE_NO_PAD.encode(self.permute(id).to_be_bytes())
    }

    /// Decodes an external token back into the internal ID.
    ///
    /// # Errors
    ///
    /// Returns [`ShortIdError`] if `token` is not a well-formed token and the
    /// policy does not allow a decimal passthrough.
    ///
    /// Under [`DecodePolicy::Passthrough`] the token reading wins: an 11-digit
    /// decimal ending in `0`, `4` or `8` is also a canonical token and decodes
    /// as one.
    pub fn decode(&self, token: &str) -> Result<u64, ShortIdError> {
        match self.decode_token(token) {
            Ok(id) => Ok(id),
            Err(err) => match self.policy {
                DecodePolicy::Passthrough if is_decimal(token) => token.parse().map_err(|_| err),
                _ => Err(err),
            },
        }
    }

    fn decode_token(&self, token: &str) -> Result<u64, ShortIdError> {
        if token.len() != TOKEN_LENGTH {
            return Err(ShortIdError::InvalidLength(token.len()));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| ShortIdError::InvalidEncoding)?;
        let bytes: [u8; 8] = bytes
            .try_into()
            .map_err(|_| ShortIdError::InvalidEncoding)?;

        Ok(self.unpermute(u64::from_be_bytes(bytes)))
    }

    fn permute(&self, value: u64) -> u64 {
        let (mut left, mut right) = split(value);
        for &key in &self.round_keys {
            (left, right) = (right, left ^ round(right, key));
        }
        join(left, right)
    }

    fn unpermute(&self, value: u64) -> u64 {
        let (mut left, mut right) = split(value);
        for &key in self.round_keys.iter().rev() {
            (left, right) = (right ^ round(left, key), left);
        }
        join(left, right)
    }
}

fn split(value: u64) -> (u32, u32) {
    ((value >> 32) as u32, value as u32)
}

fn join(left: u32, right: u32) -> u64 {
    (u64::from(left) << 32) | u64::from(right)
}

/// Feistel round function (32-bit integer finalizer mixed with the round key).
fn round(half: u32, key: u32) -> u32 {
    let mut h = half ^ key;
    h = (h ^ (h >> 16)).wrapping_mul(0x7feb_352d);
    h = (h ^ (h >> 15)).wrapping_mul(0x846c_a68b);
    h ^ (h >> 16)
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.len() <= 20 && s.bytes().all(|b| b.is_ascii_digit())
}
