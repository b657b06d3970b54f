//! Caller resolution from bearer credentials.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::entities::{CallerIdentity, UserId};

type HmacSha256 = Hmac<Sha256>;

/// Resolves the caller behind a bearer credential.
///
/// Implementations must not fail: anything that cannot be verified resolves
/// to [`CallerIdentity::Anonymous`].
pub trait CredentialVerifier: Send + Sync {
    fn resolve(&self, token: &str) -> CallerIdentity;
}

/// Verifies HMAC-signed session tokens without any I/O.
///
/// # Token Format
///
/// ```text
/// <user_id>.<expires_at_unix>.<hex(HMAC-SHA256(secret, "<user_id>.<expires_at_unix>"))>
/// ```
///
/// Tokens are issued elsewhere with the same `TOKEN_SIGNING_SECRET`; this
/// service only consumes them.
pub struct HmacCredentialVerifier {
    signing_secret: String,
}

impl HmacCredentialVerifier {
    /// Creates a verifier keyed by `signing_secret`.
    pub fn new(signing_secret: String) -> Self {
        Self { signing_secret }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length")
    }

    /// Verifies `token` against the clock value `now`.
    ///
    /// Returns `None` for malformed, forged or expired tokens.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<UserId> {
        let mut parts = token.trim().splitn(3, '.');
        let (user, expires, signature) = (parts.next()?, parts.next()?, parts.next()?);

        let user_id: u64 = user.parse().ok()?;
        let expires_at: i64 = expires.parse().ok()?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(user.as_bytes());
        mac.update(b".");
        mac.update(expires.as_bytes());
        mac.verify_slice(&signature).ok()?;

        if now.timestamp() >= expires_at {
            tracing::debug!(user_id, expires_at, "credential expired");
            return None;
        }

        Some(UserId(user_id))
    }
}

impl CredentialVerifier for HmacCredentialVerifier {
    fn resolve(&self, token: &str) -> CallerIdentity {
        match self.verify_at(token, Utc::now()) {
            Some(user_id) => CallerIdentity::User(user_id),
            None => CallerIdentity::Anonymous,
        }
    }
}
