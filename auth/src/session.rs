//! Signed session tokens.
//!
//! A token is `hex(payload) . hex(mac)` where payload is the JSON-encoded
//! principal plus an expiry, and the MAC is HMAC-SHA256 under the server's
//! session key. Verification is constant-time via `Mac::verify_slice`.

use crate::{AuthError, Principal};
use hmac::{Hmac, Mac};
use kinship_types::{FamilyCode, MemberId, Role, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default session lifetime: 24 hours.
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Server-side HMAC key for session tokens.
#[derive(Clone)]
pub struct SessionKey([u8; 32]);

impl SessionKey {
    /// Generate a fresh random key. Tokens signed under a previous key stop
    /// verifying, which signs every session out.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        getrandom::getrandom(&mut bytes).expect("OS RNG unavailable");
        Self(bytes)
    }

    /// Wrap key material loaded from configuration.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[derive(Serialize, Deserialize)]
struct TokenPayload {
    member_id: MemberId,
    role: Role,
    family_code: Option<FamilyCode>,
    expires_at: Timestamp,
}

/// Issues and verifies session tokens.
pub struct Sessions {
    key: SessionKey,
    ttl_secs: u64,
}

impl Sessions {
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    pub fn with_ttl(key: SessionKey, ttl_secs: u64) -> Self {
        Self { key, ttl_secs }
    }

    /// Issue a signed token for a principal, valid until `now + ttl`.
    pub fn issue(&self, principal: &Principal, now: Timestamp) -> String {
        let payload = TokenPayload {
            member_id: principal.member_id.clone(),
            role: principal.role,
            family_code: principal.family_code.clone(),
            expires_at: now.plus_secs(self.ttl_secs),
        };
        let bytes = serde_json::to_vec(&payload).expect("token payload serializes");
        let mac = self.mac_of(&bytes);
        format!("{}.{}", hex::encode(&bytes), hex::encode(mac))
    }

    /// Verify a token and produce the principal it carries.
    ///
    /// Absent, malformed, forged, or expired tokens all surface as
    /// `Unauthenticated`; the reason stays out of the caller-facing message.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<Principal, AuthError> {
        let invalid = || AuthError::Unauthenticated("invalid session token".into());

        let (payload_hex, mac_hex) = token.split_once('.').ok_or_else(invalid)?;
        let payload_bytes = hex::decode(payload_hex).map_err(|_| invalid())?;
        let mac_bytes = hex::decode(mac_hex).map_err(|_| invalid())?;

        let mut mac = HmacSha256::new_from_slice(&self.key.0).expect("HMAC accepts any key size");
        mac.update(&payload_bytes);
        mac.verify_slice(&mac_bytes).map_err(|_| invalid())?;

        let payload: TokenPayload =
            serde_json::from_slice(&payload_bytes).map_err(|_| invalid())?;
        if now >= payload.expires_at {
            return Err(AuthError::Unauthenticated("session expired".into()));
        }

        Ok(Principal {
            member_id: payload.member_id,
            role: payload.role,
            family_code: payload.family_code,
        })
    }

    fn mac_of(&self, bytes: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.key.0).expect("HMAC accepts any key size");
        mac.update(bytes);
        mac.finalize().into_bytes().to_vec()
    }
}
