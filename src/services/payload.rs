//! Signature payload: the metadata a signed URL carries about itself.
//!
//! The payload is encoded as key/value pairs using `-` between pairs and
//! `_` between key and value, so it never collides with the surrounding
//! query string (`&`/`=`) or with the hex digest suffix.

use rand::Rng;

/// Pair separator inside the encoded payload.
const PAIR_SEPARATOR: char = '-';

/// Key/value separator inside the encoded payload.
const KEY_VALUE_SEPARATOR: char = '_';

/// Nonce size in bytes before hex encoding.
const NONCE_BYTES: usize = 16;

/// Metadata embedded into a signed URL.
///
/// Created fresh on each signing and fully consumed by each verification;
/// a payload never outlives a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePayload {
    /// Absolute expiry as Unix-epoch milliseconds; absent when the
    /// effective TTL is zero (no expiry).
    pub expires_at: Option<i64>,

    /// Random token making two signings of the identical URL at the
    /// identical instant produce different output.
    pub nonce: String,
}

impl SignaturePayload {
    /// Build a fresh payload. `expires_at` is only set for a nonzero TTL.
    pub fn new(ttl_secs: u64, now_ms: i64) -> Self {
        let expires_at =
            (ttl_secs > 0).then(|| now_ms.saturating_add((ttl_secs as i64).saturating_mul(1000)));
        Self {
            expires_at,
            nonce: fresh_nonce(),
        }
    }

    /// Encode as `exp_<ms>-rndNumber_<token>` (or just the nonce pair when
    /// there is no expiry).
    pub fn encode(&self) -> String {
        match self.expires_at {
            Some(ms) => format!("exp_{ms}-rndNumber_{}", self.nonce),
            None => format!("rndNumber_{}", self.nonce),
        }
    }

    /// Decode an encoded payload. Returns `None` on any unknown key,
    /// missing nonce, or unparseable expiry — callers treat that as a
    /// malformed signature, never as partially valid data.
    pub fn decode(encoded: &str) -> Option<Self> {
        let mut expires_at = None;
        let mut nonce = None;
        for pair in encoded.split(PAIR_SEPARATOR) {
            let (key, value) = pair.split_once(KEY_VALUE_SEPARATOR)?;
            match key {
                "exp" => expires_at = Some(value.parse::<i64>().ok()?),
                "rndNumber" if !value.is_empty() => nonce = Some(value.to_string()),
                _ => return None,
            }
        }
        Some(Self {
            expires_at,
            nonce: nonce?,
        })
    }
}

/// Generate a random hex nonce. Hex keeps the payload free of `-`/`_`
/// characters that would break pair parsing.
fn fresh_nonce() -> String {
    let bytes: [u8; NONCE_BYTES] = rand::thread_rng().gen();
    hex::encode(bytes)
}
