//! Signed URL production and verification.
//!
//! A signed URL is the only state: no session, no database lookup. The
//! wire format is
//!
//! ```text
//! <original-url>[?|&]signed=<payload>-<hex-digest>
//! ```
//!
//! where the digest is a keyed HMAC over everything preceding the final
//! `-`. Verification always checks the digest before trusting anything
//! embedded in the URL, so a tampered link fails as invalid rather than
//! leaking whether its timestamp looked expired.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::Zeroize;

use crate::error::{ConfigError, SignatureError};
use crate::models::{HashAlgorithm, SignerOptions};
use crate::services::payload::SignaturePayload;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Separator between the payload-carrying URL and the hex digest suffix.
/// Hex never contains `-`, so the last occurrence is unambiguous.
const DIGEST_SEPARATOR: char = '-';

/// Query parameter carrying the encoded payload.
const SIGNED_PARAM: &str = "signed=";

/// Stateless signer/verifier for tamper-evident, optionally expiring URLs.
///
/// All methods take `&self`; instances are immutable after construction and
/// safe to share across threads. The secret is zeroed on drop.
pub struct UrlSigner {
    secret: Vec<u8>,
    /// Default lifetime in seconds; 0 means signed URLs never expire.
    ttl: u64,
    algorithm: HashAlgorithm,
}

impl UrlSigner {
    /// Build a signer from options. Fails fast on an empty secret rather
    /// than producing unverifiable URLs later.
    pub fn new(options: &SignerOptions) -> Result<Self, ConfigError> {
        if options.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self {
            secret: options.secret.as_bytes().to_vec(),
            ttl: options.ttl,
            algorithm: options.algorithm,
        })
    }

    /// Convenience constructor: given secret, no default expiry, default
    /// algorithm.
    pub fn with_secret(secret: &str) -> Result<Self, ConfigError> {
        Self::new(&SignerOptions::new(secret))
    }

    /// Sign a URL. `ttl_override` replaces the instance default for this
    /// call; an effective TTL of 0 issues a URL with no expiry.
    pub fn sign(&self, url: &str, ttl_override: Option<u64>) -> Result<String, SignatureError> {
        self.sign_at(url, ttl_override, now_ms())
    }

    /// Like [`sign`](Self::sign) with an explicit clock, for callers that
    /// need deterministic timestamps (tests, replay tooling).
    pub fn sign_at(
        &self,
        url: &str,
        ttl_override: Option<u64>,
        now_ms: i64,
    ) -> Result<String, SignatureError> {
        if url.is_empty() {
            return Err(SignatureError::EmptyUrl);
        }
        let ttl = ttl_override.unwrap_or(self.ttl);
        let payload = SignaturePayload::new(ttl, now_ms);
        let joiner = if url.contains('?') { '&' } else { '?' };
        let message = format!("{url}{joiner}{SIGNED_PARAM}{}", payload.encode());
        let digest = self.digest_hex(&message);
        Ok(format!("{message}{DIGEST_SEPARATOR}{digest}"))
    }

    /// Verify a signed URL against the secret and the current time.
    pub fn verify(&self, signed_url: &str) -> Result<(), SignatureError> {
        self.verify_at(signed_url, now_ms())
    }

    /// Like [`verify`](Self::verify) with an explicit clock.
    pub fn verify_at(&self, signed_url: &str, now_ms: i64) -> Result<(), SignatureError> {
        self.authenticate(signed_url, now_ms).map(|_| ())
    }

    /// Verify a signed URL and return the original URL with the signature
    /// parameter and digest stripped.
    pub fn verify_and_strip(&self, signed_url: &str) -> Result<String, SignatureError> {
        self.verify_and_strip_at(signed_url, now_ms())
    }

    /// Like [`verify_and_strip`](Self::verify_and_strip) with an explicit
    /// clock.
    pub fn verify_and_strip_at(
        &self,
        signed_url: &str,
        now_ms: i64,
    ) -> Result<String, SignatureError> {
        let (message, param_start) = self.authenticate(signed_url, now_ms)?;
        Ok(message[..param_start].to_string())
    }

    /// Full verification in strict order: digest first, payload decoding
    /// second, expiry last. Returns the digest-stripped message and the
    /// byte offset of the signature parameter (including its `?`/`&`
    /// joiner).
    fn authenticate<'a>(
        &self,
        signed_url: &'a str,
        now_ms: i64,
    ) -> Result<(&'a str, usize), SignatureError> {
        let (message, claimed) = signed_url
            .rsplit_once(DIGEST_SEPARATOR)
            .ok_or(SignatureError::InvalidSignature)?;

        let expected = self.digest_hex(message);
        if !constant_time_eq(expected.as_bytes(), claimed.as_bytes()) {
            return Err(SignatureError::InvalidSignature);
        }

        let param_start =
            locate_signed_param(message).ok_or(SignatureError::InvalidSignature)?;
        let encoded = &message[param_start + 1 + SIGNED_PARAM.len()..];
        let payload =
            SignaturePayload::decode(encoded).ok_or(SignatureError::InvalidSignature)?;

        if let Some(expires_at) = payload.expires_at {
            if expires_at < now_ms {
                return Err(SignatureError::ExpiredSignature);
            }
        }

        Ok((message, param_start))
    }

    /// Lowercase hex HMAC digest of `message` under the instance secret.
    fn digest_hex(&self, message: &str) -> String {
        match self.algorithm {
            HashAlgorithm::Sha1 => {
                let mut mac = HmacSha1::new_from_slice(&self.secret)
                    .expect("HMAC can take key of any size");
                mac.update(message.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
            HashAlgorithm::Sha256 => {
                let mut mac = HmacSha256::new_from_slice(&self.secret)
                    .expect("HMAC can take key of any size");
                mac.update(message.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
            HashAlgorithm::Sha512 => {
                let mut mac = HmacSha512::new_from_slice(&self.secret)
                    .expect("HMAC can take key of any size");
                mac.update(message.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
        }
    }
}

impl Drop for UrlSigner {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Byte offset of the `?`/`&` introducing the rightmost `signed=`
/// parameter. The rightmost occurrence is the one `sign` appended; anything
/// earlier belongs to the caller's own query string.
fn locate_signed_param(message: &str) -> Option<usize> {
    let amp = message.rfind(&format!("&{SIGNED_PARAM}"));
    let question = message.rfind(&format!("?{SIGNED_PARAM}"));
    match (amp, question) {
        (Some(a), Some(q)) => Some(a.max(q)),
        (a, q) => a.or(q),
    }
}

/// Constant-time comparison to prevent timing attacks on the digest.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
