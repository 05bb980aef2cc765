use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a signer or loading its options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("unknown hash algorithm: {0} (expected sha1, sha256 or sha512)")]
    UnknownAlgorithm(String),

    #[error("failed to read options file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse options file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised by signing and verification.
///
/// Verification distinguishes exactly two failure kinds so callers can show
/// "tampered link" vs "link expired" messaging. No embedded data from a URL
/// that failed the digest check is ever trusted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// `sign` was given an empty URL.
    #[error("URL must not be empty")]
    EmptyUrl,

    /// Structural malformation or digest mismatch.
    #[error("invalid signature")]
    InvalidSignature,

    /// Authentic signature whose validity window has passed.
    #[error("signature expired")]
    ExpiredSignature,
}
