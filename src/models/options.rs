use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use zeroize::Zeroize;

use crate::error::ConfigError;

/// Digest function used inside the keyed (HMAC) construction.
///
/// Fixed per signer instance. `Sha1` exists for verifying links issued by
/// older deployments; new secrets should stay on the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        };
        write!(f, "{name}")
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Signer configuration, supplied once at construction.
///
/// Loadable from a YAML file for the CLI:
///
/// ```yaml
/// secret: "change-me"
/// ttl: 3600
/// algorithm: sha256
/// ```
#[derive(Clone, Deserialize)]
pub struct SignerOptions {
    /// Shared key; never transmitted, never logged.
    pub secret: String,

    /// Default lifetime in seconds for signed URLs; 0 means no expiry.
    #[serde(default)]
    pub ttl: u64,

    #[serde(default)]
    pub algorithm: HashAlgorithm,
}

impl SignerOptions {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: 0,
            algorithm: HashAlgorithm::default(),
        }
    }

    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Load options from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            ttl = options.ttl,
            algorithm = %options.algorithm,
            "Loaded signer options"
        );
        Ok(options)
    }
}

// The secret must never leak through Debug output or linger in freed memory.
impl fmt::Debug for SignerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerOptions")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Drop for SignerOptions {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}
