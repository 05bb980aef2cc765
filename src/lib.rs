//! Sealink - stateless signed, expiring URLs.
//!
//! Produces tamper-evident URLs that carry their own authenticity proof
//! and optional expiry, and verifies them without any server-side session
//! or database lookup. The URL is the only state.
//!
//! # Quick Start
//!
//! ```
//! use sealink::{SignerOptions, UrlSigner};
//!
//! let signer = UrlSigner::new(&SignerOptions::new("orange-zest")).unwrap();
//!
//! // One hour of validity for this link.
//! let link = signer.sign("https://example.com/report.pdf", Some(3600)).unwrap();
//! assert!(signer.verify(&link).is_ok());
//!
//! // Any alteration invalidates the link.
//! let tampered = link.replace("report", "secrets");
//! assert!(signer.verify(&tampered).is_err());
//! ```
//!
//! Verification failures come in exactly two kinds:
//! [`SignatureError::InvalidSignature`] for tampered or malformed input and
//! [`SignatureError::ExpiredSignature`] for authentic links past their
//! validity window. The digest is always checked before the embedded
//! timestamp is trusted.

pub mod error;
pub mod models;
pub mod services;

pub use error::{ConfigError, SignatureError};
pub use models::{HashAlgorithm, SignerOptions};
pub use services::{SignaturePayload, UrlSigner};
