pub mod payload;
pub mod url_signer;

pub use payload::SignaturePayload;
pub use url_signer::UrlSigner;
