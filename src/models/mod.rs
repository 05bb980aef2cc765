pub mod options;

pub use options::{HashAlgorithm, SignerOptions};
