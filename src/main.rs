use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sealink::{HashAlgorithm, SignerOptions, UrlSigner};

#[derive(Parser)]
#[command(name = "sealink")]
#[command(about = "Sign and verify tamper-evident, expiring URLs")]
struct Cli {
    /// Signing secret (falls back to SEALINK_SECRET, then the options file)
    #[arg(long, global = true)]
    secret: Option<String>,

    /// YAML options file (falls back to SEALINK_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a URL and print the signed form
    Sign {
        url: String,

        /// Lifetime in seconds; 0 means no expiry. Overrides the
        /// configured default TTL for this call.
        #[arg(short, long)]
        ttl: Option<u64>,

        /// Digest algorithm: sha1, sha256 or sha512
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,
    },
    /// Verify a signed URL; exits nonzero on failure
    Verify {
        url: String,

        /// Digest algorithm: sha1, sha256 or sha512
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,

        /// Print the original URL (signature stripped) instead of "valid"
        #[arg(long)]
        strip: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a fresh random hex secret
    GenSecret,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sealink=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match &cli.command {
        Commands::Sign {
            url,
            ttl,
            algorithm,
        } => {
            let options = resolve_options(&cli, *algorithm)?;
            run_sign(&options, url, *ttl)
        }
        Commands::Verify {
            url,
            algorithm,
            strip,
            json,
        } => {
            let options = resolve_options(&cli, *algorithm)?;
            run_verify(&options, url, *strip, *json)
        }
        Commands::GenSecret => {
            println!("{}", generate_secret());
            Ok(())
        }
    }
}

/// Assemble signer options from flags, environment and the options file.
/// Precedence: flag, then environment variable, then file.
fn resolve_options(cli: &Cli, algorithm: Option<HashAlgorithm>) -> anyhow::Result<SignerOptions> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("SEALINK_CONFIG").ok().map(PathBuf::from));

    let file_options = match &config_path {
        Some(path) => Some(SignerOptions::load_from_file(path)?),
        None => None,
    };

    let secret = cli
        .secret
        .clone()
        .or_else(|| std::env::var("SEALINK_SECRET").ok())
        .or_else(|| file_options.as_ref().map(|o| o.secret.clone()))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no signing secret: pass --secret, set SEALINK_SECRET, or provide an options file"
            )
        })?;

    let mut options = SignerOptions::new(secret);
    if let Some(file) = &file_options {
        options = options.with_ttl(file.ttl).with_algorithm(file.algorithm);
    }
    if let Some(algorithm) = algorithm {
        options = options.with_algorithm(algorithm);
    }
    Ok(options)
}

fn run_sign(options: &SignerOptions, url: &str, ttl: Option<u64>) -> anyhow::Result<()> {
    let signer = UrlSigner::new(options)?;
    let signed = signer.sign(url, ttl)?;
    println!("{signed}");
    Ok(())
}

fn run_verify(options: &SignerOptions, url: &str, strip: bool, json: bool) -> anyhow::Result<()> {
    let signer = UrlSigner::new(options)?;

    let result = if strip {
        signer.verify_and_strip(url).map(Some)
    } else {
        signer.verify(url).map(|()| None)
    };

    match result {
        Ok(original) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "valid": true, "url": original })
                );
            } else {
                println!("{}", original.unwrap_or_else(|| "valid".to_string()));
            }
            Ok(())
        }
        Err(e) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "valid": false, "reason": e.to_string() })
                );
            } else {
                eprintln!("{e}");
            }
            std::process::exit(1);
        }
    }
}

/// 32 random bytes, hex-encoded.
fn generate_secret() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}
