//! Command-line interface

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::OsRng;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hybrid_crypt::crypto::Curve;
use hybrid_crypt::exchange::{ciphertext_transcript, run_exchange, ExchangeConfig};
use hybrid_crypt::types::{DEFAULT_RSA_BITS, SAMPLE_PLAINTEXT};

#[derive(Parser)]
#[command(name = "hybrid_crypt")]
#[command(author = "HybridCrypt Contributors")]
#[command(version = "1.0.0")]
#[command(
    about = "Hybrid file encryption demo",
    long_about = "Hybrid file encryption demo\n\nWraps a random Salsa20 key with EC-ElGamal (P-256), signs the wrapped key with RSA,\nencrypts the input file in Salsa20-OFB mode, then plays the receiver and decrypts it again."
)]
pub struct Cli {
    /// File to encrypt (created with sample text if missing)
    #[arg(long, default_value = "input.txt")]
    pub input: PathBuf,

    /// Where to write IV + ciphertext
    #[arg(long, default_value = "encrypted.bin")]
    pub encrypted: PathBuf,

    /// Where the receiver writes the recovered plaintext
    #[arg(long, default_value = "decrypted.txt")]
    pub decrypted: PathBuf,

    /// RSA modulus size in bits (must exceed the 160-bit SHA-1 digest)
    #[arg(long, default_value_t = DEFAULT_RSA_BITS, value_parser = clap::value_parser!(u64).range(192..))]
    pub rsa_bits: u64,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    fn exchange_config(&self) -> ExchangeConfig {
        ExchangeConfig {
            input: self.input.clone(),
            encrypted: self.encrypted.clone(),
            decrypted: self.decrypted.clone(),
            rsa_bits: self.rsa_bits,
        }
    }
}

/// Initializes the tracing subscriber.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}

/// Write the sample plaintext if the input file does not exist yet
fn ensure_input(config: &ExchangeConfig) -> anyhow::Result<()> {
    if config.input.exists() {
        return Ok(());
    }

    warn!("'{}' not found. Creating a test file.", config.input.display());
    fs::write(&config.input, SAMPLE_PLAINTEXT)
        .with_context(|| format!("Failed to create {}", config.input.display()))
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = cli.exchange_config();
    ensure_input(&config)?;

    let curve = Curve::p256().context("Invalid curve parameters")?;
    let mut rng = OsRng;
    let report = run_exchange(&curve, &config, &mut rng)?;

    println!("{}", "=".repeat(60));
    println!("Encrypted key:\n{}", ciphertext_transcript(&report.envelope.encrypted_key));
    println!("Signature:\n{}", hex::encode(&report.envelope.signature));
    println!("{}", "=".repeat(60));

    if !report.files_match {
        anyhow::bail!(
            "Decryption failed: {} and {} do not match",
            config.input.display(),
            config.decrypted.display()
        );
    }

    info!("Decryption successful: original and decrypted files match");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["hybrid_crypt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("input.txt"));
        assert_eq!(cli.encrypted, PathBuf::from("encrypted.bin"));
        assert_eq!(cli.decrypted, PathBuf::from("decrypted.txt"));
        assert_eq!(cli.rsa_bits, DEFAULT_RSA_BITS);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_rejects_small_modulus() {
        assert!(Cli::try_parse_from(["hybrid_crypt", "--rsa-bits", "128"]).is_err());
        let cli = Cli::try_parse_from(["hybrid_crypt", "--rsa-bits", "512"]).unwrap();
        assert_eq!(cli.exchange_config().rsa_bits, 512);
    }

    #[test]
    fn test_ensure_input_bootstraps_sample() {
        let dir = tempdir().unwrap();
        let config = ExchangeConfig {
            input: dir.path().join("input.txt"),
            encrypted: dir.path().join("encrypted.bin"),
            decrypted: dir.path().join("decrypted.txt"),
            rsa_bits: 512,
        };

        ensure_input(&config).unwrap();
        assert_eq!(fs::read_to_string(&config.input).unwrap(), SAMPLE_PLAINTEXT);

        // Existing content is left alone
        fs::write(&config.input, "custom").unwrap();
        ensure_input(&config).unwrap();
        assert_eq!(fs::read_to_string(&config.input).unwrap(), "custom");
    }
}
