//! HybridCrypt - hybrid file encryption demo
//!
//! Wraps a Salsa20 session key with EC-ElGamal over P-256, signs the wrapped key
//! with RSA and encrypts a file with Salsa20 in OFB mode. The receiver side then
//! verifies, unwraps and decrypts.

mod cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
